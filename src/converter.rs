// Copyright 2024 Dmitry Tantsur <dtantsur@protonmail.com>
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Type descriptors and per-type converters for `Optional` values.
//!
//! A [TypeDescriptor](struct.TypeDescriptor.html) identifies a closed type at runtime. For a
//! closed `Optional<T>` it also knows how to build the matching
//! [OptionalConverter](struct.OptionalConverter.html), which is what the registry relies on
//! to create converters without knowing `T` at compile time.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;

use log::trace;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use static_assertions::assert_obj_safe;

use crate::{Error, ErrorKind, Optional};

/// A type that can be carried inside a converted `Optional`.
///
/// Implemented automatically for every owned (de)serializable type.
pub trait JsonPayload: Serialize + DeserializeOwned + Send + 'static {}

impl<T> JsonPayload for T where T: Serialize + DeserializeOwned + Send + 'static {}

/// Constructor of a type-erased converter.
pub type ConverterFactory = fn() -> Arc<dyn JsonConverter>;

#[derive(Clone, Copy)]
enum Shape {
    Plain,
    Optional {
        argument: &'static str,
        factory: ConverterFactory,
    },
}

/// Runtime descriptor of a closed type.
///
/// Descriptors are compared and hashed by their `TypeId` only.
#[derive(Clone, Copy)]
pub struct TypeDescriptor {
    id: TypeId,
    name: &'static str,
    shape: Shape,
}

impl TypeDescriptor {
    /// Descriptor of a type which is not an `Optional`.
    ///
    /// Use `Optional::<T>::descriptor()` for the wrapper itself: a plain descriptor of an
    /// `Optional` is not recognized as convertible.
    pub fn plain<X: ?Sized + 'static>() -> TypeDescriptor {
        TypeDescriptor {
            id: TypeId::of::<X>(),
            name: type_name::<X>(),
            shape: Shape::Plain,
        }
    }

    /// Descriptor of the closed type `Optional<T>`.
    pub fn optional<T: JsonPayload>() -> TypeDescriptor {
        TypeDescriptor {
            id: TypeId::of::<Optional<T>>(),
            name: type_name::<Optional<T>>(),
            shape: Shape::Optional {
                argument: type_name::<T>(),
                factory: new_converter::<T>,
            },
        }
    }

    /// Type identifier.
    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Human-readable type name (best-effort).
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the descriptor describes some closed `Optional<T>`.
    #[inline]
    pub fn is_optional(&self) -> bool {
        matches!(self.shape, Shape::Optional { .. })
    }

    /// Name of `T` for an `Optional<T>`, `None` for other types.
    pub fn generic_argument(&self) -> Option<&'static str> {
        match self.shape {
            Shape::Optional { argument, .. } => Some(argument),
            Shape::Plain => None,
        }
    }

    /// Whether the descriptor describes exactly the type `X`.
    #[inline]
    pub fn is<X: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<X>()
    }

    /// Build a new converter for this type.
    ///
    /// Fails with `TypeMismatch` for types that are not an `Optional`.
    pub fn make_converter(&self) -> Result<Arc<dyn JsonConverter>, Error> {
        match self.shape {
            Shape::Optional { factory, .. } => Ok(factory()),
            Shape::Plain => Err(Error::new(
                ErrorKind::TypeMismatch,
                format!("Cannot create a converter for {}: not an Optional", self.name),
            )),
        }
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("optional", &self.is_optional())
            .finish()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &TypeDescriptor) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

fn new_converter<T: JsonPayload>() -> Arc<dyn JsonConverter> {
    Arc::new(OptionalConverter::<T>::new())
}

fn mismatch(expected: &TypeDescriptor, found: &TypeDescriptor) -> Error {
    Error::new(
        ErrorKind::TypeMismatch,
        format!("Expected target type {}, found {}", expected, found),
    )
}

/// Type-erased JSON converter for one closed `Optional<T>`.
///
/// Implementations must fail with `TypeMismatch` when given a type or a value other than the
/// one they were created for.
pub trait JsonConverter: fmt::Debug + Send + Sync + 'static {
    /// Descriptor of the type this converter handles.
    fn target(&self) -> TypeDescriptor;

    /// Whether the converter handles exactly the provided type.
    fn can_convert(&self, ty: &TypeDescriptor) -> bool {
        self.target() == *ty
    }

    /// Read a raw JSON value into a boxed `Optional<T>`.
    fn read_json(&self, raw: Value, ty: &TypeDescriptor) -> Result<Box<dyn Any + Send>, Error>;

    /// Write a boxed `Optional<T>`.
    ///
    /// Returns `None` when the value is unset and the field must be omitted.
    fn write_json(&self, value: &dyn Any) -> Result<Option<Value>, Error>;

    /// Convert into `Any` for downcasting to the concrete converter.
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

assert_obj_safe!(JsonConverter);

/// Converter specialized for `Optional<T>`.
///
/// A set value is written as the JSON representation of `T` itself (including `null` for a set
/// `None`); an unset value is not written at all.
pub struct OptionalConverter<T> {
    target: TypeDescriptor,
    _marker: PhantomData<fn() -> T>,
}

impl<T: JsonPayload> OptionalConverter<T> {
    /// Create a converter for `Optional<T>`.
    pub fn new() -> OptionalConverter<T> {
        OptionalConverter {
            target: TypeDescriptor::optional::<T>(),
            _marker: PhantomData,
        }
    }

    /// Read a raw JSON value as a set `Optional<T>`.
    pub fn read(&self, raw: Value) -> Result<Optional<T>, Error> {
        let value: T = serde_json::from_value(raw)?;
        Ok(Optional::Set(value))
    }

    /// Read a raw JSON value, checking that the requested type is `Optional<T>`.
    pub fn read_as(&self, raw: Value, ty: &TypeDescriptor) -> Result<Optional<T>, Error> {
        if !ty.is::<Optional<T>>() {
            return Err(mismatch(&self.target, ty));
        }

        self.read(raw)
    }

    /// Write an `Optional<T>`, returning `None` if the field must be omitted.
    pub fn write(&self, value: &Optional<T>) -> Result<Option<Value>, Error> {
        match value {
            Optional::Set(inner) => Ok(Some(serde_json::to_value(inner)?)),
            Optional::Unset => {
                trace!("Omitting unset value of type {}", self.target);
                Ok(None)
            }
        }
    }
}

impl<T: JsonPayload> Default for OptionalConverter<T> {
    fn default() -> OptionalConverter<T> {
        OptionalConverter::new()
    }
}

impl<T> fmt::Debug for OptionalConverter<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "OptionalConverter {{ target: {} }}", self.target)
    }
}

impl<T: JsonPayload> JsonConverter for OptionalConverter<T> {
    fn target(&self) -> TypeDescriptor {
        self.target
    }

    fn read_json(&self, raw: Value, ty: &TypeDescriptor) -> Result<Box<dyn Any + Send>, Error> {
        let value = self.read_as(raw, ty)?;
        Ok(Box::new(value))
    }

    fn write_json(&self, value: &dyn Any) -> Result<Option<Value>, Error> {
        match value.downcast_ref::<Optional<T>>() {
            Some(optional) => self.write(optional),
            None => Err(Error::new(
                ErrorKind::TypeMismatch,
                format!("Expected a value of type {}", self.target),
            )),
        }
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}
