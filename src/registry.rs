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

//! Process-wide converter cache.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use lazy_static::lazy_static;
use log::{debug, trace, warn};
use serde_json::Value;
use static_assertions::assert_impl_all;

use crate::converter::{JsonConverter, JsonPayload, OptionalConverter, TypeDescriptor};
use crate::{Error, ErrorKind, Optional};

lazy_static! {
    static ref GLOBAL_REGISTRY: ConverterRegistry = ConverterRegistry::new();
}

/// Cache of converters for closed `Optional<T>` types.
///
/// Converters are created on first use and live as long as the registry. For every closed type
/// exactly one converter is ever stored: callers racing on the first use may build a candidate
/// each, but all of them get the same winning instance back.
#[derive(Debug, Default)]
pub struct ConverterRegistry {
    converters: RwLock<HashMap<TypeId, Arc<dyn JsonConverter>>>,
}

assert_impl_all!(ConverterRegistry: Send, Sync);

impl ConverterRegistry {
    /// Create a new empty registry.
    #[inline]
    pub fn new() -> ConverterRegistry {
        ConverterRegistry {
            converters: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide registry.
    #[inline]
    pub fn global() -> &'static ConverterRegistry {
        &GLOBAL_REGISTRY
    }

    /// Whether the type is a closed `Optional<T>`.
    #[inline]
    pub fn can_convert(&self, ty: &TypeDescriptor) -> bool {
        ty.is_optional()
    }

    /// Number of cached converters.
    pub fn len(&self) -> usize {
        self.converters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no converters have been created yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the converter for the type, creating it on first use.
    ///
    /// Fails with `TypeMismatch` if the type is not an `Optional`.
    pub fn get_or_create(&self, ty: &TypeDescriptor) -> Result<Arc<dyn JsonConverter>, Error> {
        if !self.can_convert(ty) {
            return Err(Error::new(
                ErrorKind::TypeMismatch,
                format!("No converter can handle type {}", ty),
            ));
        }

        if let Some(found) = self
            .converters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&ty.id())
        {
            trace!("Using cached converter for {}", ty);
            return Ok(Arc::clone(found));
        }

        debug!("No cached converter for {}, creating one", ty);
        // Built outside of the lock so that other types are not blocked.
        let candidate = ty.make_converter()?;

        let mut lock = self
            .converters
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        // Another thread may have inserted a converter while we were building ours.
        let winner = lock.entry(ty.id()).or_insert_with(|| Arc::clone(&candidate));
        if !Arc::ptr_eq(winner, &candidate) {
            warn!("Discarding a duplicate converter for {}", ty);
        }
        Ok(Arc::clone(winner))
    }

    /// Get the typed converter for `Optional<T>`.
    pub fn converter_for<T: JsonPayload>(&self) -> Result<Arc<OptionalConverter<T>>, Error> {
        let ty = Optional::<T>::descriptor();
        self.get_or_create(&ty)?
            .into_any()
            .downcast::<OptionalConverter<T>>()
            .map_err(|_| {
                Error::new(
                    ErrorKind::TypeMismatch,
                    format!("Registry returned a converter of a wrong type for {}", ty),
                )
            })
    }

    /// Read a raw JSON value into a boxed value of the provided type.
    ///
    /// The result can be downcast to the `Optional<T>` described by `ty`.
    pub fn read(&self, raw: Value, ty: &TypeDescriptor) -> Result<Box<dyn Any + Send>, Error> {
        self.get_or_create(ty)?.read_json(raw, ty)
    }

    /// Read a raw JSON value into `Optional<T>`.
    pub fn read_optional<T: JsonPayload>(&self, raw: Value) -> Result<Optional<T>, Error> {
        self.converter_for::<T>()?.read(raw)
    }

    /// Write an `Optional<T>`.
    ///
    /// Returns `None` if the value is unset and must be omitted from the enclosing object.
    pub fn write<T: JsonPayload>(&self, value: &Optional<T>) -> Result<Option<Value>, Error> {
        self.converter_for::<T>()?.write(value)
    }

    /// Write a type-erased value described by `ty`.
    pub fn write_dyn(&self, value: &dyn Any, ty: &TypeDescriptor) -> Result<Option<Value>, Error> {
        self.get_or_create(ty)?.write_json(value)
    }
}
