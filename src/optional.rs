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

//! Optional value that distinguishes a missing value from a null one.

use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::converter::{JsonPayload, TypeDescriptor};
use crate::{Error, ErrorKind};

const NO_VALUE: &str = "The optional object does not have a value";

/// A value that may be missing from the underlying JSON data.
///
/// Unlike `Option`, an `Optional` separates a value which is *missing* from a value which is
/// *present*, even if the latter is `null` or a zero value. Use `Optional<Option<T>>` to model a
/// property that may be present with a `null` value.
///
/// On the wire the wrapper is transparent: a set value serializes as the value itself. An unset
/// value has no JSON form and fails to serialize, so model fields are declared like this:
///
/// ```rust
/// use osmodel::Optional;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Default, Deserialize, Serialize)]
/// struct Server {
///     #[serde(default, skip_serializing_if = "Optional::is_unset")]
///     name: Optional<Option<String>>,
/// }
///
/// let server: Server = serde_json::from_str("{}").unwrap();
/// assert!(server.name.is_unset());
/// let server: Server = serde_json::from_str("{\"name\": null}").unwrap();
/// assert_eq!(server.name, Optional::new(None));
/// assert_eq!(serde_json::to_string(&server).unwrap(), "{\"name\":null}");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Optional<T> {
    /// No value is set.
    Unset,
    /// A value is set (it may still be `None` for `Optional<Option<T>>`).
    Set(T),
}

impl<T> Default for Optional<T> {
    #[inline]
    fn default() -> Optional<T> {
        Optional::Unset
    }
}

impl<T> Optional<T> {
    /// Wrap a value.
    #[inline]
    pub const fn new(value: T) -> Optional<T> {
        Optional::Set(value)
    }

    /// An `Optional` without a value.
    #[inline]
    pub const fn unset() -> Optional<T> {
        Optional::Unset
    }

    /// An `Optional` set to the default (zero) value of `T`.
    ///
    /// Unlike [default](#method.default), which is unset.
    #[inline]
    pub fn default_value() -> Optional<T>
    where
        T: Default,
    {
        Optional::Set(T::default())
    }

    /// Convert an `Option`, treating `None` as unset.
    #[inline]
    pub fn from_option(value: Option<T>) -> Optional<T> {
        match value {
            Some(inner) => Optional::Set(inner),
            None => Optional::Unset,
        }
    }

    /// Whether a value is set.
    #[inline]
    pub fn has_value(&self) -> bool {
        matches!(self, Optional::Set(..))
    }

    /// Whether the value is unset.
    ///
    /// Suitable for `skip_serializing_if`.
    #[inline]
    pub fn is_unset(&self) -> bool {
        !self.has_value()
    }

    /// Get a reference to the value, if it is set.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        match self {
            Optional::Set(value) => Some(value),
            Optional::Unset => None,
        }
    }

    /// Get the value and whether it was set.
    ///
    /// An unset value yields `T::default()` and `false`.
    pub fn try_get_value(&self) -> (T, bool)
    where
        T: Clone + Default,
    {
        match self {
            Optional::Set(value) => (value.clone(), true),
            Optional::Unset => (T::default(), false),
        }
    }

    /// Get a reference to the value or fail with `InvalidState`.
    pub fn get_value(&self) -> Result<&T, Error> {
        self.get()
            .ok_or_else(|| Error::new(ErrorKind::InvalidState, NO_VALUE))
    }

    /// Extract the value or fail with `InvalidState`.
    pub fn into_value(self) -> Result<T, Error> {
        match self {
            Optional::Set(value) => Ok(value),
            Optional::Unset => Err(Error::new(ErrorKind::InvalidState, NO_VALUE)),
        }
    }

    /// Get the value or `T::default()` if it is unset.
    #[inline]
    pub fn get_value_or_default(&self) -> T
    where
        T: Clone + Default,
    {
        self.try_get_value().0
    }

    /// Get the value or the provided fallback if it is unset.
    #[inline]
    pub fn get_value_or(&self, fallback: T) -> T
    where
        T: Clone,
    {
        match self {
            Optional::Set(value) => value.clone(),
            Optional::Unset => fallback,
        }
    }

    /// Borrow the inner value.
    #[inline]
    pub fn as_ref(&self) -> Optional<&T> {
        match self {
            Optional::Set(value) => Optional::Set(value),
            Optional::Unset => Optional::Unset,
        }
    }

    /// Transform a set value, keeping unset as is.
    #[inline]
    pub fn map<U, F>(self, f: F) -> Optional<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Optional::Set(value) => Optional::Set(f(value)),
            Optional::Unset => Optional::Unset,
        }
    }

    /// Convert into an `Option`, losing the difference between unset and null.
    #[inline]
    pub fn into_option(self) -> Option<T> {
        match self {
            Optional::Set(value) => Some(value),
            Optional::Unset => None,
        }
    }
}

impl<T: JsonPayload> Optional<T> {
    /// Runtime descriptor of this closed `Optional` type.
    #[inline]
    pub fn descriptor() -> TypeDescriptor {
        TypeDescriptor::optional::<T>()
    }
}

impl<T> Optional<Option<T>> {
    /// Whether a value is set and is `null`.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Optional::Set(None))
    }
}

impl<T> From<T> for Optional<T> {
    #[inline]
    fn from(value: T) -> Optional<T> {
        Optional::Set(value)
    }
}

impl<T> From<Optional<T>> for Option<T> {
    #[inline]
    fn from(value: Optional<T>) -> Option<T> {
        value.into_option()
    }
}

impl<T: Serialize> Serialize for Optional<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Optional::Set(value) => value.serialize(serializer),
            // Writing null would read back as a set null value.
            Optional::Unset => Err(S::Error::custom(
                "unset Optional must be skipped with skip_serializing_if = \"Optional::is_unset\"",
            )),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Optional<T> {
    fn deserialize<D>(deserializer: D) -> Result<Optional<T>, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Optional::Set)
    }
}

#[cfg(test)]
pub mod test {
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;
    use std::hash::{Hash, Hasher};

    use serde::{Deserialize, Serialize};

    use super::Optional;
    use crate::ErrorKind;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_try_get_value() {
        assert_eq!(Optional::new(42u32).try_get_value(), (42, true));
        assert_eq!(Optional::new(0u32).try_get_value(), (0, true));
        assert_eq!(Optional::<u32>::unset().try_get_value(), (0, false));
        assert_eq!(
            Optional::<String>::unset().try_get_value(),
            (String::new(), false)
        );
        assert_eq!(
            Optional::new(None::<String>).try_get_value(),
            (None, true)
        );
    }

    #[test]
    fn test_unset_differs_from_default() {
        let unset = Optional::<i64>::unset();
        let zero = Optional::new(0i64);
        assert_ne!(unset, zero);
        assert_eq!(unset.get_value_or_default(), 0);
        assert_eq!(zero.get_value_or_default(), 0);
        assert_eq!(Optional::<i64>::default(), unset);
    }

    #[test]
    fn test_equality() {
        assert_eq!(Optional::new("a"), Optional::new("a"));
        assert_ne!(Optional::new("a"), Optional::new("b"));
        assert_eq!(Optional::<&str>::unset(), Optional::unset());
        assert_ne!(Optional::<&str>::unset(), Optional::new(""));
        assert_ne!(Optional::<Option<u8>>::unset(), Optional::new(None));
    }

    #[test]
    fn test_hash_contract() {
        assert_eq!(hash_of(&Optional::new(5u8)), hash_of(&Optional::new(5u8)));
        assert_eq!(
            hash_of(&Optional::<u8>::unset()),
            hash_of(&Optional::<u8>::unset())
        );
        assert_ne!(
            hash_of(&Optional::<Option<u8>>::unset()),
            hash_of(&Optional::new(None::<u8>))
        );

        let mut set = HashSet::new();
        assert!(set.insert(Optional::<Option<u8>>::unset()));
        assert!(set.insert(Optional::new(None)));
        assert!(set.insert(Optional::new(Some(0))));
        assert!(!set.insert(Optional::new(None)));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_get_value() {
        assert_eq!(*Optional::new(1u8).get_value().unwrap(), 1);
        let err = Optional::<u8>::unset().get_value().err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn test_into_value() {
        assert_eq!(Optional::new("x".to_string()).into_value().unwrap(), "x");
        let err = Optional::<String>::unset().into_value().err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn test_get_value_or() {
        assert_eq!(Optional::new(1u8).get_value_or(7), 1);
        assert_eq!(Optional::<u8>::unset().get_value_or(7), 7);
    }

    #[test]
    fn test_conversions() {
        let wrapped: Optional<&str> = "x".into();
        assert_eq!(wrapped, Optional::Set("x"));
        let null: Optional<Option<&str>> = None.into();
        assert!(null.has_value());
        assert!(null.is_null());
        let plain: Option<u8> = Optional::new(3u8).into();
        assert_eq!(plain, Some(3));
        let plain: Option<u8> = Optional::unset().into();
        assert_eq!(plain, None);
        assert_eq!(Optional::from_option(Some(3u8)), Optional::new(3));
        assert!(Optional::<u8>::from_option(None).is_unset());
        assert_eq!(Optional::new(2u8).map(|x| x * 2), Optional::new(4));
        assert_eq!(Optional::new(2u8).as_ref().get(), Some(&&2));
    }

    #[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
    struct Named {
        #[serde(default, skip_serializing_if = "Optional::is_unset")]
        name: Optional<Option<String>>,
    }

    #[test]
    fn test_missing_null_and_value() {
        let missing: Named = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.name, Optional::unset());
        let null: Named = serde_json::from_str("{\"name\": null}").unwrap();
        assert_eq!(null.name, Optional::new(None));
        let value: Named = serde_json::from_str("{\"name\": \"x\"}").unwrap();
        assert_eq!(value.name, Optional::new(Some("x".to_string())));

        assert_eq!(serde_json::to_string(&missing).unwrap(), "{}");
        assert_eq!(serde_json::to_string(&null).unwrap(), "{\"name\":null}");
        assert_eq!(serde_json::to_string(&value).unwrap(), "{\"name\":\"x\"}");
    }

    #[test]
    fn test_non_nullable_rejects_null() {
        #[derive(Debug, Deserialize)]
        struct Strict {
            #[serde(default)]
            count: Optional<u32>,
        }

        assert!(serde_json::from_str::<Strict>("{\"count\": null}").is_err());
        let parsed: Strict = serde_json::from_str("{\"count\": 0}").unwrap();
        assert_eq!(parsed.count, Optional::new(0));
    }

    #[test]
    fn test_unset_without_skip_fails() {
        #[derive(Debug, Default, Serialize)]
        struct Forgetful {
            #[serde(default)]
            name: Optional<Option<String>>,
        }

        assert!(serde_json::to_string(&Optional::<u8>::unset()).is_err());
        let err = serde_json::to_string(&Forgetful::default()).err().unwrap();
        assert!(err.to_string().contains("skip_serializing_if"));
        assert_eq!(serde_json::to_string(&Optional::new(1u8)).unwrap(), "1");

        let null = Forgetful {
            name: Optional::new(None),
        };
        assert_eq!(serde_json::to_string(&null).unwrap(), "{\"name\":null}");
    }

    #[test]
    fn test_default_value() {
        let zero = Optional::<u32>::default_value();
        assert_eq!(zero, Optional::new(0));
        assert!(zero.has_value());
        assert_ne!(zero, Optional::unset());
        assert_eq!(Optional::<Option<String>>::default_value(), Optional::new(None));
    }
}
