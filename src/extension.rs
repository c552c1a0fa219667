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

//! Extension data of extensible JSON objects.

use log::trace;
use serde::{Deserialize, Serialize};
use serde_json::map::Iter;
use serde_json::{Map, Value};

use crate::converter::JsonPayload;
use crate::registry::ConverterRegistry;
use crate::{Error, Optional};

/// Properties of a JSON object that are not covered by the object model.
///
/// Embed it into a model with `#[serde(flatten)]` to keep vendor-specific properties around:
///
/// ```rust
/// use osmodel::{ExtensionData, Optional};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Deserialize, Serialize)]
/// struct Flavor {
///     name: String,
///     #[serde(flatten)]
///     extension: ExtensionData,
/// }
///
/// let flavor: Flavor =
///     serde_json::from_str(r#"{"name": "m1.tiny", "OS-FLV-DISABLED:disabled": false}"#).unwrap();
/// let disabled: Optional<bool> = flavor.extension.get("OS-FLV-DISABLED:disabled").unwrap();
/// assert_eq!(disabled, Optional::new(false));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ExtensionData(Map<String, Value>);

impl ExtensionData {
    /// Create empty extension data.
    #[inline]
    pub fn new() -> ExtensionData {
        ExtensionData(Map::new())
    }

    /// Get a property as `Optional<T>`.
    ///
    /// A missing property is unset, a `null` property is read as `T` (use `Option` for `T` to
    /// accept it).
    pub fn get<T: JsonPayload>(&self, name: &str) -> Result<Optional<T>, Error> {
        match self.0.get(name) {
            Some(raw) => ConverterRegistry::global().read_optional(raw.clone()),
            None => Ok(Optional::Unset),
        }
    }

    /// Set or remove a property.
    ///
    /// An unset value removes the property.
    pub fn set<T: JsonPayload>(&mut self, name: &str, value: Optional<T>) -> Result<(), Error> {
        match ConverterRegistry::global().write(&value)? {
            Some(raw) => {
                let _ = self.0.insert(name.to_string(), raw);
            }
            None => {
                trace!("Removing unset extension property {}", name);
                let _ = self.0.remove(name);
            }
        }
        Ok(())
    }

    /// Add a property, consuming and returning the data.
    pub fn with<T: JsonPayload>(mut self, name: &str, value: T) -> Result<ExtensionData, Error> {
        self.set(name, Optional::new(value))?;
        Ok(self)
    }

    /// Get a raw property value.
    #[inline]
    pub fn get_raw(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Remove a property, returning its raw value.
    #[inline]
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    /// Whether the property is present (possibly as `null`).
    #[inline]
    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of properties.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no properties.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the raw properties.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        self.0.iter()
    }

    /// Extract the underlying JSON object.
    #[inline]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for ExtensionData {
    #[inline]
    fn from(value: Map<String, Value>) -> ExtensionData {
        ExtensionData(value)
    }
}

impl<'a> IntoIterator for &'a ExtensionData {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// An object model that keeps unknown JSON properties.
pub trait Extensible {
    /// Properties without a dedicated field.
    fn extension_data(&self) -> &ExtensionData;

    /// Get an extension property as `Optional<T>`.
    fn extension<T: JsonPayload>(&self, name: &str) -> Result<Optional<T>, Error> {
        self.extension_data().get(name)
    }
}
