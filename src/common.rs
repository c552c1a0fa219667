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

//! Reusable (de)serialization helpers for model fields.

use serde::de::{DeserializeOwned, Error as DeserError};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::Optional;

/// Deserialize an `Optional` where an empty string is treated as a missing value.
///
/// Some services report unknown values as `""` instead of omitting them. Combine with
/// `#[serde(default)]` so that a missing key is unset as well.
pub fn empty_as_unset<'de, D, T>(des: D) -> Result<Optional<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(des)?;
    match value {
        Value::String(ref s) if s.is_empty() => Ok(Optional::Unset),
        _ => serde_json::from_value(value)
            .map(Optional::Set)
            .map_err(D::Error::custom),
    }
}

#[cfg(test)]
pub mod test {
    use serde::{Deserialize, Serialize};

    use super::empty_as_unset;
    use crate::Optional;

    pub fn compare<T: Serialize>(sample: &str, value: T) {
        let converted: serde_json::Value = serde_json::from_str(sample).unwrap();
        let result = serde_json::to_value(value).unwrap();
        assert_eq!(result, converted);
    }

    #[derive(Debug, Deserialize)]
    struct Custom(bool);

    #[derive(Debug, Deserialize)]
    struct EmptyAsUnset {
        #[serde(deserialize_with = "empty_as_unset", default)]
        number: Optional<u8>,
        #[serde(deserialize_with = "empty_as_unset", default)]
        vec: Optional<Vec<String>>,
        #[serde(deserialize_with = "empty_as_unset", default)]
        custom: Optional<Custom>,
        #[serde(deserialize_with = "empty_as_unset", default)]
        string: Optional<Option<String>>,
    }

    #[test]
    fn test_empty_as_unset_with_values() {
        let s = "{\"number\": 42, \"vec\": [\"value\"], \"custom\": true, \"string\": null}";
        let r: EmptyAsUnset = serde_json::from_str(s).unwrap();
        assert_eq!(r.number, Optional::new(42));
        assert_eq!(r.vec, Optional::new(vec!["value".to_string()]));
        assert!(r.custom.into_value().unwrap().0);
        assert_eq!(r.string, Optional::new(None));
    }

    #[test]
    fn test_empty_as_unset_with_empty_string() {
        let s = "{\"number\": \"\", \"vec\": \"\", \"custom\": \"\", \"string\": \"\"}";
        let r: EmptyAsUnset = serde_json::from_str(s).unwrap();
        assert!(r.number.is_unset());
        assert!(r.vec.is_unset());
        assert!(r.custom.is_unset());
        assert!(r.string.is_unset());
    }

    #[test]
    fn test_empty_as_unset_missing() {
        let r: EmptyAsUnset = serde_json::from_str("{}").unwrap();
        assert!(r.number.is_unset());
        assert!(r.string.is_unset());
    }

    #[test]
    fn test_empty_as_unset_invalid() {
        let s = "{\"number\": \"banana\"}";
        assert!(serde_json::from_str::<EmptyAsUnset>(s).is_err());
    }
}
