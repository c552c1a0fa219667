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

//! Useful macros for defining object model structures.

/// A macro for defining strongly-typed resource identifiers.
///
/// An identifier is a non-empty string that is (de)serialized as a bare JSON string.
/// `Clone`, `Debug`, `Display`, ordering and equality traits are automatically derived:
///
/// ```rust
/// osmodel::resource_identifier! {
///     #[doc = "Identifier of a server."]
///     ServerId
/// }
///
/// let id = ServerId::new("1d6f7a3b");
/// assert_eq!(id.value(), "1d6f7a3b");
/// assert_eq!(serde_json::to_string(&id).unwrap(), "\"1d6f7a3b\"");
/// assert!(serde_json::from_str::<ServerId>("\"\"").is_err());
/// ```
#[macro_export]
macro_rules! resource_identifier {
    {$(#[$attr:meta])* $name:ident} => (
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Create an identifier from a string value.
            #[inline]
            pub fn new<S: Into<String>>(value: S) -> $name {
                $name(value.into())
            }

            /// The identifier value.
            #[inline]
            pub fn value(&self) -> &str {
                &self.0
            }
        }

        impl ::std::convert::AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            /// Displays the identifier value.
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::Error;

            fn from_str(s: &str) -> ::std::result::Result<$name, $crate::Error> {
                if s.is_empty() {
                    let msg = format!("{} cannot be empty", stringify!($name));
                    Err($crate::Error::new($crate::ErrorKind::InvalidInput, msg))
                } else {
                    Ok($name(s.to_string()))
                }
            }
        }

        impl ::serde::ser::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
                    where S: ::serde::ser::Serializer {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> ::serde::de::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
                    where D: ::serde::de::Deserializer<'de> {
                let value = <String as ::serde::de::Deserialize>::deserialize(deserializer)?;
                if value.is_empty() {
                    use ::serde::de::Error;
                    let err = format!("Unexpected empty {}", stringify!($name));
                    Err(D::Error::custom(err))
                } else {
                    Ok($name(value))
                }
            }
        }
    );
}
