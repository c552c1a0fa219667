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

//! Error and result implementations.

use std::error;
use std::fmt;

/// Kind of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A value was requested from an unset `Optional`.
    ///
    /// Use `get()`, `try_get_value()` or `get_value_or_default()` when a value may be missing.
    InvalidState,

    /// A converter was asked to handle a type it was not created for.
    ///
    /// This indicates a defect in converter dispatch rather than bad input.
    TypeMismatch,

    /// JSON payload cannot be converted into the requested type.
    SerializationError,

    /// Invalid value passed to one of the model constructors.
    InvalidInput,
}

/// Error from an object model operation.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    source: Option<serde_json::Error>,
}

impl ErrorKind {
    /// Short description of the error kind.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorKind::InvalidState => "Value is not set",
            ErrorKind::TypeMismatch => "Unexpected type in converter dispatch",
            ErrorKind::SerializationError => "Failed to (de)serialize JSON",
            ErrorKind::InvalidInput => "Input value(s) are invalid or missing",
        }
    }
}

impl Error {
    /// Create a new error of the provided kind.
    #[inline]
    pub fn new<S: Into<String>>(kind: ErrorKind, message: S) -> Error {
        Error {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Error kind.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Underlying JSON error, if any.
    #[inline]
    pub fn json_error(&self) -> Option<&serde_json::Error> {
        self.source.as_ref()
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self.source {
            Some(ref err) => Some(err),
            None => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Error {
        Error {
            kind: ErrorKind::SerializationError,
            message: value.to_string(),
            source: Some(value),
        }
    }
}
