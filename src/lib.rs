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

//! Object model building blocks for OpenStack clients.
//!
//! The central piece is [Optional](enum.Optional.html): a value which can be missing, present,
//! or present and `null`, and which round-trips through JSON without losing that difference.
//! Converters for closed `Optional<T>` types are created on demand and cached by the
//! [ConverterRegistry](struct.ConverterRegistry.html), which is also used to access the
//! [extension data](struct.ExtensionData.html) of extensible objects.
//!
//! ```rust
//! use osmodel::Optional;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Deserialize, Serialize)]
//! struct Queue {
//!     #[serde(default, skip_serializing_if = "Optional::is_unset")]
//!     description: Optional<Option<String>>,
//! }
//!
//! let queue: Queue = serde_json::from_str("{}").unwrap();
//! assert!(queue.description.is_unset());
//! assert_eq!(serde_json::to_string(&queue).unwrap(), "{}");
//! ```

#![crate_name = "osmodel"]
#![crate_type = "lib"]
// NOTE: we do not use generic deny(warnings) to avoid breakages with new
// versions of the compiler. Add more warnings here as you discover them.
// Taken from https://github.com/rust-unofficial/patterns/
#![deny(
    dead_code,
    improper_ctypes,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    trivial_casts,
    trivial_numeric_casts,
    unconditional_recursion,
    unsafe_code,
    unused,
    unused_allocation,
    unused_comparisons,
    unused_doc_comments,
    unused_import_braces,
    unused_parens,
    unused_results,
    while_true
)]
#![allow(
    clippy::new_ret_no_self,
    clippy::should_implement_trait,
    clippy::wrong_self_convention
)]

mod common;
mod converter;
mod error;
mod extension;
pub mod identity;
pub mod jsonhome;
mod macros;
mod optional;
mod registry;

pub use crate::common::empty_as_unset;
pub use crate::converter::{
    ConverterFactory, JsonConverter, JsonPayload, OptionalConverter, TypeDescriptor,
};
pub use crate::error::{Error, ErrorKind};
pub use crate::extension::{Extensible, ExtensionData};
pub use crate::optional::Optional;
pub use crate::registry::ConverterRegistry;
