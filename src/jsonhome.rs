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

//! JSON Home documents (draft-nottingham-json-home-03).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use crate::{Error, ErrorKind, Extensible, ExtensionData, Optional};

/// A home document listing the resources of an API.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct HomeDocument {
    /// Resources by their link relation.
    #[serde(default)]
    pub resources: HashMap<String, ResourceObject>,
    /// Additional properties.
    #[serde(flatten)]
    pub extension: ExtensionData,
}

impl HomeDocument {
    /// Find a resource by its link relation.
    #[inline]
    pub fn resource(&self, relation: &str) -> Option<&ResourceObject> {
        self.resources.get(relation)
    }
}

/// A resource object: either a direct link or a templated one.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ResourceObject {
    /// Direct (possibly relative) URI of the resource.
    #[serde(default, skip_serializing_if = "Optional::is_unset")]
    pub href: Optional<String>,
    /// URI template (RFC 6570) of the resource.
    #[serde(
        rename = "href-template",
        default,
        skip_serializing_if = "Optional::is_unset"
    )]
    pub href_template: Optional<String>,
    /// Template variables mapped to (possibly relative) URIs describing their semantics.
    #[serde(rename = "href-vars", default, skip_serializing_if = "Optional::is_unset")]
    pub href_vars: Optional<HashMap<String, String>>,
    /// Resource hints.
    #[serde(default, skip_serializing_if = "Optional::is_unset")]
    pub hints: Optional<ResourceHints>,
    /// Additional properties.
    #[serde(flatten)]
    pub extension: ExtensionData,
}

impl ResourceObject {
    /// Whether this is a templated link.
    #[inline]
    pub fn is_templated(&self) -> bool {
        self.href_template.has_value()
    }

    /// Resolve the direct link against the URL of the home document.
    ///
    /// Returns `None` for templated links.
    pub fn resolve(&self, base: &Url) -> Result<Option<Url>, Error> {
        self.href.get().map(|href| join(base, href)).transpose()
    }

    /// Resolve the URI of a template variable against the URL of the home document.
    ///
    /// Returns `None` if the variable is not described.
    pub fn href_var(&self, name: &str, base: &Url) -> Result<Option<Url>, Error> {
        self.href_vars
            .get()
            .and_then(|vars| vars.get(name))
            .map(|link| join(base, link))
            .transpose()
    }
}

fn join(base: &Url, link: &str) -> Result<Url, Error> {
    base.join(link).map_err(|err| {
        Error::new(
            ErrorKind::InvalidInput,
            format!("Invalid resource link {}: {}", link, err),
        )
    })
}

impl Extensible for ResourceObject {
    fn extension_data(&self) -> &ExtensionData {
        &self.extension
    }
}

/// Hints describing how to interact with a resource.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ResourceHints {
    /// Allowed HTTP methods.
    #[serde(default, skip_serializing_if = "Optional::is_unset")]
    pub allow: Optional<Vec<String>>,
    /// Supported representation formats.
    #[serde(default, skip_serializing_if = "Optional::is_unset")]
    pub formats: Optional<Map<String, Value>>,
    /// Additional hints.
    #[serde(flatten)]
    pub extension: ExtensionData,
}

impl ResourceHints {
    /// Whether the method is allowed, if the hint is present.
    pub fn allows(&self, method: &str) -> Option<bool> {
        self.allow
            .get()
            .map(|allow| allow.iter().any(|item| item.eq_ignore_ascii_case(method)))
    }
}

impl Extensible for ResourceHints {
    fn extension_data(&self) -> &ExtensionData {
        &self.extension
    }
}
