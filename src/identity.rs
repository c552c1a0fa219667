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

//! Authentication data for Identity API v2.
//!
//! All properties of [AuthenticationData](struct.AuthenticationData.html) are optional: only the
//! ones that were explicitly provided are sent to the server. Vendor-specific credentials
//! (for example, Rackspace API keys) are passed as extension data:
//!
//! ```rust
//! use osmodel::identity::{AuthenticationData, AuthenticationRequest};
//! use osmodel::ExtensionData;
//! use serde_json::json;
//!
//! let credentials = json!({"username": "demo", "apiKey": "0123456789abcdef"});
//! let extension = ExtensionData::new()
//!     .with("RAX-KSKEY:apiKeyCredentials", credentials)
//!     .unwrap();
//! let request = AuthenticationRequest::new(AuthenticationData::from_extension(extension));
//! assert_eq!(
//!     serde_json::to_value(&request).unwrap(),
//!     json!({"auth": {"RAX-KSKEY:apiKeyCredentials": {"username": "demo", "apiKey": "0123456789abcdef"}}})
//! );
//! ```

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::common::empty_as_unset;
use crate::{resource_identifier, Extensible, ExtensionData, Optional};

resource_identifier! {
    #[doc = "Identifier of a project (known as tenant in Identity API v2)."]
    ProjectId
}

/// User name and password.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PasswordCredentials {
    /// User name.
    pub username: String,
    /// User password.
    pub password: String,
}

impl PasswordCredentials {
    /// Create new credentials.
    pub fn new<U, P>(username: U, password: P) -> PasswordCredentials
    where
        U: Into<String>,
        P: Into<String>,
    {
        PasswordCredentials {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for PasswordCredentials {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "PasswordCredentials {{ username: {:?}, password: *** }}",
            self.username
        )
    }
}

/// A tenant (project) the token is scoped to.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Tenant {
    /// Tenant ID.
    pub id: ProjectId,
    /// Tenant name.
    #[serde(default, skip_serializing_if = "Optional::is_unset")]
    pub name: Optional<String>,
    /// Additional properties.
    #[serde(flatten)]
    pub extension: ExtensionData,
}

/// An authentication token.
#[derive(Clone, PartialEq, Deserialize, Serialize)]
pub struct Token {
    /// Token value.
    pub id: String,
    /// Expiration time, unset if unknown.
    #[serde(
        default,
        deserialize_with = "empty_as_unset",
        skip_serializing_if = "Optional::is_unset"
    )]
    pub expires: Optional<DateTime<FixedOffset>>,
    /// The tenant the token is scoped to.
    #[serde(default, skip_serializing_if = "Optional::is_unset")]
    pub tenant: Optional<Tenant>,
    /// Additional properties.
    #[serde(flatten)]
    pub extension: ExtensionData,
}

impl Token {
    /// Create a token from its value.
    pub fn new<S: Into<String>>(id: S) -> Token {
        Token {
            id: id.into(),
            expires: Optional::Unset,
            tenant: Optional::Unset,
            extension: ExtensionData::new(),
        }
    }

    /// Expiration time, if known.
    #[inline]
    pub fn expires(&self) -> Option<&DateTime<FixedOffset>> {
        self.expires.get()
    }

    /// Whether the token is known to expire before the given time.
    pub fn expires_before(&self, time: &DateTime<FixedOffset>) -> bool {
        match self.expires.get() {
            Some(expires) => expires < time,
            None => false,
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut hasher = DefaultHasher::new();
        self.id.hash(&mut hasher);
        write!(
            f,
            "Token {{ id: hash({}), expires: {:?}, tenant: {:?} }}",
            hasher.finish(),
            self.expires,
            self.tenant
        )
    }
}

impl Extensible for Token {
    fn extension_data(&self) -> &ExtensionData {
        &self.extension
    }
}

/// Authentication data for Identity API v2.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct AuthenticationData {
    #[serde(
        rename = "tenantName",
        default,
        skip_serializing_if = "Optional::is_unset"
    )]
    tenant_name: Optional<String>,
    #[serde(rename = "tenantId", default, skip_serializing_if = "Optional::is_unset")]
    tenant_id: Optional<ProjectId>,
    #[serde(
        rename = "passwordCredentials",
        default,
        skip_serializing_if = "Optional::is_unset"
    )]
    password_credentials: Optional<PasswordCredentials>,
    #[serde(default, skip_serializing_if = "Optional::is_unset")]
    token: Optional<Token>,
    #[serde(flatten)]
    extension: ExtensionData,
}

impl AuthenticationData {
    /// Authentication data consisting only of vendor-specific properties.
    pub fn from_extension(extension: ExtensionData) -> AuthenticationData {
        AuthenticationData {
            extension,
            ..AuthenticationData::default()
        }
    }

    /// Authentication with a user name and a password.
    pub fn with_password(credentials: PasswordCredentials) -> AuthenticationData {
        AuthenticationData {
            password_credentials: Optional::new(credentials),
            ..AuthenticationData::default()
        }
    }

    /// Authentication with an existing token.
    pub fn with_token(token: Token) -> AuthenticationData {
        AuthenticationData {
            token: Optional::new(token),
            ..AuthenticationData::default()
        }
    }

    /// Scope the authentication to a tenant name.
    #[inline]
    pub fn with_tenant_name<S: Into<String>>(mut self, tenant_name: S) -> AuthenticationData {
        self.tenant_name = Optional::new(tenant_name.into());
        self
    }

    /// Scope the authentication to a tenant ID.
    #[inline]
    pub fn with_tenant_id(mut self, tenant_id: ProjectId) -> AuthenticationData {
        self.tenant_id = Optional::new(tenant_id);
        self
    }

    /// Replace the extension data.
    #[inline]
    pub fn with_extension_data(mut self, extension: ExtensionData) -> AuthenticationData {
        self.extension = extension;
        self
    }

    /// Tenant name, if included.
    #[inline]
    pub fn tenant_name(&self) -> Option<&str> {
        self.tenant_name.get().map(String::as_str)
    }

    /// Tenant ID, if included.
    #[inline]
    pub fn tenant_id(&self) -> Option<&ProjectId> {
        self.tenant_id.get()
    }

    /// Password credentials, if included.
    #[inline]
    pub fn password_credentials(&self) -> Option<&PasswordCredentials> {
        self.password_credentials.get()
    }

    /// Token, if included.
    #[inline]
    pub fn token(&self) -> Option<&Token> {
        self.token.get()
    }
}

impl Extensible for AuthenticationData {
    fn extension_data(&self) -> &ExtensionData {
        &self.extension
    }
}

/// Body of an authentication request.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AuthenticationRequest {
    /// Authentication data.
    pub auth: AuthenticationData,
}

impl AuthenticationRequest {
    /// Create a new request.
    #[inline]
    pub fn new(auth: AuthenticationData) -> AuthenticationRequest {
        AuthenticationRequest { auth }
    }
}
