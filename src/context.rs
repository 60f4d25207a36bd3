//! Request-scoped security context.
//!
//! Middleware resolves credentials once and inserts one of these immutable
//! values into the request extensions; services receive them by reference.

use std::collections::HashMap;

use serde_json::Value;

use crate::auth::{ApiKeyInfo, SessionInfo};

/// Caller authenticated with an API key (write routes)
#[derive(Clone, Debug, PartialEq)]
pub struct ApiKeyContext {
    pub key_id: String,
    pub permissions: Vec<String>,
    pub allowed_subdomains: Vec<String>,
}

impl ApiKeyContext {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

impl From<ApiKeyInfo> for ApiKeyContext {
    fn from(info: ApiKeyInfo) -> Self {
        Self {
            key_id: info.key_id,
            permissions: info.permissions,
            allowed_subdomains: info.allowed_subdomains,
        }
    }
}

/// Caller on the read routes. Anonymous callers have no `uid`; callers
/// without a subdomain header have no `subdomain`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionContext {
    pub subdomain: Option<String>,
    pub uid: Option<String>,
    pub claims: HashMap<String, Value>,
}

impl SessionContext {
    pub fn anonymous(subdomain: Option<String>) -> Self {
        Self {
            subdomain,
            ..Default::default()
        }
    }

    pub fn authenticated(subdomain: String, session: SessionInfo) -> Self {
        Self {
            subdomain: Some(subdomain),
            uid: Some(session.uid),
            claims: session.claims,
        }
    }

    /// Resolved tenant, if any. Blank values count as absent.
    pub fn subdomain(&self) -> Option<&str> {
        self.subdomain.as_deref().filter(|s| !s.trim().is_empty())
    }
}
