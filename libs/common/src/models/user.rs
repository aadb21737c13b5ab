//! User identity model
//!
//! Identities are issued by the external identity provider; this crate
//! only ever reads them. A missing identity (unauthenticated caller) is
//! represented as `Option<UserIdentity>` at the call sites, never as a
//! sentinel value here.

use serde::{Deserialize, Serialize};

/// Minimal identity of an authenticated user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserIdentity {
    /// Opaque user id from the identity provider
    pub uid: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

impl UserIdentity {
    /// Convenience constructor for an identity with only a uid
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            display_name: None,
            email: None,
        }
    }
}
