//! Actor/session context.
//!
//! Whoever submits an invoice does so as an explicit `Actor` passed into the
//! workflow. The role is carried verbatim into audit notifications; nothing
//! here enforces authorization.

use serde::{Deserialize, Serialize};

/// The acting user: identity plus their role at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub username: String,
    pub role: String,
}

impl Actor {
    pub fn new(username: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            role: role.into(),
        }
    }
}
