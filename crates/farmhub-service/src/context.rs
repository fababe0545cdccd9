//! Request context carrying the authenticated actor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use farmhub_auth::Actor;
use farmhub_core::types::UserId;

/// Context for the current authenticated request.
///
/// Built by the HTTP extractor and passed into every service method so
/// that each operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Snapshot of the caller taken at authentication time.
    pub actor: Actor,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(actor: Actor) -> Self {
        Self {
            actor,
            request_time: Utc::now(),
        }
    }

    /// The acting user's id.
    pub fn user_id(&self) -> UserId {
        self.actor.user_id
    }

    /// Whether the actor bypasses role rules.
    pub fn is_platform_admin(&self) -> bool {
        self.actor.is_platform_admin()
    }
}
