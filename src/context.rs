//! Host-supplied collaborators
//!
//! The core consumes users, projects, and the current time through the
//! narrow interfaces in this module. Users and projects are never loaded
//! here; the host resolves them and hands over the pieces the core needs:
//! identifiers, display names, the admin flag, and a membership check.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier for a user record owned by the host system
pub type UserId = Uuid;

/// Opaque identifier for a project record owned by the host system
pub type ProjectId = Uuid;

/// The acting user, as resolved by the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserContext {
    pub id: UserId,
    pub display_name: String,
    pub is_admin: bool,
}

impl UserContext {
    /// Create a regular (non-admin) user context
    pub fn new(id: UserId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            is_admin: false,
        }
    }

    /// Create an administrator user context
    pub fn admin(id: UserId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            is_admin: true,
        }
    }
}

/// The project currently in context, as resolved by the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectContext {
    pub id: ProjectId,
    pub display_name: String,
}

impl ProjectContext {
    pub fn new(id: ProjectId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }
}

/// Membership lookup the host provides for visibility checks
pub trait UserDirectory {
    /// Whether the user is a member of the project
    fn is_member(&self, user_id: &UserId, project_id: &ProjectId) -> bool;
}

/// Time source for `{datetime}` substitution, injected so expansion stays
/// deterministic under test
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to a single instant, for tests
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
