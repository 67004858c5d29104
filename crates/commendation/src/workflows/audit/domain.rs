use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::awards::domain::AccountId;

/// Actor roles ordered by privilege level; the derived ordering follows
/// declaration order, so comparisons agree with `level()`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Manager,
    Admin,
    SuperAdmin,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::User, Role::Manager, Role::Admin, Role::SuperAdmin];

    pub const fn level(self) -> u8 {
        match self {
            Role::User => 1,
            Role::Manager => 2,
            Role::Admin => 3,
            Role::SuperAdmin => 4,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Manager => "MANAGER",
            Role::Admin => "ADMIN",
            Role::SuperAdmin => "SUPER_ADMIN",
        }
    }

    /// Parse a role code supplied by an upstream filter parameter. Unknown
    /// codes yield `None`; what that means is the caller's policy.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "USER" => Some(Role::User),
            "MANAGER" => Some(Role::Manager),
            "ADMIN" => Some(Role::Admin),
            "SUPER_ADMIN" => Some(Role::SuperAdmin),
            _ => None,
        }
    }
}

/// Append-only audit trail row. This subsystem never mutates or deletes
/// entries; it only decides who may read them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: String,
    pub actor_id: AccountId,
    pub actor_role: Role,
    pub action: String,
    pub resource: String,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied filters composed on top of the visibility predicate by
/// logical AND. Visibility is always applied first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogQuery {
    pub action: Option<String>,
    pub resource: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    pub text: Option<String>,
}

impl LogQuery {
    pub fn matches(&self, entry: &AuditLogEntry) -> bool {
        if let Some(action) = &self.action {
            if !entry.action.eq_ignore_ascii_case(action) {
                return false;
            }
        }
        if let Some(resource) = &self.resource {
            if !entry.resource.eq_ignore_ascii_case(resource) {
                return false;
            }
        }
        if let Some(from) = self.from {
            if entry.created_at < from {
                return false;
            }
        }
        if let Some(until) = self.until {
            if entry.created_at > until {
                return false;
            }
        }
        if let Some(text) = &self.text {
            let needle = text.to_lowercase();
            let haystacks = [&entry.action, &entry.resource, &entry.actor_id.0];
            if !haystacks
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
            {
                return false;
            }
        }
        true
    }
}
