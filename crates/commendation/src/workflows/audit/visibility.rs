use std::collections::BTreeSet;

use tracing::warn;

use super::domain::{AuditLogEntry, Role};
use super::repository::AccountDirectory;
use crate::workflows::awards::domain::{AccountId, UnitId};
use crate::workflows::awards::repository::RepositoryError;

/// Access violations surfaced to the caller as hard rejections.
#[derive(Debug, thiserror::Error)]
pub enum VisibilityError {
    #[error("role has no audit log access")]
    Forbidden,
    #[error("manager visibility requires an organizational unit scope")]
    MissingUnitScope,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Roles whose entries an actor may see: own level and below.
pub fn visible_roles(actor: Role) -> BTreeSet<Role> {
    Role::ALL
        .iter()
        .copied()
        .filter(|candidate| candidate.level() <= actor.level())
        .collect()
}

/// Base predicate every audit query starts from. `account_filter = None`
/// means no account scoping; `Some(empty)` matches nothing, which is the
/// required shape for a manager whose unit has no accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogVisibility {
    pub allowed_roles: BTreeSet<Role>,
    pub account_filter: Option<BTreeSet<AccountId>>,
}

impl LogVisibility {
    pub fn matches(&self, entry: &AuditLogEntry) -> bool {
        if !self.allowed_roles.contains(&entry.actor_role) {
            return false;
        }
        match &self.account_filter {
            Some(accounts) => accounts.contains(&entry.actor_id),
            None => true,
        }
    }
}

/// Compute what the actor may see. Managers are additionally scoped to the
/// accounts of their own unit and its descendants; that scope clause is
/// never dropped, even when it matches nothing.
pub fn compute_log_visibility(
    actor_role: Role,
    actor_unit: Option<&UnitId>,
    requested_role_filter: Option<&str>,
    directory: &dyn AccountDirectory,
) -> Result<LogVisibility, VisibilityError> {
    if actor_role == Role::User {
        return Err(VisibilityError::Forbidden);
    }

    let mut allowed_roles = visible_roles(actor_role);

    // Narrowing to a single role is a super-admin affordance; an unknown
    // code is ignored rather than widening or aborting the query.
    if actor_role == Role::SuperAdmin {
        if let Some(code) = requested_role_filter {
            match Role::from_code(code) {
                Some(role) => {
                    allowed_roles = BTreeSet::from([role]);
                }
                None => warn!(filter = code, "unknown role filter ignored"),
            }
        }
    }

    let account_filter = if actor_role == Role::Manager {
        let unit = actor_unit.ok_or(VisibilityError::MissingUnitScope)?;
        let mut units = directory.descendant_units(unit)?;
        units.push(unit.clone());
        let accounts = directory.accounts_in_units(&units)?;
        Some(accounts.into_iter().collect::<BTreeSet<_>>())
    } else {
        None
    };

    Ok(LogVisibility {
        allowed_roles,
        account_filter,
    })
}
