use std::sync::Arc;

use super::domain::{AuditLogEntry, LogQuery, Role};
use super::repository::{AccountDirectory, AuditLogRepository};
use super::visibility::{compute_log_visibility, LogVisibility, VisibilityError};
use crate::workflows::awards::domain::UnitId;

/// Read-side service resolving what an actor may see before any other
/// filter runs.
pub struct AuditLogService<D, L> {
    directory: Arc<D>,
    logs: Arc<L>,
}

impl<D, L> AuditLogService<D, L>
where
    D: AccountDirectory + 'static,
    L: AuditLogRepository + 'static,
{
    pub fn new(directory: Arc<D>, logs: Arc<L>) -> Self {
        Self { directory, logs }
    }

    pub fn visibility_for(
        &self,
        actor_role: Role,
        actor_unit: Option<&UnitId>,
        role_filter: Option<&str>,
    ) -> Result<LogVisibility, VisibilityError> {
        compute_log_visibility(actor_role, actor_unit, role_filter, self.directory.as_ref())
    }

    /// Visibility first, then the caller's query composes by AND.
    pub fn visible_entries(
        &self,
        actor_role: Role,
        actor_unit: Option<&UnitId>,
        role_filter: Option<&str>,
        query: &LogQuery,
    ) -> Result<Vec<AuditLogEntry>, VisibilityError> {
        let visibility = self.visibility_for(actor_role, actor_unit, role_filter)?;
        let entries = self.logs.entries()?;

        Ok(entries
            .into_iter()
            .filter(|entry| visibility.matches(entry) && query.matches(entry))
            .collect())
    }
}
