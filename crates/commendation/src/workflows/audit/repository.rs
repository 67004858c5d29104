use super::domain::AuditLogEntry;
use crate::workflows::awards::domain::{AccountId, UnitId};
use crate::workflows::awards::repository::RepositoryError;

/// Resolves organizational scope for manager-level visibility.
pub trait AccountDirectory: Send + Sync {
    /// Strict descendants of the given unit, to any depth. The unit itself
    /// is not included.
    fn descendant_units(&self, unit: &UnitId) -> Result<Vec<UnitId>, RepositoryError>;

    /// Accounts whose linked personnel belong to any of the given units.
    fn accounts_in_units(&self, units: &[UnitId]) -> Result<Vec<AccountId>, RepositoryError>;
}

/// Read access to the append-only audit trail.
pub trait AuditLogRepository: Send + Sync {
    fn entries(&self) -> Result<Vec<AuditLogEntry>, RepositoryError>;
}
