//! Audit-log visibility scoped by the actor's role hierarchy. Entries are
//! append-only upstream; this module only decides who may read what.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod visibility;


pub use domain::{AuditLogEntry, LogQuery, Role};
pub use repository::{AccountDirectory, AuditLogRepository};
pub use router::audit_router;
pub use service::AuditLogService;
pub use visibility::{compute_log_visibility, visible_roles, LogVisibility, VisibilityError};
