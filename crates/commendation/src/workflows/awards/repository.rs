use super::domain::{Personnel, PersonnelId, PositionHistoryRecord, UnitAwardRecord, UnitId};

/// Storage abstraction for career timelines so the evaluators can be
/// exercised against in-memory fixtures.
pub trait PositionHistoryRepository: Send + Sync {
    fn personnel(&self, id: &PersonnelId) -> Result<Option<Personnel>, RepositoryError>;
    fn history_for(&self, id: &PersonnelId) -> Result<Vec<PositionHistoryRecord>, RepositoryError>;
}

/// Storage abstraction for unit award history. Order of the returned rows
/// is unspecified; the evaluator sorts internally.
pub trait UnitAwardRepository: Send + Sync {
    fn awards_for(&self, unit: &UnitId) -> Result<Vec<UnitAwardRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
