//! Commendation workflows: service-time medal eligibility, unit citation
//! continuity, and proposal bundle assembly.

pub mod continuity;
pub mod domain;
pub mod eligibility;
pub mod proposal;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use continuity::{evaluate_unit_continuity, ContinuityOutcome, YearStanding};
pub use domain::{
    AccountId, CoefficientBand, Gender, Personnel, PersonnelId, PositionHistoryRecord,
    ServiceRank, UnitAwardRecord, UnitCitationTier, UnitId,
};
pub use eligibility::{
    months_between, AwardRules, EligibilityError, EligibilityOutcome, RankProgress,
    ServiceEligibilityEngine,
};
pub use proposal::{ProposalBundle, ProposalBundleAssembler, ProposalItem, ProposalItemResult};
pub use repository::{PositionHistoryRepository, RepositoryError, UnitAwardRepository};
pub use router::awards_router;
pub use service::{AwardsService, ServiceError};
