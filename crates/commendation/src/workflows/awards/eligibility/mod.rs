mod config;
mod policy;
pub(crate) mod tenure;

pub use config::AwardRules;
pub use policy::RankProgress;
pub use tenure::months_between;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{Gender, PersonnelId, PositionHistoryRecord, ServiceRank};

/// Input problems that surface to the caller instead of degrading the
/// answer silently.
#[derive(Debug, thiserror::Error)]
pub enum EligibilityError {
    #[error("position interval ends {end} before it starts {start}")]
    InvalidInterval { start: NaiveDate, end: NaiveDate },
    #[error("unrecognized gender code '{0}'")]
    UnknownGender(String),
}

/// Stateless evaluator applying the service-time rules to one member's
/// position history.
pub struct ServiceEligibilityEngine {
    rules: AwardRules,
}

impl ServiceEligibilityEngine {
    pub fn new(rules: AwardRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &AwardRules {
        &self.rules
    }

    /// `today` closes open-ended intervals; it is a parameter so the engine
    /// stays pure and replayable.
    pub fn evaluate(
        &self,
        personnel_id: &PersonnelId,
        gender: Gender,
        history: &[PositionHistoryRecord],
        today: NaiveDate,
    ) -> Result<EligibilityOutcome, EligibilityError> {
        let totals = tenure::accumulate(history, today)?;
        let (rank, progress) = policy::decide_rank(totals, gender, &self.rules);

        Ok(EligibilityOutcome {
            personnel_id: personnel_id.clone(),
            rank,
            progress,
        })
    }
}

/// Evaluation output: the highest satisfied rank plus the full progress
/// ladder for UI guidance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityOutcome {
    pub personnel_id: PersonnelId,
    pub rank: Option<ServiceRank>,
    pub progress: Vec<RankProgress>,
}

impl EligibilityOutcome {
    pub fn progress_for(&self, rank: ServiceRank) -> Option<&RankProgress> {
        self.progress.iter().find(|entry| entry.rank == rank)
    }
}
