use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use super::continuity::{evaluate_unit_continuity, ContinuityOutcome};
use super::domain::{PersonnelId, UnitId};
use super::eligibility::{
    AwardRules, EligibilityError, EligibilityOutcome, ServiceEligibilityEngine,
};
use super::repository::{PositionHistoryRepository, RepositoryError, UnitAwardRepository};

/// Service composing the injected repositories with the two evaluators.
pub struct AwardsService<H, U> {
    history: Arc<H>,
    awards: Arc<U>,
    engine: ServiceEligibilityEngine,
}

impl<H, U> AwardsService<H, U>
where
    H: PositionHistoryRepository + 'static,
    U: UnitAwardRepository + 'static,
{
    pub fn new(history: Arc<H>, awards: Arc<U>, rules: AwardRules) -> Self {
        Self {
            history,
            awards,
            engine: ServiceEligibilityEngine::new(rules),
        }
    }

    pub fn rules(&self) -> &AwardRules {
        self.engine.rules()
    }

    /// Evaluate a member's medal eligibility against today's date.
    pub fn service_eligibility(
        &self,
        id: &PersonnelId,
    ) -> Result<EligibilityOutcome, ServiceError> {
        self.service_eligibility_on(id, Utc::now().date_naive())
    }

    /// Evaluate with an explicit reference date (reports, replays, tests).
    pub fn service_eligibility_on(
        &self,
        id: &PersonnelId,
        today: NaiveDate,
    ) -> Result<EligibilityOutcome, ServiceError> {
        let member = self
            .history
            .personnel(id)?
            .ok_or(RepositoryError::NotFound)?;
        let history = self.history.history_for(id)?;
        Ok(self.engine.evaluate(id, member.gender, &history, today)?)
    }

    /// Recompute a unit's consecutive-year standing and citation gates.
    pub fn unit_continuity(&self, unit: &UnitId) -> Result<ContinuityOutcome, ServiceError> {
        let records = self.awards.awards_for(unit)?;
        Ok(evaluate_unit_continuity(unit, &records, self.engine.rules()))
    }
}

/// Error raised by the awards service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Eligibility(#[from] EligibilityError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
