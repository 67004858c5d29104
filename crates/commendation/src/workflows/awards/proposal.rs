use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{PersonnelId, ServiceRank, UnitCitationTier, UnitId};
use super::repository::{PositionHistoryRepository, RepositoryError, UnitAwardRepository};
use super::service::{AwardsService, ServiceError};

/// One nomination line in a submitted bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProposalItem {
    Personnel { id: PersonnelId, rank: ServiceRank },
    Unit { id: UnitId, tier: UnitCitationTier },
}

impl ProposalItem {
    fn target_id(&self) -> &str {
        match self {
            ProposalItem::Personnel { id, .. } => &id.0,
            ProposalItem::Unit { id, .. } => &id.0,
        }
    }
}

/// Per-item verdict. Failing items are rejected with a reason, never
/// silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalItemResult {
    pub id: String,
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalBundle {
    pub items: Vec<ProposalItemResult>,
    pub submittable: bool,
}

/// Glue layer pre-validating caller-selected targets through both
/// evaluators. This is the only place the two evaluators compose.
pub struct ProposalBundleAssembler<H, U> {
    awards: Arc<AwardsService<H, U>>,
}

impl<H, U> ProposalBundleAssembler<H, U>
where
    H: PositionHistoryRepository + 'static,
    U: UnitAwardRepository + 'static,
{
    pub fn new(awards: Arc<AwardsService<H, U>>) -> Self {
        Self { awards }
    }

    pub fn assemble(
        &self,
        items: &[ProposalItem],
        today: NaiveDate,
    ) -> Result<ProposalBundle, ServiceError> {
        let results = items
            .iter()
            .map(|item| self.validate(item, today))
            .collect::<Result<Vec<_>, _>>()?;

        let submittable = !results.is_empty() && results.iter().all(|item| item.accepted);

        Ok(ProposalBundle {
            items: results,
            submittable,
        })
    }

    fn validate(
        &self,
        item: &ProposalItem,
        today: NaiveDate,
    ) -> Result<ProposalItemResult, ServiceError> {
        match item {
            ProposalItem::Personnel { id, rank } => {
                match self.awards.service_eligibility_on(id, today) {
                    Ok(outcome) => Ok(match outcome.progress_for(*rank) {
                        Some(entry) if entry.satisfied => accepted(item),
                        Some(entry) => rejected(
                            item,
                            format!(
                                "{} of {} qualifying months accrued for {}",
                                entry.accumulated_months,
                                entry.required_months,
                                rank.label()
                            ),
                        ),
                        None => rejected(item, format!("rank {} not assessed", rank.label())),
                    }),
                    Err(ServiceError::Repository(RepositoryError::NotFound)) => {
                        Ok(rejected(item, "no personnel record on file".to_string()))
                    }
                    Err(other) => Err(other),
                }
            }
            ProposalItem::Unit { id, tier } => {
                let outcome = self.awards.unit_continuity(id)?;
                let required = match tier {
                    UnitCitationTier::Commendable => self.awards.rules().commendable_streak_years,
                    UnitCitationTier::Distinguished => {
                        self.awards.rules().distinguished_streak_years
                    }
                };

                Ok(if outcome.eligible_for(*tier) {
                    accepted(item)
                } else {
                    rejected(
                        item,
                        format!(
                            "streak of {} consecutive years, {} required for {}",
                            outcome.current_streak,
                            required,
                            tier.label()
                        ),
                    )
                })
            }
        }
    }
}

fn accepted(item: &ProposalItem) -> ProposalItemResult {
    ProposalItemResult {
        id: item.target_id().to_string(),
        accepted: true,
        reason: None,
    }
}

fn rejected(item: &ProposalItem, reason: String) -> ProposalItemResult {
    ProposalItemResult {
        id: item.target_id().to_string(),
        accepted: false,
        reason: Some(reason),
    }
}
