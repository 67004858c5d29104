use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{UnitAwardRecord, UnitCitationTier, UnitId};
use super::eligibility::AwardRules;

/// Recomputed standing for a single award year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearStanding {
    pub year: i32,
    pub qualifying: bool,
    pub continuous_years: u32,
}

/// Continuity verdict for one unit's award history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinuityOutcome {
    pub unit_id: UnitId,
    pub current_streak: u32,
    pub commendable_eligible: bool,
    pub distinguished_eligible: bool,
    pub ledger: Vec<YearStanding>,
}

impl ContinuityOutcome {
    pub fn eligible_for(&self, tier: UnitCitationTier) -> bool {
        match tier {
            UnitCitationTier::Commendable => self.commendable_eligible,
            UnitCitationTier::Distinguished => self.distinguished_eligible,
        }
    }
}

fn qualifying(record: &UnitAwardRecord) -> bool {
    record
        .title
        .as_deref()
        .map(|title| !title.trim().is_empty())
        .unwrap_or(false)
}

/// Walk a unit's award history year by year and recompute the consecutive
/// qualifying streak. A missing year resets the counter exactly like a year
/// without a qualifying title. Inputs are never mutated; the recomputed
/// ledger is the authoritative result and the stored `continuous_years`
/// field is advisory only.
pub fn evaluate_unit_continuity(
    unit_id: &UnitId,
    history: &[UnitAwardRecord],
    rules: &AwardRules,
) -> ContinuityOutcome {
    let mut records: Vec<&UnitAwardRecord> = history.iter().collect();
    records.sort_by_key(|record| record.year);

    // Uniqueness on (unit, year) belongs to the storage layer; when a
    // duplicate slips through anyway, the later row wins.
    let mut deduped: Vec<&UnitAwardRecord> = Vec::with_capacity(records.len());
    for record in records {
        match deduped.last_mut() {
            Some(last) if last.year == record.year => {
                warn!(
                    unit = %unit_id.0,
                    year = record.year,
                    "duplicate award rows for one year; later row wins"
                );
                *last = record;
            }
            _ => deduped.push(record),
        }
    }

    let mut ledger: Vec<YearStanding> = Vec::with_capacity(deduped.len());
    let mut streak = 0u32;
    let mut previous_year: Option<i32> = None;

    for record in deduped {
        if let Some(prev) = previous_year {
            if record.year > prev + 1 {
                warn!(
                    unit = %unit_id.0,
                    after = prev,
                    next = record.year,
                    "gap in award history treated as non-qualifying years"
                );
                streak = 0;
            }
        }

        let qualifies = qualifying(record);
        streak = if qualifies { streak + 1 } else { 0 };

        if record.continuous_years != streak {
            warn!(
                unit = %unit_id.0,
                year = record.year,
                stored = record.continuous_years,
                recomputed = streak,
                "stored continuous_years disagrees with recomputation"
            );
        }

        ledger.push(YearStanding {
            year: record.year,
            qualifying: qualifies,
            continuous_years: streak,
        });
        previous_year = Some(record.year);
    }

    let current_streak = ledger
        .last()
        .map(|standing| standing.continuous_years)
        .unwrap_or(0);

    ContinuityOutcome {
        unit_id: unit_id.clone(),
        current_streak,
        commendable_eligible: current_streak >= rules.commendable_streak_years,
        distinguished_eligible: current_streak >= rules.distinguished_streak_years,
        ledger,
    }
}
