use serde::{Deserialize, Serialize};

use super::config::AwardRules;
use super::tenure::BandedMonths;
use crate::workflows::awards::domain::{Gender, ServiceRank};

/// Accumulated-versus-required months for one rank so a caller can render
/// "X of Y months".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankProgress {
    pub rank: ServiceRank,
    pub accumulated_months: u32,
    pub required_months: u32,
    pub satisfied: bool,
}

/// Cascading rollup: time in a higher band counts toward every lower rank,
/// never the other way. The ladder is ordered highest rank first, so the
/// first satisfied row is the answer.
pub(crate) fn decide_rank(
    totals: BandedMonths,
    gender: Gender,
    rules: &AwardRules,
) -> (Option<ServiceRank>, Vec<RankProgress>) {
    let required = rules.required_months_for(gender);

    let ladder = [
        (ServiceRank::First, totals.band09),
        (ServiceRank::Second, totals.band09 + totals.band08),
        (ServiceRank::Third, totals.band09 + totals.band08 + totals.band07),
    ];

    let progress: Vec<RankProgress> = ladder
        .iter()
        .map(|(rank, accumulated)| RankProgress {
            rank: *rank,
            accumulated_months: *accumulated,
            required_months: required,
            satisfied: *accumulated >= required,
        })
        .collect();

    let rank = progress
        .iter()
        .find(|entry| entry.satisfied)
        .map(|entry| entry.rank);

    (rank, progress)
}
