use serde::{Deserialize, Serialize};

use crate::workflows::awards::domain::Gender;

/// Regulation thresholds driving both evaluators. Kept in one place so a
/// threshold change never touches evaluator logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwardRules {
    /// Qualifying months required of male personnel for any rank.
    pub base_required_months: u32,
    /// Multiplier applied to the base for female personnel, modeling the
    /// shorter mandated service period.
    pub female_service_factor: f32,
    pub commendable_streak_years: u32,
    pub distinguished_streak_years: u32,
}

impl AwardRules {
    /// Months required for the given member, rounded to the nearest whole
    /// month.
    pub fn required_months_for(&self, gender: Gender) -> u32 {
        match gender {
            Gender::Male => self.base_required_months,
            Gender::Female => {
                (self.base_required_months as f32 * self.female_service_factor).round() as u32
            }
        }
    }
}

impl Default for AwardRules {
    fn default() -> Self {
        Self {
            base_required_months: 120,
            female_service_factor: 2.0 / 3.0,
            commendable_streak_years: 3,
            distinguished_streak_years: 5,
        }
    }
}
