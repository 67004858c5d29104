use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for service members tracked in the registry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersonnelId(pub String);

/// Identifier wrapper for organizational units.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitId(pub String);

/// Identifier wrapper for login accounts linked to personnel.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(pub String);

/// Gender drives the reduced service-time requirement; it is always an
/// explicit input, never defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Parse the code stored by upstream systems. Unknown codes are the
    /// caller's problem to surface; there is no fallback value.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "MALE" => Some(Self::Male),
            "FEMALE" => Some(Self::Female),
            _ => None,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
        }
    }
}

/// A service member as the career timeline sees them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Personnel {
    pub id: PersonnelId,
    pub gender: Gender,
    pub join_date: NaiveDate,
    pub discharge_date: Option<NaiveDate>,
}

/// One interval of a member's career. `end_date = None` means the position
/// is still held; `months = None` means the span must be derived from the
/// dates at evaluation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionHistoryRecord {
    pub personnel_id: PersonnelId,
    pub coefficient: f32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub months: Option<u32>,
}

/// One row per unit per year. `continuous_years` is materialized by the
/// upstream writer; the evaluator recomputes it and treats the stored value
/// as advisory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitAwardRecord {
    pub unit_id: UnitId,
    pub year: i32,
    pub title: Option<String>,
    pub continuous_years: u32,
}

/// Weight band for the position held during an interval. Coefficients
/// outside `[0.7, 1.0]` carry no band and contribute nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoefficientBand {
    Band07,
    Band08,
    Band09To10,
}

impl CoefficientBand {
    pub fn classify(coefficient: f32) -> Option<Self> {
        if !coefficient.is_finite() {
            return None;
        }
        if (0.7..0.8).contains(&coefficient) {
            Some(Self::Band07)
        } else if (0.8..0.9).contains(&coefficient) {
            Some(Self::Band08)
        } else if (0.9..=1.0).contains(&coefficient) {
            Some(Self::Band09To10)
        } else {
            None
        }
    }
}

/// Ranks of the long-service medal family, highest requirement first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceRank {
    First,
    Second,
    Third,
}

impl ServiceRank {
    pub const fn label(self) -> &'static str {
        match self {
            ServiceRank::First => "first_class",
            ServiceRank::Second => "second_class",
            ServiceRank::Third => "third_class",
        }
    }
}

/// Unit citation tiers gated by the consecutive-year streak. The two gates
/// are independent; a caller never infers one from the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitCitationTier {
    Commendable,
    Distinguished,
}

impl UnitCitationTier {
    pub const fn label(self) -> &'static str {
        match self {
            UnitCitationTier::Commendable => "commendable",
            UnitCitationTier::Distinguished => "distinguished",
        }
    }
}
