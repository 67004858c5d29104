use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{Months, NaiveDate};

use crate::workflows::awards::domain::{
    Gender, Personnel, PersonnelId, PositionHistoryRecord, UnitAwardRecord, UnitId,
};
use crate::workflows::awards::eligibility::AwardRules;
use crate::workflows::awards::repository::{
    PositionHistoryRepository, RepositoryError, UnitAwardRepository,
};
use crate::workflows::awards::service::AwardsService;

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn today() -> NaiveDate {
    date(2025, 6, 30)
}

pub(super) fn rules() -> AwardRules {
    AwardRules {
        base_required_months: 120,
        female_service_factor: 2.0 / 3.0,
        commendable_streak_years: 3,
        distinguished_streak_years: 5,
    }
}

pub(super) fn member(id: &str, gender: Gender) -> Personnel {
    Personnel {
        id: PersonnelId(id.to_string()),
        gender,
        join_date: date(2010, 2, 1),
        discharge_date: None,
    }
}

/// Closed position interval with a stored month count.
pub(super) fn span(
    id: &str,
    coefficient: f32,
    start: NaiveDate,
    months: u32,
) -> PositionHistoryRecord {
    let end = start
        .checked_add_months(Months::new(months))
        .expect("valid end date");
    PositionHistoryRecord {
        personnel_id: PersonnelId(id.to_string()),
        coefficient,
        start_date: start,
        end_date: Some(end),
        months: Some(months),
    }
}

pub(super) fn award(
    unit: &str,
    year: i32,
    title: Option<&str>,
    continuous_years: u32,
) -> UnitAwardRecord {
    UnitAwardRecord {
        unit_id: UnitId(unit.to_string()),
        year,
        title: title.map(str::to_string),
        continuous_years,
    }
}

#[derive(Default)]
pub(super) struct MemoryHistory {
    members: Mutex<HashMap<PersonnelId, Personnel>>,
    records: Mutex<HashMap<PersonnelId, Vec<PositionHistoryRecord>>>,
}

impl MemoryHistory {
    pub(super) fn seed_member(&self, member: Personnel) {
        self.members
            .lock()
            .expect("member mutex poisoned")
            .insert(member.id.clone(), member);
    }

    pub(super) fn seed_span(&self, record: PositionHistoryRecord) {
        self.records
            .lock()
            .expect("record mutex poisoned")
            .entry(record.personnel_id.clone())
            .or_default()
            .push(record);
    }
}

impl PositionHistoryRepository for MemoryHistory {
    fn personnel(&self, id: &PersonnelId) -> Result<Option<Personnel>, RepositoryError> {
        Ok(self
            .members
            .lock()
            .expect("member mutex poisoned")
            .get(id)
            .cloned())
    }

    fn history_for(
        &self,
        id: &PersonnelId,
    ) -> Result<Vec<PositionHistoryRecord>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("record mutex poisoned")
            .get(id)
            .cloned()
            .unwrap_or_default())
    }
}

#[derive(Default)]
pub(super) struct MemoryAwards {
    records: Mutex<HashMap<UnitId, Vec<UnitAwardRecord>>>,
}

impl MemoryAwards {
    pub(super) fn seed_award(&self, record: UnitAwardRecord) {
        self.records
            .lock()
            .expect("award mutex poisoned")
            .entry(record.unit_id.clone())
            .or_default()
            .push(record);
    }
}

impl UnitAwardRepository for MemoryAwards {
    fn awards_for(&self, unit: &UnitId) -> Result<Vec<UnitAwardRecord>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("award mutex poisoned")
            .get(unit)
            .cloned()
            .unwrap_or_default())
    }
}

/// History repository that always fails, for propagation tests.
pub(super) struct UnavailableHistory;

impl PositionHistoryRepository for UnavailableHistory {
    fn personnel(&self, _id: &PersonnelId) -> Result<Option<Personnel>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn history_for(
        &self,
        _id: &PersonnelId,
    ) -> Result<Vec<PositionHistoryRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    AwardsService<MemoryHistory, MemoryAwards>,
    Arc<MemoryHistory>,
    Arc<MemoryAwards>,
) {
    let history = Arc::new(MemoryHistory::default());
    let awards = Arc::new(MemoryAwards::default());
    let service = AwardsService::new(history.clone(), awards.clone(), rules());
    (service, history, awards)
}
