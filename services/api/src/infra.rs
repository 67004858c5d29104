use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use commendation::workflows::audit::{AccountDirectory, AuditLogEntry, AuditLogRepository};
use commendation::workflows::awards::{
    AccountId, AwardRules, Personnel, PersonnelId, PositionHistoryRecord,
    PositionHistoryRepository, RepositoryError, UnitAwardRecord, UnitAwardRepository, UnitId,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-memory roster standing in for the personnel database.
#[derive(Default)]
pub(crate) struct InMemoryRoster {
    members: Mutex<HashMap<PersonnelId, Personnel>>,
    records: Mutex<HashMap<PersonnelId, Vec<PositionHistoryRecord>>>,
}

impl InMemoryRoster {
    pub(crate) fn insert_member(&self, member: Personnel) {
        self.members
            .lock()
            .expect("member mutex poisoned")
            .insert(member.id.clone(), member);
    }

    pub(crate) fn insert_span(&self, record: PositionHistoryRecord) {
        self.records
            .lock()
            .expect("record mutex poisoned")
            .entry(record.personnel_id.clone())
            .or_default()
            .push(record);
    }
}

impl PositionHistoryRepository for InMemoryRoster {
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

/// In-memory unit award ledger.
#[derive(Default)]
pub(crate) struct InMemoryAwardLedger {
    records: Mutex<HashMap<UnitId, Vec<UnitAwardRecord>>>,
}

impl InMemoryAwardLedger {
    pub(crate) fn insert_award(&self, record: UnitAwardRecord) {
        self.records
            .lock()
            .expect("award mutex poisoned")
            .entry(record.unit_id.clone())
            .or_default()
            .push(record);
    }
}

impl UnitAwardRepository for InMemoryAwardLedger {
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

/// In-memory organizational tree mapping units to child units and accounts.
#[derive(Default)]
pub(crate) struct InMemoryDirectory {
    children: Mutex<HashMap<UnitId, Vec<UnitId>>>,
    accounts: Mutex<HashMap<UnitId, Vec<AccountId>>>,
}

impl InMemoryDirectory {
    pub(crate) fn attach_unit(&self, parent: &UnitId, child: UnitId) {
        self.children
            .lock()
            .expect("unit mutex poisoned")
            .entry(parent.clone())
            .or_default()
            .push(child);
    }

    pub(crate) fn attach_account(&self, unit: &UnitId, account: AccountId) {
        self.accounts
            .lock()
            .expect("account mutex poisoned")
            .entry(unit.clone())
            .or_default()
            .push(account);
    }
}

impl AccountDirectory for InMemoryDirectory {
    fn descendant_units(&self, unit: &UnitId) -> Result<Vec<UnitId>, RepositoryError> {
        let children = self.children.lock().expect("unit mutex poisoned");
        let mut found = Vec::new();
        let mut frontier = vec![unit.clone()];
        while let Some(current) = frontier.pop() {
            for child in children.get(&current).into_iter().flatten() {
                found.push(child.clone());
                frontier.push(child.clone());
            }
        }
        Ok(found)
    }

    fn accounts_in_units(&self, units: &[UnitId]) -> Result<Vec<AccountId>, RepositoryError> {
        let accounts = self.accounts.lock().expect("account mutex poisoned");
        Ok(units
            .iter()
            .flat_map(|unit| accounts.get(unit).cloned().unwrap_or_default())
            .collect())
    }
}

/// In-memory append-only audit trail.
#[derive(Default)]
pub(crate) struct InMemoryAuditTrail {
    events: Mutex<Vec<AuditLogEntry>>,
}

impl InMemoryAuditTrail {
    pub(crate) fn record(&self, entry: AuditLogEntry) {
        self.events
            .lock()
            .expect("audit mutex poisoned")
            .push(entry);
    }
}

impl AuditLogRepository for InMemoryAuditTrail {
    fn entries(&self) -> Result<Vec<AuditLogEntry>, RepositoryError> {
        Ok(self.events.lock().expect("audit mutex poisoned").clone())
    }
}

pub(crate) fn default_award_rules() -> AwardRules {
    AwardRules::default()
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
