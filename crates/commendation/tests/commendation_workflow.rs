//! Integration scenarios for the commendation evaluation and audit
//! visibility workflows, driven through the public service facades and the
//! HTTP routers so behavior is validated without reaching into private
//! modules.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use chrono::{Months, NaiveDate, TimeZone, Utc};

    use commendation::workflows::audit::{
        AccountDirectory, AuditLogEntry, AuditLogRepository, AuditLogService, Role,
    };
    use commendation::workflows::awards::{
        AccountId, AwardRules, AwardsService, Gender, Personnel, PersonnelId,
        PositionHistoryRecord, PositionHistoryRepository, RepositoryError, UnitAwardRecord,
        UnitAwardRepository, UnitId,
    };

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

    #[derive(Default)]
    pub(super) struct MemoryHistory {
        members: Mutex<HashMap<PersonnelId, Personnel>>,
        records: Mutex<HashMap<PersonnelId, Vec<PositionHistoryRecord>>>,
    }

    impl MemoryHistory {
        pub(super) fn seed(&self, member: Personnel, spans: Vec<PositionHistoryRecord>) {
            self.members
                .lock()
                .expect("member mutex poisoned")
                .insert(member.id.clone(), member);
            for span in spans {
                self.records
                    .lock()
                    .expect("record mutex poisoned")
                    .entry(span.personnel_id.clone())
                    .or_default()
                    .push(span);
            }
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
        pub(super) fn seed(&self, record: UnitAwardRecord) {
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

    #[derive(Default)]
    pub(super) struct MemoryDirectory {
        pub(super) children: HashMap<UnitId, Vec<UnitId>>,
        pub(super) accounts: HashMap<UnitId, Vec<AccountId>>,
    }

    impl AccountDirectory for MemoryDirectory {
        fn descendant_units(&self, unit: &UnitId) -> Result<Vec<UnitId>, RepositoryError> {
            let mut found = Vec::new();
            let mut frontier = vec![unit.clone()];
            while let Some(current) = frontier.pop() {
                for child in self.children.get(&current).into_iter().flatten() {
                    found.push(child.clone());
                    frontier.push(child.clone());
                }
            }
            Ok(found)
        }

        fn accounts_in_units(
            &self,
            units: &[UnitId],
        ) -> Result<Vec<AccountId>, RepositoryError> {
            Ok(units
                .iter()
                .flat_map(|unit| self.accounts.get(unit).cloned().unwrap_or_default())
                .collect())
        }
    }

    pub(super) struct MemoryLogs(pub(super) Vec<AuditLogEntry>);

    impl AuditLogRepository for MemoryLogs {
        fn entries(&self) -> Result<Vec<AuditLogEntry>, RepositoryError> {
            Ok(self.0.clone())
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

    pub(super) fn award(unit: &str, year: i32, title: Option<&str>) -> UnitAwardRecord {
        UnitAwardRecord {
            unit_id: UnitId(unit.to_string()),
            year,
            title: title.map(str::to_string),
            continuous_years: 0,
        }
    }

    pub(super) fn log_entry(id: &str, actor: &str, role: Role, action: &str) -> AuditLogEntry {
        AuditLogEntry {
            id: id.to_string(),
            actor_id: AccountId(actor.to_string()),
            actor_role: role,
            action: action.to_string(),
            resource: "proposal".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 5, 20, 8, 30, 0).unwrap(),
        }
    }

    pub(super) fn build_awards_service(
    ) -> (Arc<AwardsService<MemoryHistory, MemoryAwards>>, Arc<MemoryHistory>, Arc<MemoryAwards>)
    {
        let history = Arc::new(MemoryHistory::default());
        let awards = Arc::new(MemoryAwards::default());
        let service = Arc::new(AwardsService::new(history.clone(), awards.clone(), rules()));
        (service, history, awards)
    }

    pub(super) fn build_audit_service() -> Arc<AuditLogService<MemoryDirectory, MemoryLogs>> {
        let mut directory = MemoryDirectory::default();
        directory
            .children
            .insert(UnitId("battalion-2".to_string()), vec![UnitId("company-21".to_string())]);
        directory.accounts.insert(
            UnitId("battalion-2".to_string()),
            vec![AccountId("acc-20".to_string())],
        );
        directory.accounts.insert(
            UnitId("company-21".to_string()),
            vec![AccountId("acc-21".to_string())],
        );

        let logs = MemoryLogs(vec![
            log_entry("log-1", "acc-20", Role::User, "create"),
            log_entry("log-2", "acc-21", Role::Manager, "approve"),
            log_entry("log-3", "acc-90", Role::User, "create"),
            log_entry("log-4", "acc-91", Role::Admin, "delete"),
        ]);

        Arc::new(AuditLogService::new(Arc::new(directory), Arc::new(logs)))
    }
}

mod awards {
    use super::common::*;
    use commendation::workflows::awards::{
        Gender, PersonnelId, ProposalBundleAssembler, ProposalItem, ServiceRank,
        UnitCitationTier, UnitId,
    };

    #[test]
    fn service_time_and_continuity_feed_one_proposal_bundle() {
        let (service, history, awards) = build_awards_service();
        history.seed(
            member("maj-1", Gender::Female),
            vec![span("maj-1", 0.95, date(2017, 3, 1), 82)],
        );
        for year in 2020..=2024 {
            awards.seed(award("battalion-2", year, Some("Unit Commendation")));
        }

        let assembler = ProposalBundleAssembler::new(service);
        let bundle = assembler
            .assemble(
                &[
                    ProposalItem::Personnel {
                        id: PersonnelId("maj-1".to_string()),
                        rank: ServiceRank::First,
                    },
                    ProposalItem::Unit {
                        id: UnitId("battalion-2".to_string()),
                        tier: UnitCitationTier::Distinguished,
                    },
                ],
                today(),
            )
            .expect("bundle assembles");

        assert!(bundle.submittable);
        assert!(bundle.items.iter().all(|item| item.accepted));
    }

    #[test]
    fn a_single_failing_item_blocks_submission_with_a_reason() {
        let (service, history, awards) = build_awards_service();
        history.seed(
            member("maj-1", Gender::Female),
            vec![span("maj-1", 0.95, date(2017, 3, 1), 82)],
        );
        awards.seed(award("battalion-2", 2024, Some("Unit Commendation")));

        let assembler = ProposalBundleAssembler::new(service);
        let bundle = assembler
            .assemble(
                &[
                    ProposalItem::Personnel {
                        id: PersonnelId("maj-1".to_string()),
                        rank: ServiceRank::First,
                    },
                    ProposalItem::Unit {
                        id: UnitId("battalion-2".to_string()),
                        tier: UnitCitationTier::Commendable,
                    },
                ],
                today(),
            )
            .expect("bundle assembles");

        assert!(!bundle.submittable);
        assert!(bundle.items[0].accepted);
        assert!(!bundle.items[1].accepted);
        assert!(bundle.items[1].reason.is_some());
    }
}

mod routing {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use commendation::workflows::audit::audit_router;
    use commendation::workflows::awards::{awards_router, Gender};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn read_json_body(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    fn app() -> axum::Router {
        let (service, history, awards) = build_awards_service();
        history.seed(
            member("maj-1", Gender::Female),
            vec![span("maj-1", 0.95, date(2017, 3, 1), 82)],
        );
        for year in 2022..=2024 {
            awards.seed(award("battalion-2", year, Some("Unit Commendation")));
        }

        awards_router(service).merge(audit_router(build_audit_service()))
    }

    #[tokio::test]
    async fn eligibility_endpoint_applies_the_gender_adjusted_threshold() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/awards/personnel/maj-1/eligibility?as_of=2025-06-30")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload.get("rank"), Some(&json!("first")));
        let first = payload
            .get("progress")
            .and_then(Value::as_array)
            .and_then(|ladder| ladder.first())
            .cloned()
            .expect("top rank progress");
        assert_eq!(first.get("required_months"), Some(&json!(80)));
    }

    #[tokio::test]
    async fn continuity_endpoint_reports_the_recomputed_streak() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/awards/units/battalion-2/continuity")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload.get("current_streak"), Some(&json!(3)));
        assert_eq!(payload.get("commendable_eligible"), Some(&json!(true)));
        assert_eq!(payload.get("distinguished_eligible"), Some(&json!(false)));
    }

    #[tokio::test]
    async fn audit_search_scopes_managers_to_their_unit_subtree() {
        let body = json!({
            "actor_role": "MANAGER",
            "actor_unit": "battalion-2",
            "query": {}
        });

        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/audit/logs/search")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        let entries = payload.as_array().expect("entry list");
        assert_eq!(entries.len(), 2);
        for entry in entries {
            let actor = entry.get("actor_id").and_then(Value::as_str).unwrap_or("");
            assert!(actor == "acc-20" || actor == "acc-21");
        }
    }

    #[tokio::test]
    async fn audit_search_rejects_user_actors() {
        let body = json!({
            "actor_role": "USER",
            "query": {}
        });

        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/audit/logs/search")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
