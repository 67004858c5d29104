use crate::infra::{
    default_award_rules, InMemoryAuditTrail, InMemoryAwardLedger, InMemoryDirectory,
    InMemoryRoster,
};
use chrono::{Local, Months, NaiveDate, TimeZone, Utc};
use clap::Args;
use std::sync::Arc;

use commendation::error::AppError;
use commendation::workflows::audit::{AuditLogEntry, AuditLogService, LogQuery, Role};
use commendation::workflows::awards::{
    AccountId, AwardsService, EligibilityError, EligibilityOutcome, Gender, Personnel,
    PersonnelId, PositionHistoryRecord, ProposalBundleAssembler, ProposalItem, ServiceError,
    ServiceRank, UnitAwardRecord, UnitCitationTier, UnitId,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Reference date for eligibility evaluation (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct EligibilityReportArgs {
    /// Member of the demo roster to evaluate (e.g. capt-le)
    #[arg(long)]
    pub(crate) personnel: String,
    /// Reference date for the evaluation (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct ContinuityReportArgs {
    /// Demo unit to evaluate (e.g. battalion-2)
    #[arg(long)]
    pub(crate) unit: String,
}

fn parse_gender(code: &str) -> Result<Gender, AppError> {
    Gender::from_code(code)
        .ok_or_else(|| ServiceError::from(EligibilityError::UnknownGender(code.to_string())).into())
}

fn span(id: &str, coefficient: f32, start: NaiveDate, months: u32) -> PositionHistoryRecord {
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

fn demo_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Populate the in-memory repositories with a small but representative
/// registry: three members at different standings, two nested units, and a
/// handful of audit entries.
pub(crate) fn seed_registry(
    roster: &InMemoryRoster,
    ledger: &InMemoryAwardLedger,
    directory: &InMemoryDirectory,
    trail: &InMemoryAuditTrail,
) -> Result<(), AppError> {
    let members: [(&str, &str, f32, NaiveDate, u32); 3] = [
        ("capt-le", "FEMALE", 0.95, demo_date(2017, 3, 1), 84),
        ("maj-tran", "MALE", 0.9, demo_date(2013, 9, 1), 90),
        ("lt-pham", "MALE", 0.85, demo_date(2019, 6, 1), 48),
    ];

    for (id, gender_code, coefficient, start, months) in members {
        roster.insert_member(Personnel {
            id: PersonnelId(id.to_string()),
            gender: parse_gender(gender_code)?,
            join_date: start,
            discharge_date: None,
        });
        roster.insert_span(span(id, coefficient, start, months));
    }
    // A second lower-band posting gives maj-tran a rollup past the base.
    roster.insert_span(span("maj-tran", 0.8, demo_date(2021, 3, 1), 40));

    for year in 2020..=2024 {
        ledger.insert_award(UnitAwardRecord {
            unit_id: UnitId("battalion-2".to_string()),
            year,
            title: Some("Unit Commendation".to_string()),
            continuous_years: 0,
        });
    }
    for year in 2022..=2024 {
        ledger.insert_award(UnitAwardRecord {
            unit_id: UnitId("company-21".to_string()),
            year,
            title: Some("Unit Commendation".to_string()),
            continuous_years: 0,
        });
    }

    let battalion = UnitId("battalion-2".to_string());
    let company = UnitId("company-21".to_string());
    directory.attach_unit(&battalion, company.clone());
    directory.attach_account(&battalion, AccountId("acc-20".to_string()));
    directory.attach_account(&company, AccountId("acc-21".to_string()));

    let audit_seed = [
        ("log-1", "acc-20", Role::User, "proposal.create"),
        ("log-2", "acc-21", Role::Manager, "proposal.approve"),
        ("log-3", "acc-90", Role::User, "proposal.create"),
        ("log-4", "acc-91", Role::Admin, "personnel.update"),
        ("log-5", "acc-99", Role::SuperAdmin, "account.configure"),
    ];
    for (id, actor, role, action) in audit_seed {
        trail.record(AuditLogEntry {
            id: id.to_string(),
            actor_id: AccountId(actor.to_string()),
            actor_role: role,
            action: action.to_string(),
            resource: "registry".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 5, 20, 8, 30, 0).unwrap(),
        });
    }

    Ok(())
}

struct DemoRegistry {
    awards: Arc<AwardsService<InMemoryRoster, InMemoryAwardLedger>>,
    audit: Arc<AuditLogService<InMemoryDirectory, InMemoryAuditTrail>>,
}

fn build_registry() -> Result<DemoRegistry, AppError> {
    let roster = Arc::new(InMemoryRoster::default());
    let ledger = Arc::new(InMemoryAwardLedger::default());
    let directory = Arc::new(InMemoryDirectory::default());
    let trail = Arc::new(InMemoryAuditTrail::default());

    seed_registry(&roster, &ledger, &directory, &trail)?;

    Ok(DemoRegistry {
        awards: Arc::new(AwardsService::new(roster, ledger, default_award_rules())),
        audit: Arc::new(AuditLogService::new(directory, trail)),
    })
}

fn print_eligibility(outcome: &EligibilityOutcome) {
    let verdict = outcome
        .rank
        .map(|rank| rank.label().to_string())
        .unwrap_or_else(|| "not yet eligible".to_string());
    println!("  {}: {}", outcome.personnel_id.0, verdict);
    for entry in &outcome.progress {
        println!(
            "    {:<12} {:>3} of {:>3} months{}",
            entry.rank.label(),
            entry.accumulated_months,
            entry.required_months,
            if entry.satisfied { "  [met]" } else { "" }
        );
    }
}

pub(crate) fn run_eligibility_report(args: EligibilityReportArgs) -> Result<(), AppError> {
    let registry = build_registry()?;
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());

    let outcome = registry
        .awards
        .service_eligibility_on(&PersonnelId(args.personnel), as_of)?;

    println!("Service-time eligibility as of {as_of}");
    print_eligibility(&outcome);
    Ok(())
}

pub(crate) fn run_continuity_report(args: ContinuityReportArgs) -> Result<(), AppError> {
    let registry = build_registry()?;

    let outcome = registry.awards.unit_continuity(&UnitId(args.unit))?;

    println!("Continuity standing for {}", outcome.unit_id.0);
    for standing in &outcome.ledger {
        println!(
            "  {}: {}{}",
            standing.year,
            standing.continuous_years,
            if standing.qualifying { "" } else { "  (no qualifying title)" }
        );
    }
    println!(
        "  current streak {}; commendable: {}; distinguished: {}",
        outcome.current_streak, outcome.commendable_eligible, outcome.distinguished_eligible
    );
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let registry = build_registry()?;
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());

    println!("Commendation registry demo (as of {as_of})");

    println!("\nService-time eligibility");
    for id in ["capt-le", "maj-tran", "lt-pham"] {
        let outcome = registry
            .awards
            .service_eligibility_on(&PersonnelId(id.to_string()), as_of)?;
        print_eligibility(&outcome);
    }

    println!("\nUnit continuity");
    for unit in ["battalion-2", "company-21"] {
        let outcome = registry.awards.unit_continuity(&UnitId(unit.to_string()))?;
        println!(
            "  {}: streak {}, commendable {}, distinguished {}",
            unit, outcome.current_streak, outcome.commendable_eligible,
            outcome.distinguished_eligible
        );
    }

    println!("\nProposal bundle");
    let assembler = ProposalBundleAssembler::new(registry.awards.clone());
    let bundle = assembler.assemble(
        &[
            ProposalItem::Personnel {
                id: PersonnelId("capt-le".to_string()),
                rank: ServiceRank::First,
            },
            ProposalItem::Personnel {
                id: PersonnelId("lt-pham".to_string()),
                rank: ServiceRank::Third,
            },
            ProposalItem::Unit {
                id: UnitId("battalion-2".to_string()),
                tier: UnitCitationTier::Distinguished,
            },
        ],
        as_of,
    )?;
    for item in &bundle.items {
        match &item.reason {
            Some(reason) => println!("  {}: rejected ({reason})", item.id),
            None => println!("  {}: accepted", item.id),
        }
    }
    println!("  submittable: {}", bundle.submittable);

    println!("\nAudit visibility");
    let battalion = UnitId("battalion-2".to_string());
    let manager_view = registry.audit.visible_entries(
        Role::Manager,
        Some(&battalion),
        None,
        &LogQuery::default(),
    )?;
    println!(
        "  manager of battalion-2 sees {} of 5 entries",
        manager_view.len()
    );

    let narrowed = registry.audit.visible_entries(
        Role::SuperAdmin,
        None,
        Some("MANAGER"),
        &LogQuery::default(),
    )?;
    println!(
        "  super admin narrowed to MANAGER sees {} entry(ies)",
        narrowed.len()
    );

    Ok(())
}
