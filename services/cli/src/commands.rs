use crate::infra::{load_snapshot, load_store, parse_date, parse_instant, write_snapshot};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use clap::{Args, ValueEnum};
use regtrack::config::AppConfig;
use regtrack::error::AppError;
use regtrack::export::format::locale_date;
use regtrack::export::{verified_only, DateRange, ExportScope, ReportExporter, ReportKind};
use regtrack::registrations::{
    aggregate, expires_at, ApprovalWorkflow, ClassifiedRegistration, Decision, ExpiryMonitor,
    FixedClock, Registration, RegistrationId, RegistrationQuery, RegistrationStatus, StatusTally,
    StoreError,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct SnapshotArgs {
    /// JSON snapshot of the registrations table
    #[arg(long, short = 'i')]
    pub(crate) input: PathBuf,
    /// Evaluate as of this instant (RFC 3339). Defaults to now.
    #[arg(long, value_parser = parse_instant)]
    pub(crate) now: Option<DateTime<Utc>>,
}

impl SnapshotArgs {
    fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }
}

#[derive(Args, Debug)]
pub(crate) struct AlertsArgs {
    #[command(flatten)]
    pub(crate) snapshot: SnapshotArgs,
    /// Emit the alert sets as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct SummaryArgs {
    /// JSON snapshot of the registrations table
    #[arg(long, short = 'i')]
    pub(crate) input: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum StatusArg {
    All,
    Pending,
    Approved,
    Rejected,
}

impl StatusArg {
    fn status(self) -> Option<RegistrationStatus> {
        match self {
            StatusArg::All => None,
            StatusArg::Pending => Some(RegistrationStatus::Pending),
            StatusArg::Approved => Some(RegistrationStatus::Approved),
            StatusArg::Rejected => Some(RegistrationStatus::Rejected),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ListArgs {
    /// JSON snapshot of the registrations table
    #[arg(long, short = 'i')]
    pub(crate) input: PathBuf,
    /// Case-insensitive match on name, mobile number, or customer id
    #[arg(long)]
    pub(crate) search: Option<String>,
    #[arg(long, value_enum, default_value_t = StatusArg::All)]
    pub(crate) status: StatusArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum KindArg {
    Registrations,
    Verified,
}

impl From<KindArg> for ReportKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Registrations => ReportKind::Registrations,
            KindArg::Verified => ReportKind::VerifiedRegistrations,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum FormatArg {
    /// Spreadsheet (CSV)
    Sheet,
    /// Tabular PDF report
    Pdf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ScopeArg {
    All,
    Pending,
    Expiring,
    Expired,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    #[command(flatten)]
    pub(crate) snapshot: SnapshotArgs,
    #[arg(long, value_enum, default_value_t = KindArg::Registrations)]
    pub(crate) kind: KindArg,
    #[arg(long, value_enum, default_value_t = FormatArg::Sheet)]
    pub(crate) format: FormatArg,
    /// Which registrations to include
    #[arg(long, value_enum, default_value_t = ScopeArg::All)]
    pub(crate) scope: ScopeArg,
    /// Only registrations created on or after this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date, requires = "to")]
    pub(crate) from: Option<NaiveDate>,
    /// Only registrations created on or before this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date, requires = "from")]
    pub(crate) to: Option<NaiveDate>,
    /// Directory to write the report into. Defaults to REGTRACK_EXPORT_DIR.
    #[arg(long)]
    pub(crate) out_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct DecideArgs {
    #[command(flatten)]
    pub(crate) snapshot: SnapshotArgs,
    /// Registration id to decide on
    #[arg(long)]
    pub(crate) id: String,
    /// Approve the registration, recording this approver
    #[arg(long, conflicts_with = "reject", required_unless_present = "reject")]
    pub(crate) actor: Option<String>,
    /// Reject the registration
    #[arg(long)]
    pub(crate) reject: bool,
}

pub(crate) fn run_alerts(args: AlertsArgs, config: &AppConfig) -> Result<(), AppError> {
    let AlertsArgs { snapshot, json } = args;
    let store = Arc::new(load_store(&snapshot.input)?);
    let monitor = ExpiryMonitor::new(store, Arc::new(FixedClock(snapshot.now())));
    let alerts = monitor.scan()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&alerts)?);
        return Ok(());
    }

    let offset = config.export.utc_offset;
    println!("Expiring soon ({})", alerts.expiring_soon.len());
    for entry in &alerts.expiring_soon {
        let urgency = entry
            .classification
            .urgency()
            .map(|urgency| urgency.label())
            .unwrap_or("-");
        println!(
            "- {} | {} days left [{}]",
            describe(entry, offset),
            entry.classification.days_remaining,
            urgency
        );
    }

    println!("\nExpired ({})", alerts.expired.len());
    for entry in &alerts.expired {
        println!(
            "- {} | expired {} days ago",
            describe(entry, offset),
            entry.classification.days_expired_by
        );
    }

    Ok(())
}

fn describe(entry: &ClassifiedRegistration, offset: FixedOffset) -> String {
    let record = &entry.registration;
    format!(
        "{} {} ({}) created {} expires {}",
        record.customer_id,
        record.name,
        record.mobile_number,
        locale_date(record.created_at, offset),
        locale_date(expires_at(record.created_at), offset)
    )
}

pub(crate) fn run_summary(args: SummaryArgs) -> Result<(), AppError> {
    let records = load_snapshot(&args.input)?;
    let tally = StatusTally::from_records(&records);

    println!("Registrations: {}", tally.total);
    println!("- pending: {}", tally.pending);
    println!("- approved: {}", tally.approved);
    println!("- rejected: {}", tally.rejected);
    Ok(())
}

pub(crate) fn run_list(args: ListArgs, config: &AppConfig) -> Result<(), AppError> {
    let records = load_snapshot(&args.input)?;
    let listed = query(args.search.as_deref(), args.status).apply(&records);

    let offset = config.export.utc_offset;
    println!("Registrations ({})", listed.len());
    for record in &listed {
        println!(
            "- {} {} ({}) | {} | {} | applied {}",
            record.customer_id,
            record.name,
            record.mobile_number,
            record
                .category
                .as_ref()
                .map(|category| category.name.as_str())
                .unwrap_or("N/A"),
            record.status.label(),
            locale_date(record.created_at, offset)
        );
    }
    Ok(())
}

fn query(search: Option<&str>, status: StatusArg) -> RegistrationQuery {
    let mut query = RegistrationQuery::new();
    if let Some(term) = search {
        query = query.search(term);
    }
    if let Some(status) = status.status() {
        query = query.status(status);
    }
    query
}

pub(crate) fn run_export(args: ExportArgs, config: &AppConfig) -> Result<(), AppError> {
    let ExportArgs {
        snapshot,
        kind,
        format,
        scope,
        from,
        to,
        out_dir,
    } = args;

    let now = snapshot.now();
    let records = load_snapshot(&snapshot.input)?;
    let mut selected = select(&records, scope, now)?;

    let kind = ReportKind::from(kind);
    if kind == ReportKind::VerifiedRegistrations {
        selected = verified_only(&selected);
    }

    let offset = config.export.utc_offset;
    let mut export_scope = ExportScope::new(now);
    if let (Some(start), Some(end)) = (from, to) {
        let range = DateRange::new(start, end)?;
        selected = range.filter(&selected, offset);
        export_scope = export_scope.with_range(range);
    }

    let exporter = ReportExporter::from_config(kind, &config.export);
    let file = match format {
        FormatArg::Sheet => match exporter.to_spreadsheet(&selected, &export_scope)? {
            Some(file) => file,
            None => {
                println!("No {} to export.", kind.sheet_name().to_lowercase());
                return Ok(());
            }
        },
        FormatArg::Pdf => exporter.to_document(&selected, &export_scope)?.file,
    };

    let dir = out_dir.unwrap_or_else(|| config.export.output_dir.clone());
    let path = file.write_to(&dir)?;
    info!(path = %path.display(), rows = selected.len(), "report written");
    println!("Wrote {} ({} rows)", path.display(), selected.len());
    Ok(())
}

fn select(
    records: &[Registration],
    scope: ScopeArg,
    now: DateTime<Utc>,
) -> Result<Vec<Registration>, AppError> {
    let selected = match scope {
        ScopeArg::All => records.to_vec(),
        ScopeArg::Pending => records
            .iter()
            .filter(|record| record.is_pending())
            .cloned()
            .collect(),
        ScopeArg::Expiring => aggregate(records, now)?.expiring_soon_records(),
        ScopeArg::Expired => aggregate(records, now)?.expired_records(),
    };
    Ok(selected)
}

pub(crate) fn run_decide(args: DecideArgs) -> Result<(), AppError> {
    let DecideArgs {
        snapshot,
        id,
        actor,
        reject: _,
    } = args;

    let store = Arc::new(load_store(&snapshot.input)?);
    let id = RegistrationId(id);
    let record = store
        .fetch(&id)?
        .ok_or_else(|| StoreError::NotFound(id.clone()))?;

    let decision = match actor {
        Some(actor) => Decision::Approve { actor },
        None => Decision::Reject,
    };
    let workflow = ApprovalWorkflow::new(Arc::clone(&store), Arc::new(FixedClock(snapshot.now())));
    let stored = workflow.decide(&record, decision)?;

    write_snapshot(&snapshot.input, store.all()?)?;
    println!(
        "{} ({}) is now {}",
        stored.customer_id,
        stored.id,
        stored.status.label()
    );
    Ok(())
}
