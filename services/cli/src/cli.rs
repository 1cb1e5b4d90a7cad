use crate::commands::{run_alerts, run_decide, run_export, run_list, run_summary};
use crate::commands::{AlertsArgs, DecideArgs, ExportArgs, ListArgs, SummaryArgs};
use clap::{Parser, Subcommand};
use regtrack::config::AppConfig;
use regtrack::error::AppError;
use regtrack::telemetry;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "regtrack",
    about = "Track registration expiry, record approval decisions, and export reports",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List pending registrations that are expiring soon or already expired
    Alerts(AlertsArgs),
    /// Count registrations by status
    Summary(SummaryArgs),
    /// Search registrations by name, mobile number, or customer id
    List(ListArgs),
    /// Export registrations as a spreadsheet (CSV) or tabular PDF report
    Export(ExportArgs),
    /// Approve or reject a pending registration and rewrite the snapshot
    Decide(DecideArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    info!(
        environment = config.environment.label(),
        export_dir = %config.export.output_dir.display(),
        "regtrack ready"
    );

    match cli.command {
        Command::Alerts(args) => run_alerts(args, &config),
        Command::Summary(args) => run_summary(args),
        Command::List(args) => run_list(args, &config),
        Command::Export(args) => run_export(args, &config),
        Command::Decide(args) => run_decide(args),
    }
}
