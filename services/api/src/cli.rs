use crate::demo::{
    run_continuity_report, run_demo, run_eligibility_report, ContinuityReportArgs, DemoArgs,
    EligibilityReportArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use commendation::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Commendation Registry",
    about = "Run and demonstrate the commendation eligibility service from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate award standing against the bundled demo registry
    Report {
        #[command(subcommand)]
        command: ReportCommand,
    },
    /// Run an end-to-end CLI demo covering eligibility, continuity, and audit scoping
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ReportCommand {
    /// Service-time eligibility for one member of the demo roster
    Eligibility(EligibilityReportArgs),
    /// Consecutive-year citation standing for one demo unit
    Continuity(ContinuityReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Populate the in-memory repositories with the demo registry
    #[arg(long)]
    pub(crate) seed_demo: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report {
            command: ReportCommand::Eligibility(args),
        } => run_eligibility_report(args),
        Command::Report {
            command: ReportCommand::Continuity(args),
        } => run_continuity_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
