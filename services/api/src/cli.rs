use crate::commands::{run_plan, run_recommend, PlanArgs, RecommendArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use drivelens::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "DriveLens",
    about = "Serve or query the DriveLens car financing engine",
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
    /// Rank vehicles for a profile stored as JSON
    Recommend(RecommendArgs),
    /// Print the lease vs. buy plan for the best-matching model
    Plan(PlanArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Recommend(args) => run_recommend(args),
        Command::Plan(args) => run_plan(args),
    }
}
