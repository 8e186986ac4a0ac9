use crate::catalog::{run_jobs, JobsArgs};
use crate::console::{run_browse, BrowseArgs};
use crate::server;
use ability_jobs::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Ability Jobs",
    about = "Serve and browse the accessible Ability Jobs board from the command line",
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
    /// Print the filtered job listing
    Jobs(JobsArgs),
    /// Browse the board interactively, optionally with the voice assistant
    Browse(BrowseArgs),
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
        Command::Jobs(args) => run_jobs(args).await,
        Command::Browse(args) => run_browse(args).await,
    }
}
