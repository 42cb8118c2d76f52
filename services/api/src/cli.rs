use crate::commands::{run_options, run_pending, run_score, OptionsArgs, PendingArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use nbc_compliance::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "NBC Compliance",
    about = "Score NBC 9.36 energy selections and run the compliance project service",
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
    /// Score a selections file and print its tier and cost estimate
    Score(ScoreArgs),
    /// List the form fields still required for a selections file
    Pending(PendingArgs),
    /// Print the option tables used for scoring
    Options(OptionsArgs),
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
        Command::Score(args) => run_score(args),
        Command::Pending(args) => run_pending(args),
        Command::Options(args) => run_options(args),
    }
}
