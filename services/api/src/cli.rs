use crate::applicant::{run_apply, run_quote, ApplyArgs, QuoteArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use fredmind_admissions::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "FredMind Admissions",
    about = "Run the FredMind admissions intake service or drive the student wizard from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP intake service (default command)
    Serve(ServeArgs),
    /// Print the payment breakdown for a plan, currency and optional voucher
    Quote(QuoteArgs),
    /// Submit a JSON application draft through the admission wizard
    Apply(ApplyArgs),
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
        Command::Quote(args) => run_quote(args),
        Command::Apply(args) => run_apply(args).await,
    }
}
