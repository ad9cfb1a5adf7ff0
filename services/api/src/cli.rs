use crate::demo::{run_quote_prepare, QuotePrepareArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use smart_quote::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Smart Quote Service",
    about = "Evaluate suppliers and serve ranked procurement quotations",
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
    /// Run the quotation pipeline from the command line
    Quote {
        #[command(subcommand)]
        command: QuoteCommand,
    },
}

#[derive(Subcommand, Debug)]
enum QuoteCommand {
    /// Evaluate the vendor directory for a sample request and print the
    /// ranked shortlist
    Prepare(QuotePrepareArgs),
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
        Command::Quote {
            command: QuoteCommand::Prepare(args),
        } => run_quote_prepare(args).await,
    }
}
