use crate::estimate::{run_batch, run_estimate, show_districts, BatchArgs, EstimateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use house_price::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "House Price Estimator",
    about = "Serve and run residential price estimates from the command line",
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
    /// Estimate the price of a single property
    Estimate(EstimateArgs),
    /// Estimate every listing in a CSV export
    Batch(BatchArgs),
    /// List the cities and districts offered in the form
    Districts,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured model artifact path
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Estimate(args) => run_estimate(args),
        Command::Batch(args) => run_batch(args),
        Command::Districts => {
            show_districts();
            Ok(())
        }
    }
}
