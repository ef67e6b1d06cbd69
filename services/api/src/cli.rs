use clap::{Args, Parser, Subcommand};
use phonexchange::error::AppError;

use crate::demo::{run_demo, run_quote, DemoArgs, QuoteArgs};
use crate::infra::CatalogArgs;
use crate::sell::{run_sell, SellArgs};
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "PhoneXchange",
    about = "Serve and demonstrate the PhoneXchange trade-in valuation flow",
    version
)]
struct Cli {
    #[command(flatten)]
    catalog: CatalogArgs,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Walk through the sell flow interactively in the terminal
    Sell(SellArgs),
    /// Price one model from an answers file without the wizard
    Quote(QuoteArgs),
    /// Run a scripted wizard pass and capture a sample lead
    Demo(DemoArgs),
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
        Command::Serve(args) => server::run(args, cli.catalog).await,
        Command::Sell(args) => run_sell(args, cli.catalog),
        Command::Quote(args) => run_quote(args, cli.catalog),
        Command::Demo(args) => run_demo(args, cli.catalog),
    }
}
