mod cli;
mod demo;
mod infra;
mod render;
mod routes;
mod sell;
mod server;

use phonexchange::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
