mod cli;
mod demo;
mod infra;
mod intake;
mod routes;
mod server;

use smart_quote::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
