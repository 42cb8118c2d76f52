mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use nbc_compliance::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
