mod catalog;
mod cli;
mod console;
mod infra;
mod routes;
mod server;

use ability_jobs::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
