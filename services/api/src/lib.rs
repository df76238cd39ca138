mod cli;
mod infra;
mod report;
mod routes;
mod server;

use casn_rank::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
