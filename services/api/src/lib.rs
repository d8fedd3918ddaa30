mod applicant;
mod cli;
mod infra;
mod routes;
mod server;

use fredmind_admissions::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
