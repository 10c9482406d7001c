mod cli;
mod estimate;
mod infra;
mod routes;
mod server;

use house_price::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
