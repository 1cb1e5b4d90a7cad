mod cli;
mod commands;
mod infra;

use regtrack::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
