//! Operator CLI over the tenancy store.
//!
//! # Responsibility
//! - Load `.env` and environment configuration, start logging when asked.
//! - Open the configured database and dispatch one subcommand.
//! - Print results as JSON on stdout and errors on stderr.

mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    // A missing .env file is normal.
    dotenvy::dotenv().ok();

    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            err.exit_code()
        }
    }
}
