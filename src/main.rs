//! jdalias - directory alias manager

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = jdalias::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
