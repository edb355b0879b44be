//! lin - Project-tracker CLI for humans and LLMs

use std::process::ExitCode;

use lin_cli::cli::Output;

fn main() -> ExitCode {
    if let Err(e) = lin_cli::cli::run() {
        Output::error(&format!("{:#}", e));
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
