//! Reforge CLI entry point.

use std::env;
use std::process::ExitCode;

use reforge_runtime::cli;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    let config = match cli::parse_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            return ExitCode::from(2);
        }
    };
    cli::init_tracing(config.verbose);

    match cli::run(&config) {
        Ok(Some(report)) => {
            print!("{}", cli::render_report(&report));
            if report.has_failures() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}
