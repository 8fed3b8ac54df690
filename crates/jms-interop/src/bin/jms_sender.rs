use std::process::ExitCode;

use clap::Parser;
use jms_interop::cli::{init_tracing, run_sender, SenderCli};

fn main() -> ExitCode {
    init_tracing();
    let cli = SenderCli::parse();
    match run_sender(&cli, std::io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("JmsSender error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
