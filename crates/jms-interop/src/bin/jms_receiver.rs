use std::process::ExitCode;

use clap::Parser;
use jms_interop::cli::{init_tracing, run_receiver, ReceiverCli};

fn main() -> ExitCode {
    init_tracing();
    let cli = ReceiverCli::parse();
    let (input, out) = (std::io::stdin().lock(), std::io::stdout().lock());
    match run_receiver(&cli, input, out, std::io::stderr().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("JmsReceiver error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
