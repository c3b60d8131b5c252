use std::process::ExitCode;

use clap::Parser;

use booking_store::cli::{Args, run, setup_logging};

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(args.verbose);

    let stdout = std::io::stdout();
    match run(&args, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
