use anyhow::Result;
use clap::Parser;
use tracing::error;

use sitetail::export::{print_report, run_export};
use sitetail::utils::{setup_logging, validate_args};
use sitetail::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    validate_args(&args)?;
    setup_logging(args.verbose, args.log_file.as_deref())?;

    match run_export(&args) {
        Ok(outcomes) => print_report(&outcomes),
        Err(e) => {
            error!(error = %format!("{:#}", e), "Export failed");
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
