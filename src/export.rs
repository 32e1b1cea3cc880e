use anyhow::Result;
use std::path::Path;
use std::time::Instant;
use tracing::{dispatcher, info};

use crate::cancel::{install_ctrlc_handler, CancellationToken};
use crate::checkpoint::write_checkpoint;
use crate::config::load_sites;
use crate::coordinator::Coordinator;
use crate::report::render_report;
use crate::stats::SiteOutcome;
use crate::Args;

pub fn run_export(args: &Args) -> Result<Vec<SiteOutcome>> {
    let cancel = CancellationToken::new();
    install_ctrlc_handler(cancel.clone())?;

    let dispatch = dispatcher::get_default(|current| current.clone());
    let coordinator = Coordinator::new(cancel, dispatch).workers(args.workers);

    export_sites(&args.config, args.checkpoint_path(), &coordinator)
}

/// Load positions from `config_path`, run `coordinator` over them and write
/// the advanced positions to `checkpoint_path`.
///
/// The checkpoint is written whenever the sites loaded, even if the
/// coordinator itself failed.
pub fn export_sites(
    config_path: &Path,
    checkpoint_path: &Path,
    coordinator: &Coordinator,
) -> Result<Vec<SiteOutcome>> {
    let total_start_time = Instant::now();
    let mut sites = load_sites(config_path)?;

    let outcomes = coordinator.run(&mut sites);
    let saved = write_checkpoint(checkpoint_path, &sites);
    let outcomes = outcomes?;
    saved?;

    info!(
        action = "complete",
        component = "export",
        site_count = outcomes.len(),
        duration_ms = total_start_time.elapsed().as_millis(),
        "Export pass finished"
    );
    Ok(outcomes)
}

pub fn print_report(outcomes: &[SiteOutcome]) -> Result<()> {
    println!("{}", render_report(outcomes)?);
    Ok(())
}
