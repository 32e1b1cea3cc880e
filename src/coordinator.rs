use anyhow::{Context, Result};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;
use tracing::{dispatcher, error, info, info_span, Dispatch};

use crate::cancel::CancellationToken;
use crate::config::SiteConfig;
use crate::error::TailError;
use crate::stats::{SiteOutcome, SiteResult};
use crate::tailer::tail_site;

/// Runs one tailer per site on a dedicated pool and collects their outcomes.
///
/// Every tailer logs through `dispatch` and watches `cancel`; neither is
/// looked up from global state.
pub struct Coordinator {
    cancel: CancellationToken,
    dispatch: Dispatch,
    workers: Option<usize>,
}

impl Coordinator {
    pub fn new(cancel: CancellationToken, dispatch: Dispatch) -> Self {
        Self {
            cancel,
            dispatch,
            workers: None,
        }
    }

    pub fn workers(mut self, workers: Option<usize>) -> Self {
        self.workers = workers;
        self
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Tail every site and wait for all of them.
    ///
    /// Outcomes come back in the order of `sites`. A failing or panicking
    /// site yields an `Err` outcome and never disturbs its siblings. Each
    /// site's `current_row` is updated in place.
    pub fn run(&self, sites: &mut [SiteConfig]) -> Result<Vec<SiteOutcome>> {
        self.run_with(sites, tail_site)
    }

    /// [`run`](Self::run) with `work` in place of the log tailer.
    pub fn run_with<F>(&self, sites: &mut [SiteConfig], work: F) -> Result<Vec<SiteOutcome>>
    where
        F: Fn(&mut SiteConfig, &CancellationToken) -> Result<SiteResult, TailError> + Sync,
    {
        let start_time = Instant::now();
        let worker_count = self.workers.unwrap_or(sites.len()).max(1);

        dispatcher::with_default(&self.dispatch, || {
            info!(
                action = "start",
                component = "coordinator",
                site_count = sites.len(),
                worker_count,
                "Starting log read"
            );
        });

        let pool = ThreadPoolBuilder::new()
            .num_threads(worker_count)
            .thread_name(|i| format!("tailer-{}", i))
            .build()
            .context("Failed to build tailer thread pool")?;

        let outcomes: Vec<SiteOutcome> = pool.install(|| {
            sites
                .par_iter_mut()
                .with_max_len(1)
                .map(|site| self.run_site(site, &work))
                .collect()
        });

        dispatcher::with_default(&self.dispatch, || {
            let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
            info!(
                action = "complete",
                component = "coordinator",
                site_count = outcomes.len(),
                failed_sites = failed,
                cancelled = self.cancel.is_cancelled(),
                duration_ms = start_time.elapsed().as_millis(),
                "Finished log read"
            );
        });

        Ok(outcomes)
    }

    fn run_site<F>(&self, site: &mut SiteConfig, work: &F) -> SiteOutcome
    where
        F: Fn(&mut SiteConfig, &CancellationToken) -> Result<SiteResult, TailError>,
    {
        dispatcher::with_default(&self.dispatch, || {
            let site_name = site.site_name.clone();
            let span = info_span!("site", site = %site_name);
            let _entered = span.enter();

            let result = panic::catch_unwind(AssertUnwindSafe(|| work(site, &self.cancel)))
                .unwrap_or_else(|_| {
                    Err(TailError::Panicked {
                        site: site_name.clone(),
                    })
                });

            match &result {
                Ok(counts) => info!(
                    action = "collect",
                    component = "coordinator",
                    counted = counts.total(),
                    position = site.current_row,
                    "Site finished"
                ),
                Err(e) => error!(
                    action = "collect",
                    component = "coordinator",
                    error = %e,
                    position = site.current_row,
                    "Site failed"
                ),
            }

            SiteOutcome { site_name, result }
        })
    }
}
