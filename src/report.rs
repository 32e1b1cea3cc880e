use anyhow::{Context, Result};
use std::collections::BTreeMap;

use crate::stats::{SiteOutcome, SiteResult};

/// Flatten one site's counters into `<site>_<class>_count_codes` keys.
/// Only 2XX through 5XX are reported, and only when seen.
pub fn site_metrics(result: &SiteResult) -> BTreeMap<String, u64> {
    result
        .counts_by_class
        .iter()
        .filter(|(class, _)| matches!(class.digit(), '2'..='5'))
        .map(|(class, count)| {
            (
                format!("{}_{}_count_codes", result.site_name, class),
                *count,
            )
        })
        .collect()
}

/// Pretty JSON array with one object per site, in configuration order.
/// Failed sites render as an empty object.
pub fn render_report(outcomes: &[SiteOutcome]) -> Result<String> {
    let metrics: Vec<BTreeMap<String, u64>> = outcomes
        .iter()
        .map(|outcome| match &outcome.result {
            Ok(result) => site_metrics(result),
            Err(_) => BTreeMap::new(),
        })
        .collect();

    serde_json::to_string_pretty(&metrics).context("Failed to serialize status code report")
}
