use std::collections::HashMap;

use crate::error::TailError;
use crate::parser::StatusClass;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteResult {
    pub site_name: String,
    pub counts_by_class: HashMap<StatusClass, u64>,
}

impl SiteResult {
    pub fn new(site_name: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
            counts_by_class: HashMap::new(),
        }
    }

    pub fn record(&mut self, class: StatusClass) {
        *self.counts_by_class.entry(class).or_insert(0) += 1;
    }

    pub fn count(&self, class: StatusClass) -> u64 {
        self.counts_by_class.get(&class).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts_by_class.values().sum()
    }
}

#[derive(Debug)]
pub struct SiteOutcome {
    pub site_name: String,
    pub result: Result<SiteResult, TailError>,
}
