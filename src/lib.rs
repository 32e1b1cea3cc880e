pub mod args;
pub mod cancel;
pub mod checkpoint;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod export;
pub mod parser;
pub mod report;
pub mod source;
pub mod stats;
pub mod tailer;
pub mod utils;

pub use args::Args;
pub use cancel::CancellationToken;
pub use config::SiteConfig;
pub use coordinator::Coordinator;
pub use error::TailError;
pub use export::{export_sites, run_export};
pub use stats::{SiteOutcome, SiteResult};
