use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "sitetail",
    about = "Count HTTP status classes in the newest access log of each configured site",
    version,
    long_about = None
)]
pub struct Args {
    /// Sites settings file (JSON)
    #[arg(short, long, default_value = "appsettings.json")]
    pub config: PathBuf,

    /// Where to save log positions (defaults to the settings file)
    #[arg(long)]
    pub checkpoint: Option<PathBuf>,

    /// Number of tailer threads (defaults to one per site)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Append logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn checkpoint_path(&self) -> &Path {
        self.checkpoint.as_deref().unwrap_or(&self.config)
    }
}
