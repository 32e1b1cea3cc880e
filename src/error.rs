use std::io;
use std::path::PathBuf;

/// Failure that ends one site's tailer. Sibling sites are unaffected.
#[derive(Debug, thiserror::Error)]
pub enum TailError {
    #[error("no log files found in {dir:?}")]
    NoLogFileFound { dir: PathBuf },
    #[error("cannot list log directory {dir:?}: {source}")]
    DirectoryUnreadable {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot open log file {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("read failed on {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("tailer for site '{site}' panicked")]
    Panicked { site: String },
}
