use chrono::{DateTime, Utc};
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{info, warn};

use crate::error::TailError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    pub path: PathBuf,
    pub modified: DateTime<Utc>,
}

#[derive(Debug)]
pub struct LogSource {
    pub file: LogFile,
    pub reader: BufReader<File>,
}

/// Newest regular file in `dir` by modification time, or `None` if the
/// directory holds no files. Sub-directories are ignored; names and
/// extensions are not inspected. Equal timestamps resolve to the greater path.
pub fn select_log_file(dir: &Path) -> Result<Option<LogFile>, TailError> {
    let unreadable = |source: io::Error| TailError::DirectoryUnreadable {
        dir: dir.to_path_buf(),
        source,
    };

    let mut newest: Option<LogFile> = None;
    for entry in fs::read_dir(dir).map_err(unreadable)? {
        let path = entry.map_err(unreadable)?.path();

        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!(action = "stat", component = "log_source", file_path = ?path, error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };
        if !metadata.is_file() {
            continue;
        }

        let modified = DateTime::<Utc>::from(metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH));
        let is_newer = newest
            .as_ref()
            .map_or(true, |current| (modified, &path) > (current.modified, &current.path));
        if is_newer {
            newest = Some(LogFile { path, modified });
        }
    }

    Ok(newest)
}

/// Select and open the newest log file in `dir`.
///
/// std opens files with a sharing mode that tolerates the web server still
/// appending to them (FILE_SHARE_READ | FILE_SHARE_WRITE on Windows).
pub fn open_log_source(dir: &Path) -> Result<LogSource, TailError> {
    let file = select_log_file(dir)?.ok_or_else(|| TailError::NoLogFileFound {
        dir: dir.to_path_buf(),
    })?;

    let handle = File::open(&file.path).map_err(|source| TailError::Open {
        path: file.path.clone(),
        source,
    })?;

    info!(
        action = "open",
        component = "log_source",
        file_path = ?file.path,
        modified = %file.modified.to_rfc3339(),
        "Selected newest log file"
    );

    Ok(LogSource {
        file,
        reader: BufReader::new(handle),
    })
}
