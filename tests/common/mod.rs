#![allow(dead_code)]

use sitetail::SiteResult;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

pub const SAMPLE_LINES: &[&str] = &["GET / 200", "GET /x 404", "#comment", "GET /y 500"];

/// Write `lines` (newline-terminated) to `dir/name`.
pub fn write_log(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(&path, content).unwrap();
    path
}

/// Pin a file's modification time to `secs` after the epoch.
pub fn set_mtime(path: &Path, secs: u64) {
    let file = fs::File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
        .unwrap();
}

/// Counters keyed by their display form (`"4XX"`), for readable asserts.
pub fn counts(result: &SiteResult) -> BTreeMap<String, u64> {
    result
        .counts_by_class
        .iter()
        .map(|(class, count)| (class.to_string(), *count))
        .collect()
}

pub fn expected(pairs: &[(&str, u64)]) -> BTreeMap<String, u64> {
    pairs
        .iter()
        .map(|(class, count)| (class.to_string(), *count))
        .collect()
}
