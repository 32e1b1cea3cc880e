use std::io::{self, BufRead};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

use crate::cancel::CancellationToken;
use crate::config::SiteConfig;
use crate::error::TailError;
use crate::parser::{parse_line, ParsedLine};
use crate::source::{open_log_source, LogSource};
use crate::stats::SiteResult;

/// Count status classes in the site's newest log file, resuming after
/// `site.current_row` lines. The position resets to 0 once the file is
/// drained and is kept as-is on cancellation.
pub fn tail_site(
    site: &mut SiteConfig,
    cancel: &CancellationToken,
) -> Result<SiteResult, TailError> {
    let LogSource { file, reader } = open_log_source(&site.path)?;
    tail_reader(reader, &file.path, site, cancel)
}

pub fn tail_reader<R: BufRead>(
    mut reader: R,
    path: &Path,
    site: &mut SiteConfig,
    cancel: &CancellationToken,
) -> Result<SiteResult, TailError> {
    let start_time = Instant::now();
    let read_failed = |source: io::Error| TailError::Read {
        path: path.to_path_buf(),
        source,
    };

    let resume_from = site.current_row;
    let mut result = SiteResult::new(&site.site_name);
    let mut buf = Vec::new();

    let skipped = skip_lines(&mut reader, resume_from, &mut buf).map_err(read_failed)?;
    if skipped < resume_from {
        warn!(
            action = "resume",
            component = "tailer",
            site = %site.site_name,
            checkpoint = resume_from,
            available = skipped,
            "Log file is shorter than the checkpoint"
        );
        site.current_row = 0;
        return Ok(result);
    }

    loop {
        if cancel.is_cancelled() {
            info!(
                action = "cancelled",
                component = "tailer",
                site = %site.site_name,
                position = site.current_row,
                counted = result.total(),
                "Tailer stopped by cancellation"
            );
            return Ok(result);
        }

        let Some(bytes) = next_line(&mut reader, &mut buf).map_err(read_failed)? else {
            break;
        };
        site.current_row += 1;

        let line = match std::str::from_utf8(bytes) {
            Ok(line) => line,
            Err(e) => {
                warn!(action = "read", component = "tailer", site = %site.site_name, line_number = site.current_row, error = %e, "Unreadable log line");
                continue;
            }
        };

        match parse_line(line, site.index_of_status_code) {
            Ok(ParsedLine::Status(class)) => result.record(class),
            Ok(ParsedLine::Comment) => {}
            Err(e) => {
                warn!(action = "parse", component = "tailer", site = %site.site_name, line_number = site.current_row, error = %e, "Skipping malformed log line");
            }
        }
    }

    let consumed = site.current_row - resume_from;
    site.current_row = 0;

    info!(
        action = "complete",
        component = "tailer",
        site = %site.site_name,
        lines_read = consumed,
        counted = result.total(),
        duration_ms = start_time.elapsed().as_millis(),
        "Reached end of log file"
    );
    Ok(result)
}

fn skip_lines<R: BufRead>(reader: &mut R, count: u64, buf: &mut Vec<u8>) -> io::Result<u64> {
    let mut skipped = 0;
    while skipped < count {
        buf.clear();
        if reader.read_until(b'\n', buf)? == 0 {
            break;
        }
        skipped += 1;
    }
    Ok(skipped)
}

/// Next line without its terminator, or `None` at end of stream.
fn next_line<'a, R: BufRead>(reader: &mut R, buf: &'a mut Vec<u8>) -> io::Result<Option<&'a [u8]>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }

    let mut line = buf.as_slice();
    if let Some(rest) = line.strip_suffix(b"\n") {
        line = rest;
    }
    if let Some(rest) = line.strip_suffix(b"\r") {
        line = rest;
    }
    Ok(Some(line))
}
