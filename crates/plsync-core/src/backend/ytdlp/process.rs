//! Child process plumbing: stream stdout/stderr lines into the logger.

use std::io::{BufRead, BufReader, Read};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;

use crate::error::SyncError;
use crate::logger::{LogLevel, SyncLogger};

/// Exit status plus the last `ERROR:` line seen on stderr.
pub(super) struct Finished {
    pub(super) status: ExitStatus,
    pub(super) last_error: Option<String>,
}

/// Level for one line of downloader output.
pub(super) fn classify(line: &str) -> LogLevel {
    if line.starts_with("ERROR:") {
        LogLevel::Error
    } else if line.starts_with("WARNING:") {
        LogLevel::Warning
    } else {
        LogLevel::Debug
    }
}

pub(super) fn forward_line(line: &str, logger: &dyn SyncLogger) {
    let line = line.trim_end();
    if line.is_empty() {
        return;
    }
    logger.log(classify(line), line);
}

pub(super) fn last_error_line(stderr: &str) -> Option<String> {
    stderr
        .lines()
        .map(str::trim_end)
        .filter(|l| classify(l) == LogLevel::Error)
        .last()
        .map(str::to_string)
}

/// Read `source` to EOF, forwarding each line. Returns the last error line.
fn pump<R: Read>(source: R, logger: &dyn SyncLogger) -> Option<String> {
    let mut last_error = None;
    for raw in BufReader::new(source).split(b'\n').map_while(Result::ok) {
        let line = String::from_utf8_lossy(&raw);
        let line = line.trim_end_matches('\r');
        if classify(line) == LogLevel::Error {
            last_error = Some(line.trim_end().to_string());
        }
        forward_line(line, logger);
    }
    last_error
}

/// Spawn `cmd` and forward its output line by line until it exits.
///
/// stderr is drained on a scoped thread so neither pipe can fill up and
/// stall the child.
pub(super) fn run_streaming(
    mut cmd: Command,
    program: &str,
    logger: &dyn SyncLogger,
) -> Result<Finished, SyncError> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|source| SyncError::Launch {
        program: program.to_string(),
        source,
    })?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let last_error = thread::scope(|s| {
        let err_reader = s.spawn(move || stderr.and_then(|err| pump(err, logger)));
        if let Some(out) = stdout {
            pump(out, logger);
        }
        err_reader.join().unwrap_or(None)
    });

    let status = child
        .wait()
        .map_err(|e| SyncError::Download(format!("waiting for {program}: {e}")))?;

    Ok(Finished { status, last_error })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::MemoryLogger;

    #[test]
    fn classify_by_prefix() {
        assert_eq!(classify("ERROR: Unable to download"), LogLevel::Error);
        assert_eq!(classify("WARNING: falling back"), LogLevel::Warning);
        assert_eq!(classify("[download]  42.0% of 3.1MiB"), LogLevel::Debug);
        assert_eq!(classify(" ERROR: indented"), LogLevel::Debug);
    }

    #[test]
    fn forward_skips_blank_lines() {
        let log = MemoryLogger::new();
        forward_line("   ", &log);
        forward_line("WARNING: x\r", &log);
        assert_eq!(log.records(), vec![(LogLevel::Warning, "WARNING: x".to_string())]);
    }

    #[test]
    fn last_error_line_picks_final_error() {
        let stderr = "WARNING: a\nERROR: first\nnoise\nERROR: second\n";
        assert_eq!(last_error_line(stderr).as_deref(), Some("ERROR: second"));
        assert_eq!(last_error_line("WARNING: only"), None);
    }

    #[test]
    fn pump_handles_crlf_and_invalid_utf8() {
        let log = MemoryLogger::new();
        let input: &[u8] = b"[youtube] abc\r\nERROR: bad \xff byte\n";
        let last = pump(input, &log);
        assert_eq!(log.messages_at(LogLevel::Debug), vec!["[youtube] abc"]);
        assert!(last.unwrap().starts_with("ERROR: bad"));
    }

    #[test]
    fn missing_program_is_launch_error() {
        let log = MemoryLogger::new();
        let cmd = Command::new("/nonexistent/plsync-test-downloader");
        match run_streaming(cmd, "/nonexistent/plsync-test-downloader", &log) {
            Err(SyncError::Launch { program, .. }) => {
                assert_eq!(program, "/nonexistent/plsync-test-downloader")
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected launch failure"),
        }
    }
}
