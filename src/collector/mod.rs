use std::io::{self, Write};

use tokio::sync::mpsc;

use crate::http_probe::prelude::*;

/// Where formatted outcomes go.
pub struct Sinks<O, E> {
    /// Program identifier prefixed to failure lines.
    pub program: String,
    /// Receives success lines.
    pub out: O,
    /// Receives failure lines.
    pub err: E,
}

/// How many outcomes of each kind a drain wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub succeeded: usize,
    pub failed: usize,
}

impl Tally {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Write each outcome as soon as it arrives, until the stream closes.
///
/// Successes go to `sinks.out` as `<elapsed>\t<status>\t<location>`, failures
/// to `sinks.err` as `<program>: <error>`. Lines appear in arrival order.
/// A sink whose reader has gone away (`BrokenPipe`) is skipped from then on;
/// any other write error ends the drain.
pub async fn drain<O: Write, E: Write>(
    mut rx: mpsc::Receiver<Outcome>,
    sinks: &mut Sinks<O, E>,
) -> io::Result<Tally> {
    let mut tally = Tally::default();
    let mut out_open = true;
    let mut err_open = true;

    while let Some(outcome) = rx.recv().await {
        match outcome.error() {
            Some(error) => {
                tally.failed += 1;
                if err_open {
                    let line = format_failure(&sinks.program, error);
                    err_open = write_line(&mut sinks.err, &line)?;
                }
            }
            None => {
                tally.succeeded += 1;
                if out_open {
                    let line = format_success(&outcome);
                    out_open = write_line(&mut sinks.out, &line)?;
                }
            }
        }
    }

    Ok(tally)
}

/// Returns `Ok(false)` once the reader on the other end is gone.
fn write_line<W: Write>(sink: &mut W, line: &str) -> io::Result<bool> {
    let line = format!("{line}\n");
    match sink.write_all(line.as_bytes()).and_then(|()| sink.flush()) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            log::debug!("Output closed by reader, dropping further lines");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

pub fn format_success(outcome: &Outcome) -> String {
    format!(
        "{:?}\t{}\t{}",
        outcome.elapsed(),
        outcome.status_code(),
        outcome.location
    )
}

pub fn format_failure(program: &str, error: &ProbeError) -> String {
    format!("{program}: {error}")
}
