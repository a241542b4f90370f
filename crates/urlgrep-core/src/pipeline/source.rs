//! Task source: reads newline-delimited URLs into the intake channel.

use crossbeam_channel::Sender;
use std::io::BufRead;

/// Read URLs from `input` one line at a time and forward them until EOF or an
/// empty line. Returns the number of tasks forwarded.
///
/// Lines keep their content verbatim apart from the trailing `\r\n` or `\n`;
/// an empty line is the explicit end-of-input marker, so whitespace-only
/// lines still count as tasks. A read error ends intake after a warning
/// rather than tearing down the whole run.
pub(super) fn read_tasks<R: BufRead>(mut input: R, intake: Sender<String>) -> usize {
    let mut forwarded = 0usize;
    let mut line = String::new();
    loop {
        line.clear();
        match input.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {
                let task = line.trim_end_matches(['\r', '\n']);
                if task.is_empty() {
                    break;
                }
                if intake.send(task.to_string()).is_err() {
                    break;
                }
                forwarded += 1;
            }
            Err(err) => {
                tracing::warn!("failed to read input line: {}", err);
                break;
            }
        }
    }
    forwarded
}
