// src/exec/output.rs

//! Forwarding of child process output to the parent's streams.
//!
//! Every line a command prints is re-emitted as `[<namespace>] <line>` so
//! output from actions running side by side stays attributable. Writes go
//! through an [`OutputSink`], which lets tests capture lines instead of
//! printing them.

use std::fmt::Debug;
use std::io::{self, Write};
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tracing::{trace, warn};

/// Which of the child's streams a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

/// Destination for forwarded output lines.
///
/// Implementations are shared by every forwarding task of a run and must
/// accept concurrent calls. Each call carries exactly one line.
pub trait OutputSink: Send + Sync + Debug {
    fn write_line(&self, stream: StreamKind, namespace: &str, line: &str);
}

/// Sink writing to the parent process's stdout/stderr.
///
/// The whole prefixed line is written under the stream lock, so lines from
/// different actions may interleave but never tear.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl OutputSink for ConsoleSink {
    fn write_line(&self, stream: StreamKind, namespace: &str, line: &str) {
        let formatted = format_line(namespace, line);
        let res = match stream {
            StreamKind::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(formatted.as_bytes()).and_then(|_| out.flush())
            }
            StreamKind::Stderr => io::stderr().lock().write_all(formatted.as_bytes()),
        };

        // A closed stdout (e.g. `| head`) must not stop the child from being
        // drained, so the line is dropped.
        if let Err(err) = res {
            trace!(namespace, ?stream, error = %err, "dropping forwarded line");
        }
    }
}

/// Format one forwarded line, including the trailing newline.
pub fn format_line(namespace: &str, line: &str) -> String {
    format!("[{namespace}] {line}\n")
}

/// Drain `reader` line by line into `sink` until EOF.
///
/// Invalid UTF-8 is replaced rather than treated as an error: the stream has
/// to be read to the end either way, or the child can block on a full pipe.
/// A final line without a trailing newline is still forwarded.
///
/// Returns the number of lines forwarded.
pub async fn forward_lines<R>(
    reader: R,
    stream: StreamKind,
    namespace: String,
    sink: Arc<dyn OutputSink>,
) -> usize
where
    R: AsyncRead + Unpin,
{
    let mut segments = BufReader::new(reader).split(b'\n');
    let mut forwarded = 0;

    loop {
        match segments.next_segment().await {
            Ok(Some(mut bytes)) => {
                if bytes.last() == Some(&b'\r') {
                    bytes.pop();
                }
                let line = String::from_utf8_lossy(&bytes);
                sink.write_line(stream, &namespace, &line);
                forwarded += 1;
            }
            Ok(None) => break,
            Err(err) => {
                warn!(
                    namespace = %namespace,
                    ?stream,
                    error = %err,
                    "error reading command output; stopping forwarder"
                );
                break;
            }
        }
    }

    forwarded
}
