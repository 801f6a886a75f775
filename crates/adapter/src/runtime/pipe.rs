//! Pipe — turn lines from an async reader into log events.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::conf::SourceConfig;
use crate::logline::LogEvent;

/// Send one `LogEvent` per non-empty line of `reader` until EOF.
///
/// Lines that are not valid UTF-8 are forwarded with invalid sequences
/// replaced by U+FFFD. Returns the number of events sent. Stops early,
/// without error, once the receiving side is gone.
pub async fn pump_lines<R>(
    mut reader: R,
    source: &SourceConfig,
    tx: mpsc::Sender<LogEvent>,
) -> Result<u64, std::io::Error>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let mut sent = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let line = match std::str::from_utf8(trim_line_end(&buf)) {
            Ok(text) => text.to_string(),
            Err(_) => {
                warn!("Input line is not valid UTF-8, forwarding it lossily");
                String::from_utf8_lossy(trim_line_end(&buf)).into_owned()
            }
        };
        if line.is_empty() {
            continue;
        }

        let event = LogEvent::new(&source.container_id, &source.container_name, line);
        if tx.send(event).await.is_err() {
            debug!("Event receiver closed, stopping line pump");
            break;
        }
        sent += 1;
    }

    Ok(sent)
}

/// Strip a trailing `\n` or `\r\n`.
fn trim_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
