//! # Decoder Source
//!
//! Turns a line-oriented device into a stream of scan events.
//!
//! ## Supported Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  keyboard-wedge scanner (/dev/ttyACM0, /dev/hidraw0 via a line driver) │
//! │  named pipe fed by a camera decoder (mkfifo /run/scanpos/decoder)      │
//! │  plain file (replaying captured decodes)                               │
//! │                                                                         │
//! │  one valid line      ──►  one ScanEvent { barcode, Instant::now() }    │
//! │  blank / invalid     ──►  skipped (debug log)                          │
//! │  end of stream       ──►  Unavailable (camera path off for session)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The reader runs on its own task and only forwards raw decodes. Every
//! decision (debounce, lookup) happens on the event loop.

use std::io::ErrorKind;
use std::path::Path;
use std::time::Instant;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use scanpos_core::validation::validate_barcode;
use scanpos_core::ScanEvent;

use crate::error::{AppError, AppResult};

/// Buffered decodes. A decoder that outruns the loop just waits.
const CHANNEL_CAPACITY: usize = 64;

/// Message from the reader task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecoderEvent {
    Decoded(ScanEvent),
    Unavailable(String),
}

/// Receiving end of a running decoder.
pub struct DecoderHandle {
    rx: mpsc::Receiver<DecoderEvent>,
    task: JoinHandle<()>,
}

impl DecoderHandle {
    /// Next decoder event. `None` once the reader task is gone.
    pub async fn recv(&mut self) -> Option<DecoderEvent> {
        self.rx.recv().await
    }
}

impl Drop for DecoderHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Opens a decoder device.
///
/// ## Errors
/// `DEVICE_UNAVAILABLE` when the device is missing or not readable.
pub async fn open_decoder(path: &Path) -> AppResult<DecoderHandle> {
    let file = tokio::fs::File::open(path).await.map_err(|e| {
        warn!(device = %path.display(), error = %e, "Decoder device unavailable");
        match e.kind() {
            ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                AppError::device_unavailable("Camera not found or permission denied.")
            }
            _ => AppError::device_unavailable(format!("Camera unavailable: {}", e)),
        }
    })?;

    info!(device = %path.display(), "Decoder device opened");
    Ok(spawn_reader(file))
}

/// Spawns a reader task over any line-oriented source.
pub fn spawn_reader<R>(reader: R) -> DecoderHandle
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

    let task = tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();

        let reason = loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let barcode = match validate_barcode(&line) {
                        Ok(barcode) => barcode,
                        Err(e) => {
                            debug!(raw = ?line, error = %e, "Decode skipped");
                            continue;
                        }
                    };
                    debug!(barcode = %barcode, "Decoded");
                    let event = DecoderEvent::Decoded(ScanEvent::new(barcode, Instant::now()));
                    if tx.send(event).await.is_err() {
                        return;
                    }
                }
                Ok(None) => break "Decoder stream ended".to_string(),
                Err(e) => break format!("Decoder read failed: {}", e),
            }
        };

        info!(reason = %reason, "Decoder closed");
        let _ = tx.send(DecoderEvent::Unavailable(reason)).await;
    });

    DecoderHandle { rx, task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use scanpos_core::MAX_BARCODE_LEN;

    fn barcode_of(event: Option<DecoderEvent>) -> String {
        match event {
            Some(DecoderEvent::Decoded(scan)) => scan.barcode,
            other => panic!("expected a decode, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_lines_become_scan_events() {
        let mut decoder = spawn_reader(&b"123\n\n  456 \r\n"[..]);

        assert_eq!(barcode_of(decoder.recv().await), "123");
        assert_eq!(barcode_of(decoder.recv().await), "456");
        assert!(matches!(
            decoder.recv().await,
            Some(DecoderEvent::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_lines_are_skipped() {
        let input = format!("12\u{7}3\n{}\n789\n", "9".repeat(MAX_BARCODE_LEN + 1));
        let mut decoder = spawn_reader(std::io::Cursor::new(input.into_bytes()));

        assert_eq!(barcode_of(decoder.recv().await), "789");
        assert!(matches!(
            decoder.recv().await,
            Some(DecoderEvent::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_device() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_decoder(&dir.path().join("no-such-device"))
            .await
            .err()
            .unwrap();
        assert_eq!(err.code, ErrorCode::DeviceUnavailable);
        assert_eq!(err.message, "Camera not found or permission denied.");
    }

    #[tokio::test]
    async fn test_file_device() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("decodes.txt");
        std::fs::write(&path, "4760001234567\n").unwrap();

        let mut decoder = open_decoder(&path).await.unwrap();
        assert_eq!(barcode_of(decoder.recv().await), "4760001234567");
    }
}
