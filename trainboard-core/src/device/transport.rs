use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::foundation::error::{TrainboardError, TrainboardResult};

/// GATT characteristic that accepts envelope writes on iPixel-style panels.
pub const GATT_WRITE_CHARACTERISTIC: &str = "0000fa02-0000-1000-8000-00805f9b34fb";

/// Byte-level link to one display.
///
/// Implementations own connection setup (pairing, retries) entirely; callers see only
/// `connect` and `write`. Both may suspend on I/O.
pub trait Transport: Send {
    /// Establish the link. Failures should be reported as [`TrainboardError::Connect`].
    fn connect(&mut self) -> impl Future<Output = TrainboardResult<()>> + Send;

    /// Write one envelope. Failures should be reported as [`TrainboardError::Write`].
    fn write(&mut self, bytes: &[u8]) -> impl Future<Output = TrainboardResult<()>> + Send;
}

/// Shared view of the writes recorded by a [`MemoryTransport`].
#[derive(Clone, Debug, Default)]
pub struct WriteLog(Arc<Mutex<Vec<Vec<u8>>>>);

impl WriteLog {
    /// Copy of every write so far, in order.
    pub async fn snapshot(&self) -> Vec<Vec<u8>> {
        self.0.lock().await.clone()
    }
}

/// In-memory transport that records each write.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    log: WriteLog,
    refuse_connect: bool,
}

impl MemoryTransport {
    /// Transport that accepts every connect and write.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport whose `connect` always fails.
    pub fn refusing() -> Self {
        Self {
            refuse_connect: true,
            ..Self::default()
        }
    }

    /// Handle on the recorded writes; stays valid after the transport moves into a session.
    pub fn log(&self) -> WriteLog {
        self.log.clone()
    }
}

impl Transport for MemoryTransport {
    async fn connect(&mut self) -> TrainboardResult<()> {
        if self.refuse_connect {
            return Err(TrainboardError::connect("memory transport refused connection"));
        }
        Ok(())
    }

    async fn write(&mut self, bytes: &[u8]) -> TrainboardResult<()> {
        self.log.0.lock().await.push(bytes.to_vec());
        Ok(())
    }
}

/// Appends every envelope to a file, back to back. Useful for capturing traffic.
#[derive(Debug)]
pub struct FileTransport {
    path: PathBuf,
    file: Option<tokio::fs::File>,
}

impl FileTransport {
    /// Transport writing to `path` (created on connect if missing).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }
}

impl Transport for FileTransport {
    async fn connect(&mut self) -> TrainboardResult<()> {
        let file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| TrainboardError::connect(format!("open '{}': {e}", self.path.display())))?;
        self.file = Some(file);
        Ok(())
    }

    async fn write(&mut self, bytes: &[u8]) -> TrainboardResult<()> {
        let Some(file) = self.file.as_mut() else {
            return Err(TrainboardError::write("file transport is not connected"));
        };
        file.write_all(bytes)
            .await
            .map_err(|e| TrainboardError::write(format!("write '{}': {e}", self.path.display())))?;
        file.flush()
            .await
            .map_err(|e| TrainboardError::write(format!("flush '{}': {e}", self.path.display())))?;
        tracing::debug!(bytes = bytes.len(), path = %self.path.display(), "envelope written");
        Ok(())
    }
}
