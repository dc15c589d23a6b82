use tokio::sync::Mutex;

use crate::device::transport::Transport;
use crate::encode::envelope::Envelope;
use crate::foundation::error::{TrainboardError, TrainboardResult};

#[derive(Debug)]
struct State<T> {
    transport: T,
    connected: bool,
}

/// Single-writer handle on one display.
///
/// Writes from any number of tasks are serialized: each envelope is fully written before
/// the next one starts, and [`DeviceSession::send_all`] keeps its batch contiguous.
/// There is no reconnect or retry here; that policy belongs to the transport's owner.
#[derive(Debug)]
pub struct DeviceSession<T> {
    state: Mutex<State<T>>,
}

impl<T: Transport> DeviceSession<T> {
    /// Wrap an unconnected transport.
    pub fn new(transport: T) -> Self {
        Self {
            state: Mutex::new(State {
                transport,
                connected: false,
            }),
        }
    }

    /// Connect once; later calls are no-ops.
    pub async fn connect(&self) -> TrainboardResult<()> {
        let mut st = self.state.lock().await;
        if st.connected {
            return Ok(());
        }
        st.transport.connect().await?;
        st.connected = true;
        tracing::debug!("device session connected");
        Ok(())
    }

    /// Whether [`DeviceSession::connect`] has succeeded.
    pub async fn is_connected(&self) -> bool {
        self.state.lock().await.connected
    }

    /// Write one envelope.
    pub async fn send(&self, envelope: &Envelope) -> TrainboardResult<()> {
        let mut st = self.state.lock().await;
        Self::write_locked(&mut st, envelope).await
    }

    /// Write `envelopes` in order, each completing before the next; stops at the first error.
    pub async fn send_all(&self, envelopes: &[Envelope]) -> TrainboardResult<()> {
        let mut st = self.state.lock().await;
        for (i, env) in envelopes.iter().enumerate() {
            Self::write_locked(&mut st, env).await?;
            tracing::debug!(index = i, total = envelopes.len(), "envelope sent");
        }
        Ok(())
    }

    /// Release the transport.
    pub fn into_inner(self) -> T {
        self.state.into_inner().transport
    }

    async fn write_locked(st: &mut State<T>, envelope: &Envelope) -> TrainboardResult<()> {
        if !st.connected {
            return Err(TrainboardError::write("device session is not connected"));
        }
        st.transport.write(envelope.as_bytes()).await
    }
}

#[cfg(test)]
#[path = "../../tests/unit/device/session.rs"]
mod tests;
