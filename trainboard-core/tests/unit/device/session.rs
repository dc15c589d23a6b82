use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::*;
use crate::device::transport::MemoryTransport;
use crate::encode::envelope::DeviceCommand;

fn brightness(v: i64) -> Envelope {
    DeviceCommand::brightness(v).unwrap().to_envelope().unwrap()
}

#[tokio::test]
async fn send_before_connect_fails() {
    let session = DeviceSession::new(MemoryTransport::new());
    assert!(!session.is_connected().await);
    assert!(matches!(
        session.send(&brightness(1)).await,
        Err(TrainboardError::Write(_))
    ));
}

#[tokio::test]
async fn connect_failure_is_reported() {
    let session = DeviceSession::new(MemoryTransport::refusing());
    assert!(matches!(
        session.connect().await,
        Err(TrainboardError::Connect(_))
    ));
    assert!(!session.is_connected().await);
}

#[tokio::test]
async fn send_all_writes_in_order() {
    let transport = MemoryTransport::new();
    let log = transport.log();
    let session = DeviceSession::new(transport);
    session.connect().await.unwrap();
    session.connect().await.unwrap();

    let envs: Vec<_> = (0..5).map(brightness).collect();
    session.send_all(&envs).await.unwrap();

    let writes = log.snapshot().await;
    let expected: Vec<Vec<u8>> = envs.iter().map(|e| e.as_bytes().to_vec()).collect();
    assert_eq!(writes, expected);
}

/// Transport that fails the test if two writes ever overlap.
struct Exclusive {
    in_flight: Arc<AtomicBool>,
    order: Arc<std::sync::Mutex<Vec<u8>>>,
    writes: Arc<AtomicUsize>,
}

impl Transport for Exclusive {
    async fn connect(&mut self) -> TrainboardResult<()> {
        Ok(())
    }

    async fn write(&mut self, bytes: &[u8]) -> TrainboardResult<()> {
        assert!(!self.in_flight.swap(true, Ordering::SeqCst), "overlapping write");
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }
        self.order.lock().unwrap().push(bytes[bytes.len() - 1]);
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.in_flight.store(false, Ordering::SeqCst);
        Ok(())
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_senders_never_overlap() {
    let writes = Arc::new(AtomicUsize::new(0));
    let order = Arc::new(std::sync::Mutex::new(Vec::new()));
    let session = Arc::new(DeviceSession::new(Exclusive {
        in_flight: Arc::new(AtomicBool::new(false)),
        order: order.clone(),
        writes: writes.clone(),
    }));
    session.connect().await.unwrap();

    let mut handles = Vec::new();
    for task in 0..8i64 {
        let session = session.clone();
        handles.push(tokio::spawn(async move {
            let batch: Vec<_> = (0..4).map(|i| brightness(task * 10 + i)).collect();
            session.send_all(&batch).await.unwrap();
        }));
    }
    for h in handles {
        h.await.unwrap();
    }
    assert_eq!(writes.load(Ordering::SeqCst), 32);

    // Batches stay contiguous and ordered.
    let order = order.lock().unwrap().clone();
    for chunk in order.chunks(4) {
        let base = chunk[0];
        assert_eq!(chunk, &[base, base + 1, base + 2, base + 3]);
    }
}

#[tokio::test]
async fn into_inner_returns_transport() {
    let session = DeviceSession::new(MemoryTransport::new());
    session.connect().await.unwrap();
    session.send(&brightness(9)).await.unwrap();
    let transport = session.into_inner();
    assert_eq!(transport.log().snapshot().await.len(), 1);
}

#[tokio::test]
async fn file_transport_appends_envelopes() {
    use crate::device::transport::FileTransport;

    let path = std::env::temp_dir().join(format!("trainboard-dump-{}.bin", std::process::id()));
    let _ = std::fs::remove_file(&path);

    let session = DeviceSession::new(FileTransport::new(&path));
    assert!(matches!(
        session.send(&brightness(1)).await,
        Err(TrainboardError::Write(_))
    ));
    session.connect().await.unwrap();
    let envs = [
        DeviceCommand::Clear.to_envelope().unwrap(),
        brightness(42),
    ];
    session.send_all(&envs).await.unwrap();
    drop(session);

    let written = std::fs::read(&path).unwrap();
    assert_eq!(written, [0x04, 0x00, 0x03, 0x80, 0x05, 0x00, 0x04, 0x80, 42]);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn gatt_characteristic_is_the_write_uuid() {
    use crate::device::transport::GATT_WRITE_CHARACTERISTIC;
    assert_eq!(GATT_WRITE_CHARACTERISTIC, "0000fa02-0000-1000-8000-00805f9b34fb");
}
