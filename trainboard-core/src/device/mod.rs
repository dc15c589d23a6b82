//! Transport boundary: the [`Transport`](transport::Transport) trait, built-in transports
//! and the single-writer [`DeviceSession`](session::DeviceSession).

/// Serialized writes over one transport.
pub mod session;
/// Byte-level transports.
pub mod transport;
