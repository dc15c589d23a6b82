/// Convenience result type used across trainboard.
pub type TrainboardResult<T> = Result<T, TrainboardError>;

/// Top-level error taxonomy used by atlas, compositor, encoder and device APIs.
#[derive(thiserror::Error, Debug)]
pub enum TrainboardError {
    /// A required glyph sheet could not be read or decoded.
    #[error("asset load error: '{asset}': {reason}")]
    AssetLoad {
        /// Logical asset name (e.g. `tall-digits`).
        asset: String,
        /// Decoder or IO failure description.
        reason: String,
    },

    /// A glyph key fell outside the addressing scheme of its sheet.
    #[error("key out of range: {sheet} key {key} (expected {expected})")]
    KeyOutOfRange {
        /// Sheet the lookup was made against.
        sheet: &'static str,
        /// Offending key.
        key: i64,
        /// Human-readable valid domain.
        expected: &'static str,
    },

    /// Canvas dimensions must both be positive.
    #[error("invalid canvas size: {width}x{height} (both must be > 0)")]
    InvalidCanvasSize {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// Platform numbers are limited to the badge range.
    #[error("invalid platform number: {0} (expected 1..=12)")]
    InvalidPlatformNumber(i64),

    /// A device command or encoder argument was out of range.
    #[error("invalid argument: {name} = {value} (expected {expected})")]
    InvalidArgument {
        /// Parameter name.
        name: &'static str,
        /// Offending value, formatted.
        value: String,
        /// Human-readable valid domain.
        expected: String,
    },

    /// Encoded payload does not fit the envelope's length field.
    #[error("frame too large: {len} bytes (max {max})")]
    FrameTooLarge {
        /// Byte length that was attempted.
        len: usize,
        /// Capacity of the length field.
        max: usize,
    },

    /// Transport failed to establish a connection.
    #[error("connect error: {0}")]
    Connect(String),

    /// Transport failed to write an envelope.
    #[error("write error: {0}")]
    Write(String),

    /// Invalid configuration document.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TrainboardError {
    /// Build a [`TrainboardError::AssetLoad`] value.
    pub fn asset_load(asset: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::AssetLoad {
            asset: asset.into(),
            reason: reason.to_string(),
        }
    }

    /// Build a [`TrainboardError::InvalidArgument`] value.
    pub fn invalid_argument(
        name: &'static str,
        value: impl std::fmt::Display,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            name,
            value: value.to_string(),
            expected: expected.into(),
        }
    }

    /// Build a [`TrainboardError::Connect`] value.
    pub fn connect(msg: impl Into<String>) -> Self {
        Self::Connect(msg.into())
    }

    /// Build a [`TrainboardError::Write`] value.
    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }

    /// Build a [`TrainboardError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
