//! Frame encoding: GIF container plus device command envelope.

/// Device command envelopes.
pub mod envelope;
/// GIF container encoding.
pub mod gif;

use crate::foundation::core::Canvas;
use crate::foundation::error::TrainboardResult;

use envelope::{Envelope, send_animation};
use gif::{EncodeOpts, encode_gif};

/// Encode `canvases` as one GIF animation and wrap it for the device.
///
/// Deterministic: the same canvases and options always produce the same bytes.
#[tracing::instrument(skip(canvases, opts), fields(frames = canvases.len()))]
pub fn encode(canvases: &[Canvas], opts: &EncodeOpts) -> TrainboardResult<Envelope> {
    let gif = encode_gif(canvases, opts)?;
    let env = send_animation(&gif)?;
    tracing::debug!(gif_bytes = gif.len(), envelope_bytes = env.len(), "frame encoded");
    Ok(env)
}
