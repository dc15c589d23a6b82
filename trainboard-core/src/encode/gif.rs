use anyhow::Context;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame};

use crate::foundation::core::Canvas;
use crate::foundation::error::{TrainboardError, TrainboardResult};

/// Options for the GIF container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodeOpts {
    /// Display time of each frame in milliseconds.
    pub frame_delay_ms: u32,
    /// Quantizer speed (1 = best quality, 30 = fastest).
    pub speed: i32,
}

impl Default for EncodeOpts {
    fn default() -> Self {
        Self {
            frame_delay_ms: 1000,
            speed: 10,
        }
    }
}

/// Encode `canvases` as one looping GIF, one frame per canvas, in order.
///
/// All canvases must share the first canvas' dimensions.
#[tracing::instrument(skip(canvases), fields(frames = canvases.len()))]
pub fn encode_gif(canvases: &[Canvas], opts: &EncodeOpts) -> TrainboardResult<Vec<u8>> {
    let Some(first) = canvases.first() else {
        return Err(TrainboardError::invalid_argument(
            "canvases",
            0,
            "at least one canvas",
        ));
    };
    let (w, h) = (first.width(), first.height());
    if let Some(bad) = canvases.iter().find(|c| c.width() != w || c.height() != h) {
        return Err(TrainboardError::invalid_argument(
            "canvas size",
            format!("{}x{}", bad.width(), bad.height()),
            format!("{w}x{h} like the first canvas"),
        ));
    }

    let delay = Delay::from_numer_denom_ms(opts.frame_delay_ms, 1);
    let frames = canvases
        .iter()
        .map(|c| Frame::from_parts(c.to_rgba_image(), 0, 0, delay));

    let mut buf = Vec::new();
    {
        let mut enc = GifEncoder::new_with_speed(&mut buf, opts.speed.clamp(1, 30));
        enc.set_repeat(Repeat::Infinite).context("set gif repeat")?;
        enc.encode_frames(frames).context("encode gif frames")?;
    }
    tracing::debug!(bytes = buf.len(), "gif encoded");
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
