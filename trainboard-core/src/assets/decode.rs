use crate::foundation::core::Rgba8;
use crate::foundation::error::{TrainboardError, TrainboardResult};

/// Decode encoded image bytes (PNG, GIF) into a straight-alpha RGBA8 bitmap.
///
/// `asset` names the sheet in the error when decoding fails.
pub fn decode_image(asset: &str, bytes: &[u8]) -> TrainboardResult<image::RgbaImage> {
    let dyn_img =
        image::load_from_memory(bytes).map_err(|e| TrainboardError::asset_load(asset, e))?;
    Ok(dyn_img.to_rgba8())
}

/// Replace every pixel's RGB with `tint`, keeping the source alpha channel untouched.
///
/// The result has the same dimensions as `src`. The tint's own alpha is ignored; the
/// source alpha acts as a stencil.
pub fn recolor(src: &image::RgbaImage, tint: Rgba8) -> image::RgbaImage {
    let mut out = src.clone();
    for px in out.pixels_mut() {
        px.0 = [tint.r, tint.g, tint.b, px.0[3]];
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
