use crate::assets::atlas::{GlyphAtlas, PixelRegion, SheetId};
use crate::compose::layout::{
    DELAY_BADGE_Y, DrawOp, LABEL_Y, PLATFORM_GLYPH_Y, PLUS_ADVANCE, SMALL_DIGIT_ADVANCE,
};
use crate::foundation::core::Canvas;
use crate::foundation::error::TrainboardResult;
use crate::foundation::math::premultiply;

/// Paint `ops` onto `canvas` in order, source-over.
pub fn execute(ops: &[DrawOp], atlas: &GlyphAtlas, canvas: &mut Canvas) -> TrainboardResult<()> {
    for op in ops {
        match op {
            DrawOp::DigitGlyph { digit, x, y } => {
                let region = atlas.lookup(SheetId::TallDigits, i64::from(*digit))?;
                blit(canvas, region, *x, *y);
            }
            DrawOp::ColonGlyph { x, y } => {
                blit(canvas, atlas.lookup(SheetId::Colon, 0)?, *x, *y);
            }
            DrawOp::MinLabel => {
                blit(canvas, atlas.lookup(SheetId::MinLabel, 0)?, 0, 0);
            }
            DrawOp::TextGlyph {
                ch,
                x,
                src_x,
                width,
            } => {
                let region = atlas.glyph(*ch).crop_left(*src_x).crop_width(*width);
                blit(canvas, region, *x, LABEL_Y);
            }
            DrawOp::PlatformGlyph { index, x } => {
                let region = atlas.lookup(SheetId::Platform, i64::from(*index))?;
                blit(canvas, region, *x, PLATFORM_GLYPH_Y);
            }
            DrawOp::PlatformBadge { digits, x, y } => {
                small_digits(canvas, atlas, digits, *x, *y)?;
            }
            DrawOp::DelayBadge { x, digits } => {
                blit(canvas, atlas.lookup(SheetId::Plus, 0)?, *x, DELAY_BADGE_Y);
                small_digits(canvas, atlas, digits, *x + PLUS_ADVANCE, DELAY_BADGE_Y)?;
            }
            DrawOp::Overlay => {
                blit(canvas, atlas.lookup(SheetId::Overlay, 0)?, 0, 0);
            }
        }
    }
    Ok(())
}

fn small_digits(
    canvas: &mut Canvas,
    atlas: &GlyphAtlas,
    digits: &[u8],
    x: i64,
    y: i64,
) -> TrainboardResult<()> {
    let mut cursor = x;
    for &d in digits {
        blit(canvas, atlas.lookup(SheetId::SmallDigits, i64::from(d))?, cursor, y);
        cursor += SMALL_DIGIT_ADVANCE;
    }
    Ok(())
}

/// Composite `region` with its top-left at `(x, y)`; the canvas clips anything off-screen.
fn blit(canvas: &mut Canvas, region: PixelRegion<'_>, x: i64, y: i64) {
    for ry in 0..region.height() {
        for rx in 0..region.width() {
            let px = region.pixel(rx, ry);
            if px[3] == 0 {
                continue;
            }
            canvas.blend_pixel(x + i64::from(rx), y + i64::from(ry), premultiply(px));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/paint.rs"]
mod tests;
