//! Layout half of the compositor: turns a [`LayoutRequest`] into an ordered list of
//! [`DrawOp`]s without touching any pixels.
//!
//! Painting order is the order of the returned ops; later ops may cover earlier ones.

use crate::compose::digits::{digit_value, split_digits_int};
use crate::foundation::error::{TrainboardError, TrainboardResult};

/// Label text never becomes visible left of this column, even with a short clock field.
pub const MIN_FIELD_WIDTH: i64 = 11;
/// Columns kept free at the right edge when a platform number is shown.
pub const PLATFORM_RESERVE: i64 = 16;
/// Vertical offset of tall clock digits.
pub const CLOCK_DIGIT_Y: i64 = 0;
/// Vertical offset of the clock colon.
pub const COLON_Y: i64 = 0;
/// Vertical offset of label text.
pub const LABEL_Y: i64 = 0;
/// Vertical offset of the platform badge; one row above the canvas.
pub const PLATFORM_BADGE_Y: i64 = -1;
/// Vertical offset of the delay badge.
pub const DELAY_BADGE_Y: i64 = 0;
/// Vertical offset of the circled platform glyph in the reserved slot.
pub const PLATFORM_GLYPH_Y: i64 = 0;

const TALL_DIGIT_ADVANCE: i64 = 4;
const COLON_ADVANCE: i64 = 2;
pub(crate) const SMALL_DIGIT_ADVANCE: i64 = 4;
pub(crate) const PLUS_ADVANCE: i64 = 4;
const PLATFORM_BADGE_CENTER: i64 = 9;

/// Inputs for one rendered frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayoutRequest {
    /// Countdown minutes or `HH:MM` clock, drawn with tall digits.
    pub clock_text: String,
    /// Destination text, drawn from the dense font.
    pub label_text: String,
    /// Delay in minutes; zero hides the delay badge.
    pub delay_minutes: i64,
    /// Platform number (1–12), if known.
    pub platform: Option<i64>,
    /// Horizontal shift of the label text (negative scrolls left).
    pub text_offset: i32,
}

impl LayoutRequest {
    /// Request with only clock and label text.
    pub fn new(clock_text: impl Into<String>, label_text: impl Into<String>) -> Self {
        Self {
            clock_text: clock_text.into(),
            label_text: label_text.into(),
            ..Self::default()
        }
    }

    /// Set the delay badge value.
    pub fn with_delay(mut self, minutes: i64) -> Self {
        self.delay_minutes = minutes;
        self
    }

    /// Set the platform badge value.
    pub fn with_platform(mut self, platform: i64) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Set the label text offset.
    pub fn with_text_offset(mut self, offset: i32) -> Self {
        self.text_offset = offset;
        self
    }
}

/// One drawing instruction, in canvas coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawOp {
    /// Tall clock digit.
    DigitGlyph {
        /// Digit 0–9.
        digit: u8,
        /// Left edge.
        x: i64,
        /// Top edge.
        y: i64,
    },
    /// Clock colon.
    ColonGlyph {
        /// Left edge.
        x: i64,
        /// Top edge.
        y: i64,
    },
    /// "min" label at the origin, after a countdown clock.
    MinLabel,
    /// Visible slice of one dense-font cell.
    TextGlyph {
        /// Character to draw.
        ch: char,
        /// Canvas column of the first visible cell column.
        x: i64,
        /// First visible column inside the cell.
        src_x: u32,
        /// Number of visible columns.
        width: u32,
    },
    /// Circled platform glyph in the slot reserved at the right edge.
    PlatformGlyph {
        /// Platform number, 1–12.
        index: u8,
        /// Left edge of the 16 px slot.
        x: i64,
    },
    /// Small-digit platform number.
    PlatformBadge {
        /// Digits, most significant first.
        digits: Vec<u8>,
        /// Left edge of the first digit.
        x: i64,
        /// Top edge.
        y: i64,
    },
    /// Plus sign followed by small delay digits.
    DelayBadge {
        /// Left edge of the plus sign.
        x: i64,
        /// Digits that fit on the canvas, most significant first.
        digits: Vec<u8>,
    },
    /// Full-canvas overlay at the origin.
    Overlay,
}

/// Result of laying out a [`LayoutRequest`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutPlan {
    /// Ops in painting order.
    pub ops: Vec<DrawOp>,
    /// Cursor after the clock field; the delay badge starts here.
    pub delay_anchor_x: i64,
    /// Left edge of the region where label text is visible.
    pub target_left: i64,
    /// Right edge (exclusive) of the label text region.
    pub target_right: i64,
}

/// Horizontal advance of `ch` in the dense font.
///
/// Full width for `=`, `@`, `#` and for non-ASCII outside the Cyrillic block.
pub fn char_advance(ch: char) -> i64 {
    let cp = u32::from(ch);
    let wide = matches!(ch, '=' | '@' | '#') || (cp >= 128 && !(0x0400..=0x04FF).contains(&cp));
    if wide { 16 } else { 8 }
}

/// Lay out `request` on a `width x height` canvas.
///
/// Fails only for a platform number outside 1–12; every other oddity degrades (dropped
/// characters, clipped glyphs) with at most a warning.
pub fn plan(request: &LayoutRequest, width: u32, height: u32) -> TrainboardResult<LayoutPlan> {
    if width == 0 || height == 0 {
        return Err(TrainboardError::InvalidCanvasSize { width, height });
    }
    if let Some(p) = request.platform
        && !(1..=12).contains(&p)
    {
        return Err(TrainboardError::InvalidPlatformNumber(p));
    }

    let width = i64::from(width);
    let mut ops = Vec::new();

    // 1. Clock field.
    let mut cursor = 0i64;
    for ch in request.clock_text.chars() {
        if ch == ':' {
            if cursor < width {
                ops.push(DrawOp::ColonGlyph {
                    x: cursor,
                    y: COLON_Y,
                });
                cursor += COLON_ADVANCE;
            }
        } else if let Some(digit) = digit_value(ch) {
            if cursor < width {
                ops.push(DrawOp::DigitGlyph {
                    digit,
                    x: cursor,
                    y: CLOCK_DIGIT_Y,
                });
                cursor += TALL_DIGIT_ADVANCE;
            }
        } else {
            tracing::warn!(%ch, "skipping non-digit character in clock text");
        }
    }

    // A countdown (digits only, no colon) carries the "min" label.
    let has_digit = request.clock_text.chars().any(|c| digit_value(c).is_some());
    if has_digit && !request.clock_text.contains(':') {
        ops.push(DrawOp::MinLabel);
    }

    // 2. Delay anchor.
    let delay_anchor_x = cursor;

    // 3. Label text.
    let target_left = delay_anchor_x.max(MIN_FIELD_WIDTH);
    let target_right = if request.platform.is_some() {
        width - PLATFORM_RESERVE
    } else {
        width
    };
    let mut pen = target_left + i64::from(request.text_offset);
    for ch in request.label_text.chars() {
        if pen >= target_right {
            break;
        }
        let end = pen + char_advance(ch);
        let start = pen.max(target_left);
        let stop = end.min(target_right);
        if start < stop {
            ops.push(DrawOp::TextGlyph {
                ch,
                x: start,
                src_x: (start - pen) as u32,
                width: (stop - start) as u32,
            });
        }
        pen = end;
    }

    // 4. Platform glyph and badge.
    if let Some(p) = request.platform {
        ops.push(DrawOp::PlatformGlyph {
            index: p as u8,
            x: width - PLATFORM_RESERVE,
        });
        let digits: Vec<u8> = split_digits_int(p)
            .into_iter()
            .filter_map(digit_value)
            .collect();
        let x = PLATFORM_BADGE_CENTER - (digits.len() as i64) * 2;
        ops.push(DrawOp::PlatformBadge {
            digits,
            x,
            y: PLATFORM_BADGE_Y,
        });
    }

    // 5. Delay badge.
    if request.delay_minutes != 0 {
        ops.push(delay_badge(request.delay_minutes, delay_anchor_x, width));
    }

    // 6. Overlay.
    ops.push(DrawOp::Overlay);

    Ok(LayoutPlan {
        ops,
        delay_anchor_x,
        target_left,
        target_right,
    })
}

fn delay_badge(delay_minutes: i64, anchor_x: i64, width: i64) -> DrawOp {
    let text = delay_minutes.to_string();
    let unsigned = text
        .strip_prefix('+')
        .or_else(|| text.strip_prefix('-'))
        .unwrap_or(&text);

    let mut digits = Vec::new();
    let mut cursor = anchor_x + PLUS_ADVANCE;
    for ch in unsigned.chars() {
        match digit_value(ch) {
            Some(d) => {
                if cursor + SMALL_DIGIT_ADVANCE > width {
                    break;
                }
                digits.push(d);
                cursor += SMALL_DIGIT_ADVANCE;
            }
            None => tracing::warn!(%ch, "skipping non-digit character in delay"),
        }
    }

    DrawOp::DelayBadge {
        x: anchor_x,
        digits,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/layout.rs"]
mod tests;
