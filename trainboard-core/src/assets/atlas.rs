use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::assets::decode::{decode_image, recolor};
use crate::foundation::core::{PixelRect, Rgba8};
use crate::foundation::error::{TrainboardError, TrainboardResult};

/// Width and height of one dense font cell.
pub const FONT_CELL: u32 = 16;
/// Top-left of the dense font sheet's cell grid.
pub const FONT_ORIGIN: (u32, u32) = (32, 64);
/// Code point of the first circled platform glyph (platform 1).
pub const PLATFORM_BASE_CODE_POINT: u32 = 0x278A;
/// Code point drawn for anything the dense font sheet cannot address.
pub const REPLACEMENT_CODE_POINT: u32 = 0xFFFD;

/// Identifies one glyph sheet (and its addressing scheme) inside a [`GlyphAtlas`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SheetId {
    /// 4x16 digits, keyed 0–9.
    TallDigits,
    /// 4x7 digits, keyed 0–9.
    SmallDigits,
    /// Whole-sheet colon glyph.
    Colon,
    /// Whole-sheet "min" label.
    MinLabel,
    /// Whole-sheet plus sign.
    Plus,
    /// 16x16 cells keyed by code point.
    Font,
    /// Circled platform glyphs keyed 1–12, resolved through [`SheetId::Font`].
    Platform,
    /// Whole-sheet decorative overlay.
    Overlay,
}

impl SheetId {
    /// Stable lowercase name used in logs and errors.
    pub fn name(self) -> &'static str {
        match self {
            Self::TallDigits => "tall-digits",
            Self::SmallDigits => "small-digits",
            Self::Colon => "colon",
            Self::MinLabel => "min",
            Self::Plus => "plus",
            Self::Font => "unifont",
            Self::Platform => "platform",
            Self::Overlay => "overlay",
        }
    }
}

impl std::fmt::Display for SheetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Where to read one encoded glyph sheet from.
#[derive(Clone, Debug)]
pub enum AssetSource {
    /// Encoded image file on disk.
    Path(PathBuf),
    /// Encoded image bytes already in memory.
    Bytes(Arc<[u8]>),
}

impl AssetSource {
    fn read(&self, asset: &str) -> TrainboardResult<image::RgbaImage> {
        match self {
            Self::Path(path) => {
                let bytes = std::fs::read(path).map_err(|e| {
                    TrainboardError::asset_load(asset, format!("read '{}': {e}", path.display()))
                })?;
                decode_image(asset, &bytes)
            }
            Self::Bytes(bytes) => decode_image(asset, bytes),
        }
    }
}

/// Encoded sources for every sheet the atlas needs.
#[derive(Clone, Debug)]
pub struct AssetSources {
    /// Tall digit strip.
    pub tall_digits: AssetSource,
    /// Small digit strip.
    pub small_digits: AssetSource,
    /// Colon glyph.
    pub colon: AssetSource,
    /// "min" label glyph.
    pub min_label: AssetSource,
    /// Plus-sign glyph.
    pub plus: AssetSource,
    /// Dense 16x16 code-point font sheet.
    pub font: AssetSource,
    /// Decorative full-canvas overlay.
    pub overlay: AssetSource,
}

impl AssetSources {
    /// Conventional file names under `dir`.
    pub fn from_dir(dir: &Path) -> Self {
        let p = |name: &str| AssetSource::Path(dir.join(name));
        Self {
            tall_digits: p("tall-digits.png"),
            small_digits: p("small-digits.png"),
            colon: p("colon.png"),
            min_label: p("min.png"),
            plus: p("plus.png"),
            font: p("unifont.png"),
            overlay: p("overlay.png"),
        }
    }
}

/// Already-decoded sheets, straight alpha.
#[derive(Clone, Debug)]
pub struct AtlasImages {
    /// Tall digit strip.
    pub tall_digits: image::RgbaImage,
    /// Small digit strip.
    pub small_digits: image::RgbaImage,
    /// Colon glyph.
    pub colon: image::RgbaImage,
    /// "min" label glyph.
    pub min_label: image::RgbaImage,
    /// Plus-sign glyph.
    pub plus: image::RgbaImage,
    /// Dense font sheet.
    pub font: image::RgbaImage,
    /// Decorative overlay.
    pub overlay: image::RgbaImage,
}

/// Foreground tints applied once when the atlas is built.
///
/// The overlay keeps its own colors unless `overlay` is set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AtlasTints {
    /// Tint for the tall countdown digits.
    pub tall_digits: Rgba8,
    /// Tint for the clock colon.
    pub colon: Rgba8,
    /// Tint for the "min" label.
    pub min_label: Rgba8,
    /// Tint for label text drawn from the dense font.
    pub font: Rgba8,
    /// Tint for platform and delay digits.
    pub small_digits: Rgba8,
    /// Tint for the delay plus sign.
    pub plus: Rgba8,
    /// Optional tint for the overlay.
    pub overlay: Option<Rgba8>,
}

impl Default for AtlasTints {
    fn default() -> Self {
        Self {
            tall_digits: Rgba8::rgb(0x1f, 0x4c, 0xdf),
            colon: Rgba8::rgb(0x1f, 0x4c, 0xdf),
            min_label: Rgba8::rgb(0x60, 0x60, 0x60),
            font: Rgba8::rgb(0xff, 0xff, 0xff),
            small_digits: Rgba8::rgb(0xff, 0x00, 0x00),
            plus: Rgba8::rgb(0xff, 0x00, 0x00),
            overlay: None,
        }
    }
}

/// Borrowed view of one glyph cell inside a sheet.
///
/// Coordinates that fall outside the backing sheet read as transparent.
#[derive(Clone, Copy, Debug)]
pub struct PixelRegion<'a> {
    sheet: &'a image::RgbaImage,
    rect: PixelRect,
}

impl<'a> PixelRegion<'a> {
    fn new(sheet: &'a image::RgbaImage, rect: PixelRect) -> Self {
        Self { sheet, rect }
    }

    fn whole(sheet: &'a image::RgbaImage) -> Self {
        let (w, h) = sheet.dimensions();
        Self::new(sheet, PixelRect::new(0, 0, w, h))
    }

    /// Cell rectangle in sheet coordinates.
    pub fn rect(&self) -> PixelRect {
        self.rect
    }

    /// Region width in pixels.
    pub fn width(&self) -> u32 {
        self.rect.width
    }

    /// Region height in pixels.
    pub fn height(&self) -> u32 {
        self.rect.height
    }

    /// Straight-alpha pixel at region-local `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.rect.width || y >= self.rect.height {
            return [0, 0, 0, 0];
        }
        let sx = self.rect.x + x;
        let sy = self.rect.y + y;
        if sx >= self.sheet.width() || sy >= self.sheet.height() {
            return [0, 0, 0, 0];
        }
        self.sheet.get_pixel(sx, sy).0
    }

    /// Drop the leftmost `n` columns.
    pub fn crop_left(self, n: u32) -> Self {
        let n = n.min(self.rect.width);
        Self::new(
            self.sheet,
            PixelRect::new(
                self.rect.x + n,
                self.rect.y,
                self.rect.width - n,
                self.rect.height,
            ),
        )
    }

    /// Keep at most the leftmost `width` columns.
    pub fn crop_width(self, width: u32) -> Self {
        Self::new(
            self.sheet,
            PixelRect::new(
                self.rect.x,
                self.rect.y,
                self.rect.width.min(width),
                self.rect.height,
            ),
        )
    }
}

#[derive(Debug)]
struct Sheets {
    tall_digits: image::RgbaImage,
    small_digits: image::RgbaImage,
    colon: image::RgbaImage,
    min_label: image::RgbaImage,
    plus: image::RgbaImage,
    font: image::RgbaImage,
    overlay: image::RgbaImage,
}

/// Read-only set of recolored glyph sheets.
///
/// Built once and shared by reference (or through the inner `Arc` on clone) with every
/// compositor call; nothing mutates it after construction.
#[derive(Clone, Debug)]
pub struct GlyphAtlas {
    sheets: Arc<Sheets>,
}

impl GlyphAtlas {
    /// Decode and recolor every sheet named by `sources`.
    #[tracing::instrument(skip(sources))]
    pub fn load(sources: &AssetSources, tints: &AtlasTints) -> TrainboardResult<Self> {
        let images = AtlasImages {
            tall_digits: sources.tall_digits.read(SheetId::TallDigits.name())?,
            small_digits: sources.small_digits.read(SheetId::SmallDigits.name())?,
            colon: sources.colon.read(SheetId::Colon.name())?,
            min_label: sources.min_label.read(SheetId::MinLabel.name())?,
            plus: sources.plus.read(SheetId::Plus.name())?,
            font: sources.font.read(SheetId::Font.name())?,
            overlay: sources.overlay.read(SheetId::Overlay.name())?,
        };
        Self::from_images(images, tints)
    }

    /// Recolor already-decoded sheets.
    pub fn from_images(images: AtlasImages, tints: &AtlasTints) -> TrainboardResult<Self> {
        let (fw, fh) = images.font.dimensions();
        if fw < FONT_ORIGIN.0 + FONT_CELL || fh < FONT_ORIGIN.1 + FONT_CELL {
            return Err(TrainboardError::asset_load(
                SheetId::Font.name(),
                format!("sheet {fw}x{fh} is smaller than one cell at the grid origin"),
            ));
        }

        let sheets = Sheets {
            tall_digits: recolor(&images.tall_digits, tints.tall_digits),
            small_digits: recolor(&images.small_digits, tints.small_digits),
            colon: recolor(&images.colon, tints.colon),
            min_label: recolor(&images.min_label, tints.min_label),
            plus: recolor(&images.plus, tints.plus),
            font: recolor(&images.font, tints.font),
            overlay: match tints.overlay {
                Some(tint) => recolor(&images.overlay, tint),
                None => images.overlay,
            },
        };
        tracing::debug!(font_w = fw, font_h = fh, "glyph atlas ready");
        Ok(Self {
            sheets: Arc::new(sheets),
        })
    }

    /// Resolve `key` to a cell of `sheet`.
    ///
    /// Digits must be 0–9 and platform indices 1–12. Code points are not range-checked:
    /// anything the 16-bit grid cannot address resolves to U+FFFD.
    pub fn lookup(&self, sheet: SheetId, key: i64) -> TrainboardResult<PixelRegion<'_>> {
        let s = &*self.sheets;
        match sheet {
            SheetId::TallDigits => {
                let d = digit_key(sheet, key)?;
                Ok(PixelRegion::new(
                    &s.tall_digits,
                    PixelRect::new(d * 4, 0, 4, 16),
                ))
            }
            SheetId::SmallDigits => {
                let d = digit_key(sheet, key)?;
                Ok(PixelRegion::new(
                    &s.small_digits,
                    PixelRect::new(d * 4, 0, 4, 7),
                ))
            }
            SheetId::Font => Ok(self.font_cell(code_point_key(key))),
            SheetId::Platform => {
                if !(1..=12).contains(&key) {
                    return Err(TrainboardError::KeyOutOfRange {
                        sheet: sheet.name(),
                        key,
                        expected: "1..=12",
                    });
                }
                Ok(self.font_cell(PLATFORM_BASE_CODE_POINT + (key as u32) - 1))
            }
            SheetId::Colon => Ok(PixelRegion::whole(&s.colon)),
            SheetId::MinLabel => Ok(PixelRegion::whole(&s.min_label)),
            SheetId::Plus => Ok(PixelRegion::whole(&s.plus)),
            SheetId::Overlay => Ok(PixelRegion::whole(&s.overlay)),
        }
    }

    /// Dense font cell for a character.
    pub fn glyph(&self, ch: char) -> PixelRegion<'_> {
        self.font_cell(code_point_key(i64::from(u32::from(ch))))
    }

    fn font_cell(&self, code_point: u32) -> PixelRegion<'_> {
        let high = (code_point >> 8) & 0xFF;
        let low = code_point & 0xFF;
        PixelRegion::new(
            &self.sheets.font,
            PixelRect::new(
                FONT_ORIGIN.0 + low * FONT_CELL,
                FONT_ORIGIN.1 + high * FONT_CELL,
                FONT_CELL,
                FONT_CELL,
            ),
        )
    }
}

fn digit_key(sheet: SheetId, key: i64) -> TrainboardResult<u32> {
    if !(0..=9).contains(&key) {
        return Err(TrainboardError::KeyOutOfRange {
            sheet: sheet.name(),
            key,
            expected: "0..=9",
        });
    }
    Ok(key as u32)
}

fn code_point_key(key: i64) -> u32 {
    if (0..=0xFFFF).contains(&key) {
        key as u32
    } else {
        REPLACEMENT_CODE_POINT
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/atlas.rs"]
mod tests;
