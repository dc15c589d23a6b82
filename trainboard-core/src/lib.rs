//! Trainboard renders departure status lines onto small LED-matrix panels.
//!
//! A frame is built from pre-baked bitmap glyph sheets (no font shaping) and shipped to the
//! panel as a GIF wrapped in the iPixel-style command envelope.
//!
//! # Pipeline overview
//!
//! 1. **Load**: [`GlyphAtlas::load`] decodes and tints every glyph sheet once.
//! 2. **Plan**: [`plan`] turns a [`LayoutRequest`] into an ordered list of [`DrawOp`]s.
//! 3. **Paint**: [`Compositor::render`] executes the plan onto a premultiplied [`Canvas`].
//! 4. **Encode**: [`encode`] packs canvases into a looping GIF inside an [`Envelope`].
//! 5. **Send**: [`DeviceSession`] serializes envelope writes over a [`Transport`].
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same atlas and request always yield the same pixels and bytes.
//! - **No IO while rendering**: sheets are decoded up front; rendering only reads the atlas.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

#[cfg(test)]
extern crate self as trainboard;

mod assets;
mod foundation;

/// Departure frame compositor.
pub mod compose;
/// Display settings loaded from JSON.
pub mod config;
/// Device transports and sessions.
pub mod device;
/// GIF encoding and device envelopes.
pub mod encode;

pub use assets::atlas::{
    AssetSource, AssetSources, AtlasImages, AtlasTints, FONT_CELL, FONT_ORIGIN, GlyphAtlas,
    PLATFORM_BASE_CODE_POINT, PixelRegion, REPLACEMENT_CODE_POINT, SheetId,
};
pub use assets::decode::{decode_image, recolor};
pub use compose::digits::{split_digits, split_digits_int};
pub use compose::layout::{
    DrawOp, LayoutPlan, LayoutRequest, MIN_FIELD_WIDTH, PLATFORM_RESERVE, char_advance, plan,
};
pub use compose::{Compositor, compose};
pub use config::DisplayConfig;
pub use device::session::DeviceSession;
pub use device::transport::{
    FileTransport, GATT_WRITE_CHARACTERISTIC, MemoryTransport, Transport, WriteLog,
};
pub use encode::encode;
pub use encode::envelope::{DeviceCommand, Envelope, send_animation};
pub use encode::gif::{EncodeOpts, encode_gif};
pub use foundation::core::{Canvas, PixelRect, Rgba8};
pub use foundation::error::{TrainboardError, TrainboardResult};

#[cfg(test)]
#[path = "../tests/support/fixture.rs"]
pub(crate) mod test_fixture;
