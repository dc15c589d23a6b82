//! Departure frame compositor: layout planning, painting and blending.

pub(crate) mod blend;
/// Numeric digit splitting used by the badges.
pub mod digits;
/// Layout planning ([`LayoutRequest`](layout::LayoutRequest) to draw ops).
pub mod layout;
pub(crate) mod paint;

mod compositor;

pub use compositor::{Compositor, compose};
