use rayon::prelude::*;

use crate::assets::atlas::GlyphAtlas;
use crate::compose::layout::{LayoutRequest, plan};
use crate::compose::paint::execute;
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{TrainboardError, TrainboardResult};

/// Fixed-size renderer for departure frames.
///
/// Holds no glyph data itself; every call borrows a shared [`GlyphAtlas`], so one
/// compositor (and one atlas) can serve any number of threads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Compositor {
    width: u32,
    height: u32,
    background: Rgba8,
}

impl Compositor {
    /// Build a compositor for `width x height` frames.
    pub fn new(width: u32, height: u32, background: Rgba8) -> TrainboardResult<Self> {
        if width == 0 || height == 0 {
            return Err(TrainboardError::InvalidCanvasSize { width, height });
        }
        Ok(Self {
            width,
            height,
            background,
        })
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Render one frame.
    #[tracing::instrument(skip(self, atlas), fields(w = self.width, h = self.height))]
    pub fn render(&self, atlas: &GlyphAtlas, request: &LayoutRequest) -> TrainboardResult<Canvas> {
        let layout = plan(request, self.width, self.height)?;
        let mut canvas = Canvas::new(self.width, self.height, self.background)?;
        execute(&layout.ops, atlas, &mut canvas)?;
        Ok(canvas)
    }

    /// Render a batch of frames in parallel. Output order matches `requests`.
    pub fn render_many(
        &self,
        atlas: &GlyphAtlas,
        requests: &[LayoutRequest],
    ) -> TrainboardResult<Vec<Canvas>> {
        requests
            .par_iter()
            .map(|req| self.render(atlas, req))
            .collect()
    }
}

/// One-shot [`Compositor::render`].
pub fn compose(
    atlas: &GlyphAtlas,
    request: &LayoutRequest,
    width: u32,
    height: u32,
    background: Rgba8,
) -> TrainboardResult<Canvas> {
    Compositor::new(width, height, background)?.render(atlas, request)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compositor.rs"]
mod tests;
