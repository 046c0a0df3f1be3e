//! Static slide composition: one still reused for every frame of the slide.

use crate::assets::image::PlacedImage;
use crate::config::RenderConfig;
use crate::fonts::FontSet;
use crate::foundation::core::{Rect, Vec2};
use crate::foundation::error::SlidecastResult;
use crate::render::draw::{self, ImagePaint, TextPalette};
use crate::render::frame::FrameRGBA;
use crate::script::model::ScriptEntry;
use crate::text::fit::{FitParams, LayoutResult, fit_layout};
use crate::text::shape::TextEngine;

/// Everything needed to draw one slide: the placed image and the fitted text column.
#[derive(Clone, Debug)]
pub struct PreparedSlide {
    pub image: Option<PlacedImage>,
    pub layout: LayoutResult,
}

/// Owns the text engine and rasterizes slides for one render.
pub struct SlideRenderer {
    cfg: RenderConfig,
    engine: TextEngine,
    fit: FitParams,
}

impl SlideRenderer {
    pub fn new(cfg: &RenderConfig, fonts: &FontSet) -> SlidecastResult<Self> {
        cfg.validate()?;
        Ok(Self {
            cfg: cfg.clone(),
            engine: TextEngine::new(fonts)?,
            fit: FitParams::from_config(cfg),
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.cfg
    }

    /// Fit the entry's text into the right column.
    pub fn prepare(&mut self, entry: &ScriptEntry, image: Option<PlacedImage>) -> PreparedSlide {
        let layout = fit_layout(
            &mut self.engine,
            &entry.explanation,
            &entry.slide_lines,
            &self.fit,
        );
        PreparedSlide { image, layout }
    }

    /// Callout rectangle in canvas coordinates.
    pub fn callout_rect(&self, layout: &LayoutResult) -> Rect {
        let tb = self.cfg.text_box();
        let x = tb.x as f64;
        let y = layout.vertical_start_offset as f64;
        Rect::new(x, y, x + tb.width as f64, y + layout.callout_height as f64)
    }

    /// Draw the callout box and its text with the box's top-left corner at `origin`.
    pub(crate) fn draw_callout(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        layout: &LayoutResult,
        origin: Vec2,
    ) -> SlidecastResult<()> {
        let l = &self.cfg.layout;
        let theme = &self.cfg.theme;
        let w = self.cfg.text_box().width as f64;
        let h = layout.callout_height as f64;
        draw::fill_rect(
            ctx,
            Rect::new(origin.x, origin.y, origin.x + w, origin.y + h),
            theme.callout_bg,
        );
        draw::fill_rect(
            ctx,
            Rect::new(
                origin.x,
                origin.y,
                origin.x + l.callout_border_px as f64,
                origin.y + h,
            ),
            theme.callout_border,
        );
        let text_origin = origin
            + Vec2::new(
                l.callout_text_x_px as f64,
                l.callout_text_y_px as f64,
            );
        draw::draw_text_lines(
            ctx,
            &mut self.engine,
            &layout.explanation_wrapped,
            text_origin,
            layout.explanation_font_size,
            layout.explanation_line_height,
            &TextPalette::callout(theme),
        )
    }

    /// Draw line block `block` with its top-left corner at `origin`.
    pub(crate) fn draw_block(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        layout: &LayoutResult,
        block: usize,
        origin: Vec2,
    ) -> SlidecastResult<()> {
        let Some(lines) = layout.line_blocks.get(block) else {
            return Ok(());
        };
        draw::draw_text_lines(
            ctx,
            &mut self.engine,
            lines,
            origin,
            layout.lines_font_size,
            layout.lines_line_height,
            &TextPalette::lines(&self.cfg.theme),
        )
    }

    fn fill_background(&self, ctx: &mut vello_cpu::RenderContext) {
        let c = self.cfg.canvas;
        draw::fill_rect(
            ctx,
            Rect::new(0.0, 0.0, c.width as f64, c.height as f64),
            self.cfg.theme.background,
        );
    }

    pub(crate) fn new_canvas(&self) -> SlidecastResult<vello_cpu::RenderContext> {
        let mut ctx = draw::new_context(self.cfg.canvas.width, self.cfg.canvas.height)?;
        self.fill_background(&mut ctx);
        Ok(ctx)
    }

    /// Background, image, callout box, callout text, then line text.
    #[tracing::instrument(skip_all)]
    pub fn render_still(&mut self, slide: &PreparedSlide) -> SlidecastResult<FrameRGBA> {
        let mut ctx = self.new_canvas()?;

        if let Some(placed) = &slide.image {
            let paint: ImagePaint = draw::image_paint(&placed.image)?;
            draw::draw_image(
                &mut ctx,
                &paint,
                Vec2::new(placed.x as f64, placed.y as f64),
                1.0,
            );
        }

        let layout = &slide.layout;
        let x = self.cfg.text_box().x as f64;
        self.draw_callout(
            &mut ctx,
            layout,
            Vec2::new(x, layout.vertical_start_offset as f64),
        )?;
        for (block, top) in layout.block_tops().into_iter().enumerate() {
            self.draw_block(&mut ctx, layout, block, Vec2::new(x, top as f64))?;
        }

        Ok(draw::frame_from_pixmap(&draw::render_pixmap(&mut ctx)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/slide.rs"]
mod tests;
