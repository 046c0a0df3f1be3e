//! Animated slide composition.
//!
//! Each layer (image, callout, line blocks) is rasterized once into its own surface. Frames are
//! then composited by painting the live layers in order with the sampled offset and opacity.

use crate::animation::spec::{LayerKind, ScheduledLayer, layer_schedule};
use crate::foundation::core::Vec2;
use crate::foundation::error::SlidecastResult;
use crate::render::draw::{self, ImagePaint};
use crate::render::frame::FrameRGBA;
use crate::render::slide::{PreparedSlide, SlideRenderer};

struct Layer {
    scheduled: ScheduledLayer,
    paint: ImagePaint,
    /// Top-left corner once the entrance animation has finished.
    rest: Vec2,
}

/// Pre-rasterized layers of one slide plus their schedule.
pub struct AnimatedSlide {
    layers: Vec<Layer>,
    duration: f64,
}

impl AnimatedSlide {
    #[tracing::instrument(skip(renderer, slide))]
    pub fn build(
        renderer: &mut SlideRenderer,
        slide: &PreparedSlide,
        duration: f64,
    ) -> SlidecastResult<Self> {
        let layout = &slide.layout;
        let tb = renderer.config().text_box();
        let schedule = layer_schedule(
            &renderer.config().animation,
            layout.line_blocks.len(),
            duration,
        );
        let block_tops = layout.block_tops();

        let mut layers = Vec::with_capacity(schedule.len());
        for scheduled in schedule {
            let (paint, rest) = match scheduled.kind {
                LayerKind::Image => {
                    let Some(placed) = &slide.image else {
                        continue;
                    };
                    (
                        draw::image_paint(&placed.image)?,
                        Vec2::new(placed.x as f64, placed.y as f64),
                    )
                }
                LayerKind::Callout => {
                    let mut ctx = draw::new_context(tb.width, layout.callout_height)?;
                    renderer.draw_callout(&mut ctx, layout, Vec2::ZERO)?;
                    (
                        draw::pixmap_paint(draw::render_pixmap(&mut ctx)),
                        Vec2::new(tb.x as f64, layout.vertical_start_offset as f64),
                    )
                }
                LayerKind::TextBlock(k) => {
                    // Extra room below the last line for descenders.
                    let h = layout.block_height(k) + layout.lines_font_size;
                    let mut ctx = draw::new_context(tb.width, h)?;
                    renderer.draw_block(&mut ctx, layout, k, Vec2::ZERO)?;
                    let top = block_tops.get(k).copied().unwrap_or_default();
                    (
                        draw::pixmap_paint(draw::render_pixmap(&mut ctx)),
                        Vec2::new(tb.x as f64, top as f64),
                    )
                }
            };
            layers.push(Layer {
                scheduled,
                paint,
                rest,
            });
        }

        tracing::debug!(layers = layers.len(), "animated slide layers built");
        Ok(Self { layers, duration })
    }

    /// Slide-local time after which every layer that appears within the slide is at rest.
    pub fn settled_after(&self) -> f64 {
        self.layers
            .iter()
            .map(|l| l.scheduled.spec)
            .filter(|spec| spec.delay < self.duration)
            .map(|spec| spec.delay + spec.fade_duration)
            .fold(0.0, f64::max)
    }

    pub fn layer_kinds(&self) -> Vec<LayerKind> {
        self.layers.iter().map(|l| l.scheduled.kind).collect()
    }

    /// Composite the frame at `slide_t` seconds into the slide.
    pub fn render_at(&self, renderer: &SlideRenderer, slide_t: f64) -> SlidecastResult<FrameRGBA> {
        let mut ctx = renderer.new_canvas()?;
        for layer in &self.layers {
            if !layer.scheduled.is_live(slide_t) {
                continue;
            }
            let sample = layer.scheduled.spec.sample_at(slide_t);
            if !sample.is_visible() {
                continue;
            }
            draw::draw_image(&mut ctx, &layer.paint, layer.rest + sample.offset, sample.opacity);
        }
        Ok(draw::frame_from_pixmap(&draw::render_pixmap(&mut ctx)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/animated.rs"]
mod tests;
