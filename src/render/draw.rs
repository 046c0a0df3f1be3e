//! Thin drawing helpers over `vello_cpu`.

use std::sync::Arc;

use crate::assets::image::PreparedImage;
use crate::config::Theme;
use crate::foundation::core::{Affine, Rect, Rgb8, Vec2};
use crate::foundation::error::{SlidecastError, SlidecastResult};
use crate::render::frame::FrameRGBA;
use crate::text::markup::RunStyle;
use crate::text::shape::{TextBrushRgba8, TextEngine};
use crate::text::wrap::WrappedLine;

/// Text colors of one column: normal runs differ between callout and line blocks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct TextPalette {
    pub normal: Rgb8,
    pub bold: Rgb8,
    pub italic: Rgb8,
}

impl TextPalette {
    pub fn callout(theme: &Theme) -> Self {
        Self {
            normal: theme.text,
            bold: theme.bold,
            italic: theme.italic,
        }
    }

    pub fn lines(theme: &Theme) -> Self {
        Self {
            normal: theme.bullet,
            bold: theme.bold,
            italic: theme.italic,
        }
    }

    fn color(&self, style: RunStyle) -> Rgb8 {
        match style {
            RunStyle::Normal => self.normal,
            RunStyle::Bold => self.bold,
            RunStyle::Italic => self.italic,
        }
    }
}

/// Image paint together with its pixel size.
#[derive(Clone)]
pub(crate) struct ImagePaint {
    pub paint: vello_cpu::Image,
    pub width: u32,
    pub height: u32,
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn surface_dims(width: u32, height: u32) -> SlidecastResult<(u16, u16)> {
    let w: u16 = width
        .try_into()
        .map_err(|_| SlidecastError::render("surface width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| SlidecastError::render("surface height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(SlidecastError::render("surface must be non-empty"));
    }
    Ok((w, h))
}

pub(crate) fn new_context(width: u32, height: u32) -> SlidecastResult<vello_cpu::RenderContext> {
    let (w, h) = surface_dims(width, height)?;
    Ok(vello_cpu::RenderContext::new(w, h))
}

/// Rasterize everything queued on `ctx` into a fresh pixmap.
pub(crate) fn render_pixmap(ctx: &mut vello_cpu::RenderContext) -> vello_cpu::Pixmap {
    let mut pixmap = vello_cpu::Pixmap::new(ctx.width(), ctx.height());
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);
    pixmap
}

pub(crate) fn frame_from_pixmap(pixmap: &vello_cpu::Pixmap) -> FrameRGBA {
    FrameRGBA {
        width: u32::from(pixmap.width()),
        height: u32::from(pixmap.height()),
        data: pixmap.data_as_u8_slice().to_vec(),
        premultiplied: true,
    }
}

pub(crate) fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> SlidecastResult<vello_cpu::Pixmap> {
    let (w, h) = surface_dims(width, height)?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(SlidecastError::render("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

pub(crate) fn pixmap_paint(pixmap: vello_cpu::Pixmap) -> ImagePaint {
    let width = u32::from(pixmap.width());
    let height = u32::from(pixmap.height());
    ImagePaint {
        paint: vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        },
        width,
        height,
    }
}

pub(crate) fn image_paint(img: &PreparedImage) -> SlidecastResult<ImagePaint> {
    let pixmap = pixmap_from_premul_bytes(&img.rgba8_premul, img.width, img.height)?;
    Ok(pixmap_paint(pixmap))
}

fn reset_state(ctx: &mut vello_cpu::RenderContext, tr: Affine) {
    ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(affine_to_cpu(tr));
}

pub(crate) fn fill_rect(ctx: &mut vello_cpu::RenderContext, rect: Rect, color: Rgb8) {
    reset_state(ctx, Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        color.r, color.g, color.b, 255,
    ));
    ctx.fill_rect(&rect_to_cpu(rect));
}

/// Paint `img` with its top-left corner at `origin`.
pub(crate) fn draw_image(
    ctx: &mut vello_cpu::RenderContext,
    img: &ImagePaint,
    origin: Vec2,
    opacity: f32,
) {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 {
        return;
    }
    reset_state(ctx, Affine::translate(origin));
    ctx.set_paint(img.paint.clone());
    if opacity < 1.0 {
        ctx.push_opacity_layer(opacity);
    }
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        img.width as f64,
        img.height as f64,
    ));
    if opacity < 1.0 {
        ctx.pop_layer();
    }
}

/// Draw wrapped lines with the first line's top-left corner at `origin`.
pub(crate) fn draw_text_lines(
    ctx: &mut vello_cpu::RenderContext,
    engine: &mut TextEngine,
    lines: &[WrappedLine],
    origin: Vec2,
    size_px: u32,
    line_height: u32,
    palette: &TextPalette,
) -> SlidecastResult<()> {
    let size = size_px as f32;
    for (i, line) in lines.iter().enumerate() {
        let top = origin.y + (i as u32 * line_height) as f64;
        let mut x = origin.x;
        for tok in &line.tokens {
            if !tok.text.trim().is_empty() {
                let color = palette.color(tok.style);
                draw_token(ctx, engine, &tok.text, tok.style, size, color, Vec2::new(x, top))?;
            }
            x += tok.width as f64;
        }
    }
    Ok(())
}

fn draw_token(
    ctx: &mut vello_cpu::RenderContext,
    engine: &mut TextEngine,
    text: &str,
    style: RunStyle,
    size_px: f32,
    color: Rgb8,
    origin: Vec2,
) -> SlidecastResult<()> {
    let layout = engine.layout(text, style, size_px, TextBrushRgba8::opaque(color.to_array()))?;
    let font = engine.font_data(style).clone();
    reset_state(ctx, Affine::translate(origin));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(&font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/draw.rs"]
mod tests;
