use std::collections::HashMap;

use crate::fonts::FontSet;
use crate::foundation::error::{SlidecastError, SlidecastResult};
use crate::text::markup::RunStyle;
use crate::text::measure::TextMeasure;

/// Brush color carried through parley layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl TextBrushRgba8 {
    pub fn opaque([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b, a: 255 }
    }
}

struct StyleFace {
    font_ctx: parley::FontContext,
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

impl StyleFace {
    fn new(style: RunStyle, bytes: &[u8]) -> SlidecastResult<Self> {
        // One collection per style so faces sharing a family name never shadow each other.
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            SlidecastError::font(format!("no font families registered for {style:?} face"))
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| SlidecastError::font("registered font family has no name"))?
            .to_string();
        let font =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes.to_vec()), 0);
        Ok(Self {
            font_ctx,
            family_name,
            font,
        })
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
struct WidthKey {
    style: RunStyle,
    size_bits: u32,
    text: String,
}

/// Shapes single-line text tokens with parley.
///
/// Widths are cached, since auto-fit measures the same tokens at several sizes.
pub struct TextEngine {
    faces: [StyleFace; 3],
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    widths: HashMap<WidthKey, f32>,
}

impl TextEngine {
    pub fn new(fonts: &FontSet) -> SlidecastResult<Self> {
        Ok(Self {
            faces: [
                StyleFace::new(RunStyle::Normal, &fonts.face(RunStyle::Normal).bytes)?,
                StyleFace::new(RunStyle::Bold, &fonts.face(RunStyle::Bold).bytes)?,
                StyleFace::new(RunStyle::Italic, &fonts.face(RunStyle::Italic).bytes)?,
            ],
            layout_ctx: parley::LayoutContext::new(),
            widths: HashMap::new(),
        })
    }

    fn slot(style: RunStyle) -> usize {
        match style {
            RunStyle::Normal => 0,
            RunStyle::Bold => 1,
            RunStyle::Italic => 2,
        }
    }

    /// Glyph source for rasterizing runs of `style`.
    pub fn font_data(&self, style: RunStyle) -> &vello_cpu::peniko::FontData {
        &self.faces[Self::slot(style)].font
    }

    /// Lay out `text` on a single line. Line breaks inside the token are flattened to spaces.
    pub fn layout(
        &mut self,
        text: &str,
        style: RunStyle,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> SlidecastResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(SlidecastError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        let flat: String = text
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect();

        let face = &mut self.faces[Self::slot(style)];
        let family_name = face.family_name.clone();
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut face.font_ctx, &flat, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(&flat);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

impl TextMeasure for TextEngine {
    fn measure(&mut self, text: &str, style: RunStyle, size_px: f32) -> SlidecastResult<f32> {
        let key = WidthKey {
            style,
            size_bits: size_px.to_bits(),
            text: text.to_string(),
        };
        if let Some(w) = self.widths.get(&key) {
            return Ok(*w);
        }
        let layout = self.layout(text, style, size_px, TextBrushRgba8::default())?;
        let w = layout
            .lines()
            .map(|line| line.metrics().advance)
            .fold(0.0f32, f32::max);
        self.widths.insert(key, w);
        Ok(w)
    }
}
