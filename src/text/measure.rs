use crate::foundation::error::SlidecastResult;
use crate::text::markup::RunStyle;

/// Width of the crude per-character estimate, as a fraction of the font size.
pub const ESTIMATE_ADVANCE_RATIO: f32 = 0.6;

/// Horizontal advance of a text token rendered in a given style and size.
pub trait TextMeasure {
    fn measure(&mut self, text: &str, style: RunStyle, size_px: f32) -> SlidecastResult<f32>;
}

/// `chars * size * 0.6`, used when real measurement is unavailable.
pub fn estimate_width(text: &str, size_px: f32) -> f32 {
    text.chars().count() as f32 * size_px * ESTIMATE_ADVANCE_RATIO
}

/// Deterministic measurer backed by [`estimate_width`]. Style is ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct EstimateMeasure;

impl TextMeasure for EstimateMeasure {
    fn measure(&mut self, text: &str, _style: RunStyle, size_px: f32) -> SlidecastResult<f32> {
        Ok(estimate_width(text, size_px))
    }
}

/// Measure with `m`, falling back to [`estimate_width`] on error or a non-finite result.
pub fn measure_or_estimate(
    m: &mut dyn TextMeasure,
    text: &str,
    style: RunStyle,
    size_px: f32,
) -> f32 {
    match m.measure(text, style, size_px) {
        Ok(w) if w.is_finite() && w >= 0.0 => w,
        Ok(w) => {
            tracing::warn!(text, ?style, size_px, width = w, "bad text measurement, estimating");
            estimate_width(text, size_px)
        }
        Err(err) => {
            tracing::warn!(text, ?style, size_px, %err, "text measurement failed, estimating");
            estimate_width(text, size_px)
        }
    }
}
