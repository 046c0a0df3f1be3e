//! Render configuration.
//!
//! Every field has a default matching the stock 854x480 layout, so a config file only needs to
//! name the values it overrides. CLI flags are applied on top of the loaded file.

use std::path::Path;

use anyhow::Context as _;

use crate::animation::ease::Ease;
use crate::foundation::core::{Canvas, Fps, Rgb8};
use crate::foundation::error::{SlidecastError, SlidecastResult};

/// Minimum on-screen time for any slide, in seconds.
pub const MIN_SLIDE_SEC: f64 = 1.0;
/// Maximum number of right-column text lines taken from `slide_content`.
pub const MAX_LINES: usize = 4;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub canvas: Canvas,
    pub fps: Fps,
    /// Starting explanation font size in px; line text starts at 90% of this.
    pub base_font_size: u32,
    /// Floor for both font sizes during auto-fit.
    pub min_font_size: u32,
    /// Minimum slide duration in seconds.
    pub min_slide_sec: f64,
    pub theme: Theme,
    pub layout: LayoutMetrics,
    pub animation: AnimationTimings,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 854,
                height: 480,
            },
            fps: Fps::default(),
            base_font_size: 20,
            min_font_size: 12,
            min_slide_sec: MIN_SLIDE_SEC,
            theme: Theme::default(),
            layout: LayoutMetrics::default(),
            animation: AnimationTimings::default(),
        }
    }
}

impl RenderConfig {
    /// Load a (partial) config from a JSON file.
    pub fn from_path(path: &Path) -> SlidecastResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&text).map_err(|e| {
            SlidecastError::serde(format!("parse config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> SlidecastResult<()> {
        self.canvas.validate()?;
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(SlidecastError::validation("fps must be non-zero"));
        }
        if self.base_font_size == 0 || self.min_font_size == 0 {
            return Err(SlidecastError::validation("font sizes must be > 0"));
        }
        if self.base_font_size > self.canvas.height || self.min_font_size > self.canvas.height {
            return Err(SlidecastError::validation(
                "font sizes must not exceed the canvas height",
            ));
        }
        if !self.min_slide_sec.is_finite() || self.min_slide_sec <= 0.0 {
            return Err(SlidecastError::validation(
                "min_slide_sec must be finite and > 0",
            ));
        }
        let l = &self.layout;
        if l.left_width_px >= self.canvas.width {
            return Err(SlidecastError::validation(
                "left panel must be narrower than the canvas",
            ));
        }
        let right_w = self.canvas.width - l.left_width_px;
        if 2 * l.padding_px + l.callout_wrap_inset_px >= right_w
            || 2 * l.padding_px >= self.canvas.height
        {
            return Err(SlidecastError::validation(
                "padding leaves no room for the text column",
            ));
        }
        if !(l.shrink_factor > 0.0 && l.shrink_factor < 1.0) {
            return Err(SlidecastError::validation("shrink_factor must be in (0, 1)"));
        }
        self.animation.validate()
    }

    /// Left image region.
    pub fn left_box(&self) -> PanelBox {
        PanelBox {
            x: 0,
            y: 0,
            width: self.layout.left_width_px,
            height: self.canvas.height,
        }
    }

    /// Padded text region of the right column.
    pub fn text_box(&self) -> PanelBox {
        let l = &self.layout;
        let right_w = self.canvas.width - l.left_width_px;
        PanelBox {
            x: l.left_width_px + l.padding_px,
            y: l.padding_px,
            width: right_w - 2 * l.padding_px,
            height: self.canvas.height - 2 * l.padding_px,
        }
    }
}

/// Axis-aligned pixel region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Theme {
    pub background: Rgb8,
    pub text: Rgb8,
    pub bullet: Rgb8,
    pub bold: Rgb8,
    pub italic: Rgb8,
    pub callout_bg: Rgb8,
    pub callout_border: Rgb8,
}

impl Default for Theme {
    fn default() -> Self {
        let text = Rgb8::new(226, 232, 240);
        Self {
            background: Rgb8::new(0, 0, 0),
            text,
            bullet: text,
            bold: Rgb8::new(99, 179, 237),
            italic: Rgb8::new(250, 240, 137),
            callout_bg: Rgb8::new(26, 32, 44),
            callout_border: Rgb8::new(66, 153, 225),
        }
    }
}

/// Fixed pixel metrics of the two-column layout and the auto-fit constants.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutMetrics {
    pub left_width_px: u32,
    pub padding_px: u32,
    /// Horizontal space the callout takes away from the wrap width.
    pub callout_wrap_inset_px: u32,
    /// Text origin inside the callout.
    pub callout_text_x_px: u32,
    pub callout_text_y_px: u32,
    /// Vertical padding added to the callout text height.
    pub callout_pad_px: u32,
    pub callout_border_px: u32,
    /// Gap between the callout and the first line block.
    pub block_gap_px: u32,
    pub lines_size_ratio: f64,
    pub explanation_line_height: f64,
    pub lines_line_height: f64,
    pub shrink_factor: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            left_width_px: 854 / 3,
            padding_px: 14,
            callout_wrap_inset_px: 20,
            callout_text_x_px: 10,
            callout_text_y_px: 8,
            callout_pad_px: 16,
            callout_border_px: 5,
            block_gap_px: 10,
            lines_size_ratio: 0.90,
            explanation_line_height: 1.3,
            lines_line_height: 1.25,
            shrink_factor: 0.94,
        }
    }
}

/// Per-layer timings of the animated variant, in seconds and pixels.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationTimings {
    pub image_delay: f64,
    pub image_fade: f64,
    pub image_slide_px: f64,
    pub callout_delay: f64,
    pub callout_fade: f64,
    pub callout_slide_px: f64,
    pub text_start_delay: f64,
    pub text_stagger: f64,
    pub text_fade: f64,
    pub text_slide_px: f64,
    /// Lifetime floor for layers whose delay runs past the end of the slide.
    pub min_layer_sec: f64,
    pub easing: Ease,
}

impl Default for AnimationTimings {
    fn default() -> Self {
        Self {
            image_delay: 0.0,
            image_fade: 0.70,
            image_slide_px: 12.0,
            callout_delay: 0.20,
            callout_fade: 0.35,
            callout_slide_px: 10.0,
            text_start_delay: 3.5,
            text_stagger: 1.40,
            text_fade: 0.60,
            text_slide_px: 12.0,
            min_layer_sec: 0.1,
            easing: Ease::OutCubic,
        }
    }
}

impl AnimationTimings {
    pub fn validate(&self) -> SlidecastResult<()> {
        let non_negative = [
            ("image_delay", self.image_delay),
            ("image_fade", self.image_fade),
            ("callout_delay", self.callout_delay),
            ("callout_fade", self.callout_fade),
            ("text_start_delay", self.text_start_delay),
            ("text_stagger", self.text_stagger),
            ("text_fade", self.text_fade),
        ];
        for (name, v) in non_negative {
            if !v.is_finite() || v < 0.0 {
                return Err(SlidecastError::validation(format!(
                    "animation.{name} must be finite and >= 0"
                )));
            }
        }
        if !self.min_layer_sec.is_finite() || self.min_layer_sec <= 0.0 {
            return Err(SlidecastError::validation(
                "animation.min_layer_sec must be finite and > 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
