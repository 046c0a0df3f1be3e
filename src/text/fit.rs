//! Auto-fit of the right-hand text column.
//!
//! Both font sizes shrink together until the callout plus every line block fits the text box
//! height, or both reach the floor. Sizes strictly decrease until the floor, so the loop is
//! bounded.

use crate::config::{PanelBox, RenderConfig};
use crate::foundation::math::half_slack;
use crate::text::markup::tokenize_markup;
use crate::text::measure::{TextMeasure, measure_or_estimate};
use crate::text::wrap::{WrappedLine, wrap_runs};

/// Inputs of the fit loop, derived from [`RenderConfig`].
#[derive(Clone, Debug, PartialEq)]
pub struct FitParams {
    pub text_box: PanelBox,
    pub base_font_size: u32,
    pub min_font_size: u32,
    pub lines_size_ratio: f64,
    pub explanation_line_height: f64,
    pub lines_line_height: f64,
    pub shrink_factor: f64,
    pub callout_wrap_inset: u32,
    pub callout_pad: u32,
    pub block_gap: u32,
}

impl FitParams {
    pub fn from_config(cfg: &RenderConfig) -> Self {
        let l = &cfg.layout;
        Self {
            text_box: cfg.text_box(),
            base_font_size: cfg.base_font_size,
            min_font_size: cfg.min_font_size,
            lines_size_ratio: l.lines_size_ratio,
            explanation_line_height: l.explanation_line_height,
            lines_line_height: l.lines_line_height,
            shrink_factor: l.shrink_factor,
            callout_wrap_inset: l.callout_wrap_inset_px,
            callout_pad: l.callout_pad_px,
            block_gap: l.block_gap_px,
        }
    }
}

/// Chosen sizes and wrapped content of one slide's text column.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutResult {
    pub explanation_font_size: u32,
    pub lines_font_size: u32,
    pub explanation_line_height: u32,
    pub lines_line_height: u32,
    pub explanation_wrapped: Vec<WrappedLine>,
    /// One wrapped block per slide line.
    pub line_blocks: Vec<Vec<WrappedLine>>,
    pub callout_height: u32,
    /// Callout, gap and all line blocks.
    pub block_total_height: u32,
    /// Absolute y of the callout top.
    pub vertical_start_offset: u32,
    pub iterations: u32,
    /// `true` when the content still exceeds the box at the floor size.
    pub overflow: bool,
    pub(crate) block_gap: u32,
}

impl LayoutResult {
    pub fn block_height(&self, block: usize) -> u32 {
        self.line_blocks
            .get(block)
            .map_or(0, |b| self.lines_line_height.saturating_mul(b.len() as u32))
    }

    /// Absolute y of each line block's first line.
    pub fn block_tops(&self) -> Vec<u32> {
        let mut y = self
            .vertical_start_offset
            .saturating_add(self.callout_height)
            .saturating_add(self.block_gap);
        let mut out = Vec::with_capacity(self.line_blocks.len());
        for i in 0..self.line_blocks.len() {
            out.push(y);
            y = y.saturating_add(self.block_height(i));
        }
        out
    }
}

fn scale_trunc(size: u32, factor: f64) -> u32 {
    (size as f64 * factor).max(0.0) as u32
}

/// Wrap `explanation` and `lines` into the text box, shrinking fonts until they fit.
pub fn fit_layout(
    measure: &mut dyn TextMeasure,
    explanation: &str,
    lines: &[String],
    params: &FitParams,
) -> LayoutResult {
    let expl_runs = tokenize_markup(explanation);
    let line_runs: Vec<_> = lines.iter().map(|l| tokenize_markup(l)).collect();
    let floor = params.min_font_size;
    let box_w = params.text_box.width as f32;
    let box_h = params.text_box.height;
    let expl_w = params
        .text_box
        .width
        .saturating_sub(params.callout_wrap_inset) as f32;

    let mut expl_size = params.base_font_size.max(floor);
    let mut lines_size = scale_trunc(params.base_font_size, params.lines_size_ratio).max(floor);
    let mut iterations = 0u32;

    loop {
        iterations += 1;
        let expl_px = expl_size as f32;
        let lines_px = lines_size as f32;
        let explanation_wrapped = wrap_runs(&expl_runs, expl_w, |tok, style| {
            measure_or_estimate(measure, tok, style, expl_px)
        });
        let line_blocks: Vec<Vec<WrappedLine>> = line_runs
            .iter()
            .map(|runs| {
                wrap_runs(runs, box_w, |tok, style| {
                    measure_or_estimate(measure, tok, style, lines_px)
                })
            })
            .collect();

        let lh_expl = scale_trunc(expl_size, params.explanation_line_height);
        let lh_line = scale_trunc(lines_size, params.lines_line_height);
        let callout_height = lh_expl
            .saturating_mul(explanation_wrapped.len() as u32)
            .saturating_add(params.callout_pad);
        let lines_height = line_blocks.iter().fold(0u32, |acc, b| {
            acc.saturating_add(lh_line.saturating_mul(b.len() as u32))
        });
        let total = callout_height
            .saturating_add(params.block_gap)
            .saturating_add(lines_height);

        let at_floor = expl_size <= floor && lines_size <= floor;
        if total <= box_h || at_floor {
            let overflow = total > box_h;
            if overflow {
                tracing::warn!(
                    total,
                    available = box_h,
                    font_size = expl_size,
                    "text overflows the box at the minimum font size"
                );
            }
            let start = params.text_box.y as i64 + half_slack(box_h as i64, total as i64);
            let result = LayoutResult {
                explanation_font_size: expl_size,
                lines_font_size: lines_size,
                explanation_line_height: lh_expl,
                lines_line_height: lh_line,
                explanation_wrapped,
                line_blocks,
                callout_height,
                block_total_height: total,
                vertical_start_offset: start as u32,
                iterations,
                overflow,
                block_gap: params.block_gap,
            };
            tracing::debug!(
                expl_size,
                lines_size,
                iterations,
                total,
                start_y = result.vertical_start_offset,
                "text column fitted"
            );
            return result;
        }

        expl_size = scale_trunc(expl_size, params.shrink_factor).max(floor);
        lines_size = scale_trunc(lines_size, params.shrink_factor).max(floor);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/fit.rs"]
mod tests;
