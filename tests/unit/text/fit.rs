use super::*;
use crate::text::markup::RunStyle;
use crate::text::measure::EstimateMeasure;

fn params() -> FitParams {
    FitParams::from_config(&RenderConfig::default())
}

fn lines(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn default_params_match_stock_layout() {
    let p = params();
    assert_eq!(
        p.text_box,
        PanelBox {
            x: 298,
            y: 14,
            width: 542,
            height: 452
        }
    );
    assert_eq!(p.base_font_size, 20);
    assert_eq!(p.min_font_size, 12);
}

#[test]
fn tall_box_accepts_first_iteration() {
    let r = fit_layout(
        &mut EstimateMeasure,
        "Hello **world**",
        &lines(&["Line one", "Line two"]),
        &params(),
    );
    assert_eq!(r.iterations, 1);
    assert_eq!(r.explanation_font_size, 20);
    assert_eq!(r.lines_font_size, 18);
    assert_eq!(r.explanation_line_height, 26);
    assert_eq!(r.lines_line_height, 22);
    assert_eq!(r.callout_height, 26 + 16);
    assert_eq!(r.block_total_height, 42 + 10 + 44);
    assert_eq!(r.vertical_start_offset, 14 + (452 - 96) / 2);
    assert!(!r.overflow);

    assert_eq!(r.explanation_wrapped.len(), 1);
    let toks: Vec<(&str, RunStyle)> = r.explanation_wrapped[0]
        .tokens
        .iter()
        .map(|t| (t.text.as_str(), t.style))
        .collect();
    assert_eq!(
        toks,
        vec![
            ("Hello", RunStyle::Normal),
            (" ", RunStyle::Normal),
            ("world", RunStyle::Bold)
        ]
    );
    assert_eq!(r.line_blocks[0][0].text(), "Line one");
    assert_eq!(r.line_blocks[1][0].text(), "Line two");
}

#[test]
fn block_tops_stack_under_the_callout() {
    let r = fit_layout(
        &mut EstimateMeasure,
        "x",
        &lines(&["a", "b", "c"]),
        &params(),
    );
    let tops = r.block_tops();
    let first = r.vertical_start_offset + r.callout_height + 10;
    assert_eq!(tops, vec![first, first + 22, first + 44]);
}

#[test]
fn tiny_box_terminates_at_floor() {
    let mut p = params();
    p.text_box.height = 10;
    let r = fit_layout(&mut EstimateMeasure, "some words", &lines(&["x"]), &p);
    assert_eq!(r.explanation_font_size, 12);
    assert_eq!(r.lines_font_size, 12);
    // 20/18 -> 18/16 -> 16/15 -> 15/14 -> 14/13 -> 13/12 -> 12/12
    assert_eq!(r.iterations, 7);
    assert!(r.overflow);
    assert_eq!(r.vertical_start_offset, p.text_box.y);
}

#[test]
fn oversized_fonts_saturate_instead_of_overflowing() {
    let mut p = params();
    p.base_font_size = 4_000_000_000;
    p.min_font_size = 4_000_000_000;
    let r = fit_layout(&mut EstimateMeasure, "two words", &lines(&["a line"]), &p);
    assert_eq!(r.iterations, 1);
    assert!(r.overflow);
    assert_eq!(r.block_total_height, u32::MAX);
    assert_eq!(r.vertical_start_offset, p.text_box.y);
    assert_eq!(r.block_tops(), vec![u32::MAX]);
}

#[test]
fn shrinks_until_content_fits() {
    let long = "word ".repeat(120);
    let r = fit_layout(
        &mut EstimateMeasure,
        &long,
        &lines(&["one", "two", "three", "four"]),
        &params(),
    );
    assert!(r.iterations > 1);
    assert!(r.explanation_font_size < 20);
    assert!(r.block_total_height <= 452 || r.explanation_font_size == 12);
    for line in &r.explanation_wrapped {
        assert!(line.width() <= 522.0 || line.tokens.len() == 1);
    }
}

#[test]
fn empty_slide_still_reserves_callout_line() {
    let r = fit_layout(&mut EstimateMeasure, "", &[], &params());
    assert_eq!(r.explanation_wrapped.len(), 1);
    assert!(r.line_blocks.is_empty());
    assert_eq!(r.block_total_height, 26 + 16 + 10);
    assert!(r.block_tops().is_empty());
}
