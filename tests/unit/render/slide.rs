use super::*;
use crate::assets::image::place_in_panel;
use crate::fonts::{CandidatePaths, FontResolver};
use crate::script::model::slide_lines_from_content;

fn system_fonts() -> Option<FontSet> {
    match CandidatePaths::system().resolve() {
        Ok(f) => Some(f),
        Err(err) => {
            eprintln!("skipping: {err}");
            None
        }
    }
}

fn entry(explanation: &str, content: &str) -> ScriptEntry {
    ScriptEntry {
        index: 0,
        timestamp: 0.0,
        explanation: explanation.to_string(),
        slide_lines: slide_lines_from_content(content),
    }
}

#[test]
fn still_follows_the_two_column_layout() {
    let Some(fonts) = system_fonts() else {
        return;
    };
    let cfg = RenderConfig::default();
    let mut renderer = SlideRenderer::new(&cfg, &fonts).unwrap();

    let green = image::RgbaImage::from_pixel(568, 284, image::Rgba([0, 200, 0, 255]));
    let placed = place_in_panel(&green, cfg.left_box());
    let slide = renderer.prepare(
        &entry("Hello **world**", "Title\nLine one\nLine two"),
        Some(placed),
    );
    assert_eq!(slide.layout.line_blocks.len(), 2);
    assert_eq!(slide.layout.line_blocks[0][0].text(), "Line one");

    let frame = renderer.render_still(&slide).unwrap();
    assert_eq!((frame.width, frame.height), (854, 480));

    // Image centered in the left panel, black letterbox above it.
    assert_eq!(frame.pixel(142, 240), Some([0, 200, 0, 255]));
    assert_eq!(frame.pixel(142, 10), Some([0, 0, 0, 255]));
    // Padding between the columns stays background.
    assert_eq!(frame.pixel(290, 240), Some([0, 0, 0, 255]));

    let callout = renderer.callout_rect(&slide.layout);
    let top = callout.y0 as u32;
    let border = cfg.theme.callout_border;
    assert_eq!(frame.pixel(300, top + 1), Some([border.r, border.g, border.b, 255]));
    let bg = cfg.theme.callout_bg;
    assert_eq!(
        frame.pixel(839, callout.y1 as u32 - 1),
        Some([bg.r, bg.g, bg.b, 255])
    );
}

#[test]
fn blank_image_panel_and_empty_text_render() {
    let Some(fonts) = system_fonts() else {
        return;
    };
    let mut renderer = SlideRenderer::new(&RenderConfig::default(), &fonts).unwrap();
    let slide = renderer.prepare(&entry("", ""), None);
    let frame = renderer.render_still(&slide).unwrap();
    assert_eq!(frame.pixel(142, 240), Some([0, 0, 0, 255]));
}

#[test]
fn renderer_rejects_invalid_config() {
    let fonts = FontSet::new(crate::fonts::FontFace::from_bytes(vec![0u8; 4]), None, None);
    let mut cfg = RenderConfig::default();
    cfg.layout.shrink_factor = 2.0;
    assert!(SlideRenderer::new(&cfg, &fonts).is_err());
}
