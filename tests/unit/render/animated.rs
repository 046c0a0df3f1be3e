use super::*;
use crate::animation::spec::LayerKind;
use crate::assets::image::place_in_panel;
use crate::config::RenderConfig;
use crate::fonts::{CandidatePaths, FontResolver};
use crate::script::model::{ScriptEntry, slide_lines_from_content};

fn renderer() -> Option<SlideRenderer> {
    let fonts = match CandidatePaths::system().resolve() {
        Ok(f) => f,
        Err(err) => {
            eprintln!("skipping: {err}");
            return None;
        }
    };
    Some(SlideRenderer::new(&RenderConfig::default(), &fonts).unwrap())
}

fn entry() -> ScriptEntry {
    ScriptEntry {
        index: 0,
        timestamp: 0.0,
        explanation: "Hello **world**".to_string(),
        slide_lines: slide_lines_from_content("Title\nLine one\nLine two"),
    }
}

#[test]
fn layers_follow_drawing_order_and_skip_missing_image() {
    let Some(mut r) = renderer() else {
        return;
    };
    let slide = r.prepare(&entry(), None);
    let anim = AnimatedSlide::build(&mut r, &slide, 10.0).unwrap();
    assert_eq!(
        anim.layer_kinds(),
        vec![
            LayerKind::Callout,
            LayerKind::TextBlock(0),
            LayerKind::TextBlock(1)
        ]
    );
    assert!((anim.settled_after() - 5.5).abs() < 1e-9);
}

#[test]
fn callout_fades_in_after_its_delay() {
    let Some(mut r) = renderer() else {
        return;
    };
    let slide = r.prepare(&entry(), None);
    let anim = AnimatedSlide::build(&mut r, &slide, 10.0).unwrap();
    let callout = r.callout_rect(&slide.layout);
    let (x, y) = (300, callout.y0 as u32 + callout.height() as u32 / 2);

    let early = anim.render_at(&r, 0.0).unwrap();
    assert_eq!(early.pixel(x, y), Some([0, 0, 0, 255]));

    let border = r.config().theme.callout_border;
    let settled = anim.render_at(&r, 9.0).unwrap();
    assert_eq!(settled.pixel(x, y), Some([border.r, border.g, border.b, 255]));

    let mid = anim.render_at(&r, 0.3).unwrap().pixel(x, y).unwrap();
    assert!(mid[2] > 0 && mid[2] < border.b, "{mid:?}");
}

#[test]
fn image_slides_in_from_the_left() {
    let Some(mut r) = renderer() else {
        return;
    };
    let cfg = r.config().clone();
    let white = image::RgbaImage::from_pixel(568, 284, image::Rgba([255, 255, 255, 255]));
    let slide = r.prepare(&entry(), Some(place_in_panel(&white, cfg.left_box())));
    let anim = AnimatedSlide::build(&mut r, &slide, 3.0).unwrap();
    assert_eq!(anim.layer_kinds()[0], LayerKind::Image);

    // Right edge of the image is still short of the panel edge early on.
    let early = anim.render_at(&r, 0.05).unwrap();
    assert_eq!(early.pixel(282, 240).map(|p| p[0]), Some(0));
    let late = anim.render_at(&r, 2.0).unwrap();
    assert_eq!(late.pixel(282, 240), Some([255, 255, 255, 255]));
}
