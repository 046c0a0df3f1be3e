use super::*;
use crate::encode::sink::InMemorySink;
use crate::fonts::{CandidatePaths, FontFace};

fn script(json: &str) -> Script {
    Script::from_json_str(json).unwrap()
}

fn three_slides() -> Script {
    script(
        r#"{"entries": [
            {"timestamp": "0_12", "explanation": "c", "slide_content": "T\nthree"},
            {"timestamp": "0:02", "explanation": "a", "slide_content": "T\none"},
            {"timestamp": "0_05", "explanation": "b", "slide_content": "T\ntwo"}
        ]}"#,
    )
}

#[test]
fn project_layout_paths() {
    let p = Project::new("/data", "lesson");
    assert_eq!(p.script_path(), PathBuf::from("/data/json/lesson.json"));
    assert_eq!(p.image_path(3), PathBuf::from("/data/images/lesson/3.png"));
    assert_eq!(p.audio_dir(), PathBuf::from("/data/audio"));
}

#[test]
fn plan_sorts_slides_and_cuts_frames() {
    let plan = plan_render(
        &three_slides(),
        20.0,
        &RenderConfig::default(),
        RenderVariant::Static,
    )
    .unwrap();

    assert_eq!(plan.audio_start, 2.0);
    let starts: Vec<f64> = plan.slides.iter().map(|s| s.timing.start).collect();
    assert_eq!(starts, vec![2.0, 5.0, 12.0]);
    let durations: Vec<f64> = plan.slides.iter().map(|s| s.timing.duration).collect();
    assert_eq!(durations, vec![3.0, 7.0, 8.0]);
    assert_eq!(plan.total_duration, 18.0);
    assert_eq!(plan.total_frames, 540);

    let frames: Vec<u64> = plan.slides.iter().map(|s| s.span.frames).collect();
    assert_eq!(frames, vec![90, 210, 240]);
    assert_eq!(plan.slides[1].span.start, FrameIndex(90));
    assert_eq!(plan.slides[0].entry.slide_number(), 2);
}

#[test]
fn animated_plan_rejects_audio_shorter_than_first_timestamp() {
    let s = three_slides();
    let err = plan_render(&s, 1.5, &RenderConfig::default(), RenderVariant::Animated).unwrap_err();
    assert!(err.is_input_missing(), "{err}");

    // Static renders go ahead with floored durations.
    let plan = plan_render(&s, 1.5, &RenderConfig::default(), RenderVariant::Static).unwrap();
    assert_eq!(plan.slides[2].timing.duration, 1.0);
}

#[test]
fn render_into_memory_sink() {
    let fonts = match CandidatePaths::system().resolve() {
        Ok(f) => f,
        Err(err) => {
            eprintln!("skipping: {err}");
            return;
        }
    };
    let mut cfg = RenderConfig::default();
    cfg.fps = Fps::new(2, 1).unwrap();
    let s = script(
        r#"{"entries": [{"timestamp": 0, "explanation": "Hello **world**", "slide_content": "Title\nLine one"}]}"#,
    );
    let plan = plan_render(&s, 3.0, &cfg, RenderVariant::Animated).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let project = Project::new(dir.path(), "missing");

    let mut sink = InMemorySink::new();
    let report = render_plan_to_sink(
        &project,
        &plan,
        &fonts,
        &cfg,
        RenderVariant::Animated,
        &mut sink,
        None,
    )
    .unwrap();

    assert!(sink.is_finished());
    assert_eq!(sink.frames().len(), 6);
    assert_eq!(report.frames, 6);
    assert_eq!(report.slides.len(), 1);
    assert!(!report.slides[0].has_image);
    assert_eq!(report.slides[0].explanation_font_size, 20);
    let indices: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(indices, (0..6).collect::<Vec<_>>());
}

#[test]
fn unusable_font_fails_before_the_sink_starts() {
    let cfg = RenderConfig::default();
    let plan = plan_render(&three_slides(), 20.0, &cfg, RenderVariant::Static).unwrap();
    let fonts = FontSet::new(FontFace::from_bytes(vec![0u8; 16]), None, None);
    let dir = tempfile::tempdir().unwrap();
    let mut sink = InMemorySink::new();
    let err = render_plan_to_sink(
        &Project::new(dir.path(), "x"),
        &plan,
        &fonts,
        &cfg,
        RenderVariant::Static,
        &mut sink,
        None,
    )
    .unwrap_err();
    assert!(matches!(err, SlidecastError::Font(_)), "{err}");
    assert!(sink.config().is_none());
    assert!(sink.frames().is_empty());
}

#[test]
fn slide_preview_requires_an_existing_slide() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("json")).unwrap();
    std::fs::write(
        dir.path().join("json/demo.json"),
        r#"{"entries": [{"timestamp": 0, "explanation": "x", "slide_content": "T"}]}"#,
    )
    .unwrap();
    let err = render_slide_png(
        &Project::new(dir.path(), "demo"),
        4,
        0.0,
        &RenderConfig::default(),
        RenderVariant::Static,
        &CandidatePaths::default(),
        &dir.path().join("out.png"),
    )
    .unwrap_err();
    assert!(err.to_string().contains("slide 4"), "{err}");
}
