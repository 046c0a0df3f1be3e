use super::*;

#[test]
fn default_boxes_match_stock_layout() {
    let cfg = RenderConfig::default();
    assert_eq!(
        cfg.left_box(),
        PanelBox {
            x: 0,
            y: 0,
            width: 284,
            height: 480
        }
    );
    assert_eq!(
        cfg.text_box(),
        PanelBox {
            x: 298,
            y: 14,
            width: 542,
            height: 452
        }
    );
    assert!(cfg.validate().is_ok());
}

#[test]
fn partial_json_overrides_only_named_fields() {
    let cfg: RenderConfig = serde_json::from_str(
        r##"{ "base_font_size": 24, "theme": { "bold": "#ff0000" }, "animation": { "text_stagger": 0.5 } }"##,
    )
    .unwrap();
    assert_eq!(cfg.base_font_size, 24);
    assert_eq!(cfg.theme.bold, Rgb8::new(255, 0, 0));
    assert_eq!(cfg.theme.italic, Theme::default().italic);
    assert_eq!(cfg.animation.text_stagger, 0.5);
    assert_eq!(cfg.animation.text_fade, 0.60);
    assert_eq!(cfg.canvas.width, 854);
}

#[test]
fn unknown_fields_are_rejected() {
    let res: Result<RenderConfig, _> = serde_json::from_str(r#"{ "base_font": 24 }"#);
    assert!(res.is_err());
}

#[test]
fn validation_catches_bad_values() {
    let mut cfg = RenderConfig::default();
    cfg.layout.left_width_px = 900;
    assert!(cfg.validate().is_err());

    let mut cfg = RenderConfig::default();
    cfg.layout.shrink_factor = 1.0;
    assert!(cfg.validate().is_err());

    let mut cfg = RenderConfig::default();
    cfg.animation.min_layer_sec = 0.0;
    assert!(cfg.validate().is_err());

    let mut cfg = RenderConfig::default();
    cfg.min_slide_sec = -1.0;
    assert!(cfg.validate().is_err());

    let mut cfg = RenderConfig::default();
    cfg.base_font_size = 4_000_000_000;
    assert!(cfg.validate().is_err());
    cfg.base_font_size = 480;
    assert!(cfg.validate().is_ok());
}

#[test]
fn from_path_reads_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cfg.json");
    std::fs::write(&path, r#"{ "min_font_size": 10 }"#).unwrap();
    let cfg = RenderConfig::from_path(&path).unwrap();
    assert_eq!(cfg.min_font_size, 10);

    let missing = RenderConfig::from_path(&dir.path().join("nope.json"));
    assert!(missing.is_err());
}

#[test]
fn easing_is_configurable_by_name() {
    let cfg: RenderConfig =
        serde_json::from_str(r#"{ "animation": { "easing": "linear" } }"#).unwrap();
    assert_eq!(cfg.animation.easing, Ease::Linear);
    assert_eq!(RenderConfig::default().animation.easing, Ease::OutCubic);
}
