use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SlidecastError::input_missing("x")
            .to_string()
            .contains("missing input:")
    );
    assert!(
        SlidecastError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(SlidecastError::font("x").to_string().contains("font error:"));
    assert!(
        SlidecastError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        SlidecastError::encode("x")
            .to_string()
            .contains("encode error:")
    );
    assert!(
        SlidecastError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SlidecastError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn input_missing_is_classified() {
    assert!(SlidecastError::input_missing("no entries").is_input_missing());
    assert!(!SlidecastError::validation("bad fps").is_input_missing());
}
