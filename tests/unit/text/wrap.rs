use super::*;
use crate::text::markup::tokenize_markup;
use proptest::prelude::*;

fn ten_px(tok: &str, _style: RunStyle) -> f32 {
    tok.chars().count() as f32 * 10.0
}

fn texts(lines: &[WrappedLine]) -> Vec<String> {
    lines.iter().map(WrappedLine::text).collect()
}

#[test]
fn split_alternates_space_and_words() {
    assert_eq!(
        split_tokens("  hello  big\tworld "),
        vec!["  ", "hello", "  ", "big", "\t", "world", " "]
    );
    assert!(split_tokens("").is_empty());
}

#[test]
fn short_text_is_one_line_in_order() {
    let runs = tokenize_markup("Hello **world**");
    let lines = wrap_runs(&runs, 500.0, ten_px);
    assert_eq!(lines.len(), 1);
    let toks: Vec<(&str, RunStyle)> = lines[0]
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
    assert_eq!(lines[0].width(), 110.0);
}

#[test]
fn breaks_before_token_that_overflows() {
    // "aaa bbb ccc" at 10px/char, width 70: "aaa bbb" = 70 fits, " " would overflow.
    let runs = tokenize_markup("aaa bbb ccc");
    let lines = wrap_runs(&runs, 70.0, ten_px);
    assert_eq!(texts(&lines), vec!["aaa bbb", " ccc"]);
    assert!(lines.iter().all(|l| l.width() <= 70.0));
}

#[test]
fn oversize_token_takes_its_own_line_without_empty_lines() {
    let runs = tokenize_markup("abcdefghij xy");
    let lines = wrap_runs(&runs, 50.0, ten_px);
    assert_eq!(texts(&lines), vec!["abcdefghij", " xy"]);
    assert!(lines.iter().all(|l| !l.is_empty()));
}

#[test]
fn whitespace_on_empty_line_never_loops() {
    let runs = tokenize_markup("   ");
    let lines = wrap_runs(&runs, 5.0, ten_px);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text(), "   ");
}

#[test]
fn empty_input_yields_one_empty_line() {
    let lines = wrap_runs(&[], 100.0, ten_px);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].is_empty());
    assert_eq!(lines[0].width(), 0.0);
}

#[test]
fn styles_are_measured_separately() {
    let runs = tokenize_markup("ab **cd**");
    let lines = wrap_runs(&runs, 1000.0, |tok, style| {
        let per = if style == RunStyle::Bold { 20.0 } else { 10.0 };
        tok.chars().count() as f32 * per
    });
    assert_eq!(lines[0].width(), 20.0 + 10.0 + 40.0);
}

proptest! {
    #[test]
    fn wrapping_preserves_text_order(s in "[a-z ]{0,60}", width in 10.0f32..200.0) {
        let runs = tokenize_markup(&s);
        let lines = wrap_runs(&runs, width, ten_px);
        prop_assert!(!lines.is_empty());
        let joined: String = lines.iter().map(WrappedLine::text).collect();
        prop_assert_eq!(joined, s);
    }

    #[test]
    fn multi_token_lines_fit(s in "[a-z ]{0,60}", width in 10.0f32..200.0) {
        let lines = wrap_runs(&tokenize_markup(&s), width, ten_px);
        for line in &lines {
            if line.tokens.len() > 1 {
                prop_assert!(line.width() <= width || line.tokens[0].text.trim().is_empty());
            }
        }
    }
}
