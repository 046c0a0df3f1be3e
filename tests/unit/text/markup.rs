use super::*;
use proptest::prelude::*;

fn pairs(runs: &[Run]) -> Vec<(&str, RunStyle)> {
    runs.iter().map(|r| (r.text.as_str(), r.style)).collect()
}

#[test]
fn bold_span_between_normal_text() {
    let runs = tokenize_markup("a **b** c");
    assert_eq!(
        pairs(&runs),
        vec![
            ("a ", RunStyle::Normal),
            ("b", RunStyle::Bold),
            (" c", RunStyle::Normal)
        ]
    );
}

#[test]
fn italic_span() {
    let runs = tokenize_markup("*lean* in");
    assert_eq!(
        pairs(&runs),
        vec![("lean", RunStyle::Italic), (" in", RunStyle::Normal)]
    );
}

#[test]
fn unterminated_italic_is_literal() {
    assert_eq!(
        pairs(&tokenize_markup("a *b")),
        vec![("a *b", RunStyle::Normal)]
    );
}

#[test]
fn trailing_lone_star_terminates() {
    assert_eq!(
        pairs(&tokenize_markup("price*")),
        vec![("price*", RunStyle::Normal)]
    );
    assert_eq!(pairs(&tokenize_markup("*")), vec![("*", RunStyle::Normal)]);
}

#[test]
fn unterminated_bold_is_literal_and_later_italic_still_parses() {
    assert_eq!(
        pairs(&tokenize_markup("**a *b*")),
        vec![("**a ", RunStyle::Normal), ("b", RunStyle::Italic)]
    );
}

#[test]
fn first_closing_marker_wins() {
    assert_eq!(
        pairs(&tokenize_markup("**x** and **y**")),
        vec![
            ("x", RunStyle::Bold),
            (" and ", RunStyle::Normal),
            ("y", RunStyle::Bold)
        ]
    );
    // No nesting: the italic marker inside bold is kept verbatim.
    assert_eq!(
        pairs(&tokenize_markup("**a *b* c**")),
        vec![("a *b* c", RunStyle::Bold)]
    );
}

#[test]
fn empty_spans_and_input_produce_no_runs() {
    assert!(tokenize_markup("").is_empty());
    assert!(tokenize_markup("****").is_empty());
}

#[test]
fn unicode_text_is_preserved() {
    assert_eq!(
        pairs(&tokenize_markup("héllo **wörld** ✓")),
        vec![
            ("héllo ", RunStyle::Normal),
            ("wörld", RunStyle::Bold),
            (" ✓", RunStyle::Normal)
        ]
    );
}

proptest! {
    #[test]
    fn text_without_markers_is_a_single_normal_run(s in "[^*]{1,40}") {
        let runs = tokenize_markup(&s);
        prop_assert_eq!(runs.len(), 1);
        prop_assert_eq!(runs[0].style, RunStyle::Normal);
        prop_assert_eq!(&runs[0].text, &s);
    }

    #[test]
    fn terminates_and_never_grows_text(s in "[a *]{0,40}") {
        let runs = tokenize_markup(&s);
        let total: usize = runs.iter().map(|r| r.text.len()).sum();
        prop_assert!(total <= s.len());
        prop_assert!(runs.iter().all(|r| !r.text.is_empty()));
    }
}
