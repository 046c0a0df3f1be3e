/// Emphasis style of a text run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
pub enum RunStyle {
    #[default]
    Normal,
    Bold,
    Italic,
}

/// Contiguous span of text sharing one style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub style: RunStyle,
}

impl Run {
    pub fn new(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Split `**bold**` and `*italic*` spans out of `text`.
///
/// Markers do not nest: the first closing marker wins. A marker without a partner stays in the
/// surrounding normal text as a literal character. Adjacent normal text is merged and empty runs
/// are dropped.
pub fn tokenize_markup(text: &str) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut plain = String::new();
    let mut i = 0;

    while i < text.len() {
        let rest = &text[i..];

        if let Some(after) = rest.strip_prefix("**") {
            match after.find("**") {
                Some(j) => {
                    flush_plain(&mut runs, &mut plain);
                    push_run(&mut runs, &after[..j], RunStyle::Bold);
                    i += 2 + j + 2;
                }
                None => {
                    plain.push_str("**");
                    i += 2;
                }
            }
            continue;
        }

        if let Some(after) = rest.strip_prefix('*') {
            match after.find('*') {
                Some(j) if j > 0 => {
                    flush_plain(&mut runs, &mut plain);
                    push_run(&mut runs, &after[..j], RunStyle::Italic);
                    i += 1 + j + 1;
                }
                _ => {
                    plain.push('*');
                    i += 1;
                }
            }
            continue;
        }

        let end = rest.find('*').unwrap_or(rest.len());
        plain.push_str(&rest[..end]);
        i += end;
    }

    flush_plain(&mut runs, &mut plain);
    runs
}

fn flush_plain(runs: &mut Vec<Run>, plain: &mut String) {
    if !plain.is_empty() {
        runs.push(Run::new(std::mem::take(plain), RunStyle::Normal));
    }
}

fn push_run(runs: &mut Vec<Run>, text: &str, style: RunStyle) {
    if !text.is_empty() {
        runs.push(Run::new(text, style));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/markup.rs"]
mod tests;
