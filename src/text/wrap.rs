use crate::text::markup::{Run, RunStyle};

/// One styled token placed on a wrapped line.
#[derive(Clone, Debug, PartialEq)]
pub struct LineToken {
    pub text: String,
    pub style: RunStyle,
    /// Measured advance in px.
    pub width: f32,
}

/// A line of tokens whose widths sum to at most the wrap width (a single oversize token may
/// exceed it).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WrappedLine {
    pub tokens: Vec<LineToken>,
}

impl WrappedLine {
    pub fn width(&self) -> f32 {
        self.tokens.iter().map(|t| t.width).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Plain text of the line, markers already stripped.
    pub fn text(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }
}

/// Split text into alternating whitespace / non-whitespace tokens.
pub fn split_tokens(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;
    for (i, ch) in text.char_indices() {
        let space = ch.is_whitespace();
        match in_space {
            Some(prev) if prev != space => {
                out.push(&text[start..i]);
                start = i;
            }
            _ => {}
        }
        in_space = Some(space);
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}

/// Greedy word wrap of styled runs into `max_width` px.
///
/// `measure` returns the advance of a token rendered in a style. Tokens are appended while the
/// running width stays within `max_width`. Whitespace may always open an empty line, and a token
/// that does not fit starts the next line. The result always holds at least one line.
pub fn wrap_runs<F>(runs: &[Run], max_width: f32, mut measure: F) -> Vec<WrappedLine>
where
    F: FnMut(&str, RunStyle) -> f32,
{
    let mut lines = Vec::new();
    let mut cur = WrappedLine::default();
    let mut cur_w = 0.0f32;

    for run in runs {
        for tok in split_tokens(&run.text) {
            let w = measure(tok, run.style);
            let is_space = tok.chars().all(char::is_whitespace);
            let fits = cur_w + w <= max_width;
            // Never emit an empty line ahead of an oversize first token.
            if !(fits || (is_space && cur.is_empty())) && !cur.is_empty() {
                lines.push(std::mem::take(&mut cur));
                cur_w = 0.0;
            }
            cur.tokens.push(LineToken {
                text: tok.to_string(),
                style: run.style,
                width: w,
            });
            cur_w += w;
        }
    }

    if !cur.is_empty() || lines.is_empty() {
        lines.push(cur);
    }
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
