use std::path::Path;

use anyhow::Context as _;

use crate::config::MAX_LINES;
use crate::foundation::error::{SlidecastError, SlidecastResult};
use crate::script::timestamp::parse_timestamp_value;

/// Raw script document as stored in `json/<id>.json`.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ScriptDoc {
    /// Narration audio: an `http(s)` URL or a local path.
    #[serde(default)]
    pub mp3: Option<String>,
    #[serde(default)]
    pub entries: Vec<RawEntry>,
}

/// One entry as authored. Every field may be missing.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct RawEntry {
    #[serde(default = "default_timestamp")]
    pub timestamp: serde_json::Value,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub explanation: String,
    /// Newline separated. The first line is a title and never rendered.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub slide_content: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = serde::Deserialize::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

fn default_timestamp() -> serde_json::Value {
    serde_json::Value::String("0_00".to_string())
}

/// Parsed, immutable script entry.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptEntry {
    /// 0-based position in the source document; slide images are keyed by `index + 1`.
    pub index: usize,
    /// Start time in seconds.
    pub timestamp: f64,
    pub explanation: String,
    /// Right-column lines, verbatim, at most [`MAX_LINES`].
    pub slide_lines: Vec<String>,
}

impl ScriptEntry {
    pub fn from_raw(index: usize, raw: &RawEntry) -> Self {
        Self {
            index,
            timestamp: parse_timestamp_value(&raw.timestamp),
            explanation: raw.explanation.clone(),
            slide_lines: slide_lines_from_content(&raw.slide_content),
        }
    }

    /// 1-based number used for the slide image file name.
    pub fn slide_number(&self) -> usize {
        self.index + 1
    }
}

/// Drop the title line and keep the next [`MAX_LINES`] lines verbatim.
pub fn slide_lines_from_content(content: &str) -> Vec<String> {
    content
        .split('\n')
        .skip(1)
        .take(MAX_LINES)
        .map(str::to_string)
        .collect()
}

/// A loaded script: the audio reference plus entries sorted by start time.
#[derive(Clone, Debug)]
pub struct Script {
    pub mp3: Option<String>,
    pub entries: Vec<ScriptEntry>,
}

impl Script {
    /// Parse entries and stably sort them by timestamp. Ties keep input order.
    pub fn from_doc(doc: &ScriptDoc) -> SlidecastResult<Self> {
        if doc.entries.is_empty() {
            return Err(SlidecastError::input_missing("no entries in script JSON"));
        }
        let mut entries: Vec<ScriptEntry> = doc
            .entries
            .iter()
            .enumerate()
            .map(|(i, raw)| ScriptEntry::from_raw(i, raw))
            .collect();
        entries.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));

        Ok(Self {
            mp3: doc.mp3.clone().filter(|s| !s.trim().is_empty()),
            entries,
        })
    }

    pub fn from_json_str(text: &str) -> SlidecastResult<Self> {
        let doc: ScriptDoc = serde_json::from_str(text)
            .map_err(|e| SlidecastError::serde(format!("parse script JSON: {e}")))?;
        Self::from_doc(&doc)
    }

    pub fn from_path(path: &Path) -> SlidecastResult<Self> {
        if !path.is_file() {
            return Err(SlidecastError::input_missing(format!(
                "script JSON not found: {}",
                path.display()
            )));
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read script '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn timestamps(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.timestamp).collect()
    }

    /// Start time of the earliest slide; the audio track is cut from here.
    pub fn first_timestamp(&self) -> f64 {
        self.entries.first().map(|e| e.timestamp).unwrap_or(0.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/model.rs"]
mod tests;
