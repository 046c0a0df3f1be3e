use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::foundation::error::{SlidecastError, SlidecastResult};

/// Extensions tried, in order, for `audio/<id>.<ext>`.
pub const AUDIO_EXTENSIONS: [&str; 4] = ["mp3", "m4a", "wav", "mp4"];

pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Narration track used for probing and muxing.
///
/// A downloaded track lives in a temporary file that is removed when the source is dropped.
#[derive(Debug)]
pub enum AudioSource {
    Local(PathBuf),
    Downloaded {
        url: String,
        file: tempfile::NamedTempFile,
    },
}

impl AudioSource {
    pub fn path(&self) -> &Path {
        match self {
            Self::Local(p) => p,
            Self::Downloaded { file, .. } => file.path(),
        }
    }
}

/// `true` for `http://` and `https://` references, case-insensitively.
pub fn is_remote(reference: &str) -> bool {
    let lower = reference.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// First existing `audio/<id>.<ext>` under `audio_dir`.
pub fn find_project_audio(audio_dir: &Path, id: &str) -> Option<PathBuf> {
    AUDIO_EXTENSIONS
        .iter()
        .map(|ext| audio_dir.join(format!("{id}.{ext}")))
        .find(|p| p.is_file())
}

/// Resolve the narration track.
///
/// A script reference wins over the project's `audio/` directory. URLs are downloaded.
pub fn resolve_audio(
    script_ref: Option<&str>,
    audio_dir: &Path,
    id: &str,
) -> SlidecastResult<AudioSource> {
    match script_ref {
        Some(r) if is_remote(r) => download_audio(r.trim()),
        Some(r) => {
            let p = PathBuf::from(r);
            if !p.is_file() {
                return Err(SlidecastError::input_missing(format!(
                    "audio file '{}' referenced by the script does not exist",
                    p.display()
                )));
            }
            Ok(AudioSource::Local(p))
        }
        None => find_project_audio(audio_dir, id)
            .map(AudioSource::Local)
            .ok_or_else(|| {
                SlidecastError::input_missing(format!(
                    "no audio: script has no 'mp3' and no {}/{id}.{{{}}} exists",
                    audio_dir.display(),
                    AUDIO_EXTENSIONS.join(",")
                ))
            }),
    }
}

/// Extension of the last URL path segment including the dot, or `.bin`.
pub fn url_suffix(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let after_scheme = path.split_once("://").map_or(path, |(_, rest)| rest);
    let last = match after_scheme.split_once('/') {
        Some((_, p)) => p.rsplit('/').next().unwrap_or(""),
        None => "",
    };
    match last.rfind('.') {
        Some(i) if i > 0 && i + 1 < last.len() => last[i..].to_string(),
        _ => ".bin".to_string(),
    }
}

#[cfg(feature = "download")]
fn download_audio(url: &str) -> SlidecastResult<AudioSource> {
    use anyhow::Context as _;

    tracing::info!(url, "downloading audio");
    let client = reqwest::blocking::Client::builder()
        .timeout(DOWNLOAD_TIMEOUT)
        .build()
        .context("build http client")?;
    let mut response = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(|e| SlidecastError::input_missing(format!("download '{url}': {e}")))?;

    let mut file = tempfile::Builder::new()
        .prefix("slidecast-audio-")
        .suffix(&url_suffix(url))
        .tempfile()
        .context("create temporary audio file")?;
    let bytes = response
        .copy_to(file.as_file_mut())
        .map_err(|e| SlidecastError::input_missing(format!("download '{url}': {e}")))?;
    tracing::debug!(url, bytes, path = %file.path().display(), "audio downloaded");

    Ok(AudioSource::Downloaded {
        url: url.to_string(),
        file,
    })
}

#[cfg(not(feature = "download"))]
fn download_audio(url: &str) -> SlidecastResult<AudioSource> {
    Err(SlidecastError::input_missing(format!(
        "audio '{url}' is remote, but slidecast was built without the 'download' feature"
    )))
}

/// Duration of `path` in seconds, read from `ffprobe`'s JSON output.
pub fn probe_duration(path: &Path) -> SlidecastResult<f64> {
    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        format: ProbeFormat,
    }

    if !is_ffprobe_on_path() {
        return Err(SlidecastError::encode(
            "ffprobe is required to read the audio duration, but was not found on PATH",
        ));
    }
    let out = std::process::Command::new("ffprobe")
        .args(["-v", "error", "-print_format", "json", "-show_format"])
        .arg(path)
        .output()
        .map_err(|e| SlidecastError::encode(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(SlidecastError::input_missing(format!(
            "ffprobe failed for '{}': {}",
            path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }
    let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
        .map_err(|e| SlidecastError::serde(format!("ffprobe json parse failed: {e}")))?;
    parse_probe_duration(parsed.format.duration.as_deref()).ok_or_else(|| {
        SlidecastError::input_missing(format!(
            "ffprobe reported no duration for '{}'",
            path.display()
        ))
    })
}

fn parse_probe_duration(raw: Option<&str>) -> Option<f64> {
    raw?.trim()
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite() && *d >= 0.0)
}

/// Return `true` when `ffprobe` can be invoked from `PATH`.
pub fn is_ffprobe_on_path() -> bool {
    std::process::Command::new("ffprobe")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/audio.rs"]
mod tests;
