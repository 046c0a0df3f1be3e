//! Font discovery.
//!
//! A [`FontSet`] holds the raw bytes of the regular, bold and italic faces. It is resolved once
//! per run by a [`FontResolver`] and then shared read-only by measurement and rendering.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::error::{SlidecastError, SlidecastResult};
use crate::text::markup::RunStyle;

/// One loaded font face.
#[derive(Clone, Debug)]
pub struct FontFace {
    /// File the face was read from; `None` for in-memory faces.
    pub path: Option<PathBuf>,
    pub bytes: Arc<Vec<u8>>,
}

impl FontFace {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            path: None,
            bytes: Arc::new(bytes),
        }
    }

    pub fn load(path: &Path) -> SlidecastResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font '{}'", path.display()))?;
        if bytes.is_empty() {
            return Err(SlidecastError::font(format!(
                "font file '{}' is empty",
                path.display()
            )));
        }
        Ok(Self {
            path: Some(path.to_path_buf()),
            bytes: Arc::new(bytes),
        })
    }

    fn describe(&self) -> String {
        self.path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<memory>".to_string())
    }
}

/// Regular, bold and italic faces used for slide text.
#[derive(Clone, Debug)]
pub struct FontSet {
    pub regular: FontFace,
    pub bold: FontFace,
    pub italic: FontFace,
}

impl FontSet {
    /// Missing bold or italic faces fall back to the regular face.
    pub fn new(regular: FontFace, bold: Option<FontFace>, italic: Option<FontFace>) -> Self {
        Self {
            bold: bold.unwrap_or_else(|| regular.clone()),
            italic: italic.unwrap_or_else(|| regular.clone()),
            regular,
        }
    }

    pub fn face(&self, style: RunStyle) -> &FontFace {
        match style {
            RunStyle::Normal => &self.regular,
            RunStyle::Bold => &self.bold,
            RunStyle::Italic => &self.italic,
        }
    }
}

/// Strategy for locating the fonts of a run.
pub trait FontResolver {
    fn resolve(&self) -> SlidecastResult<FontSet>;
}

/// Ordered candidate paths per style; the first readable file wins.
#[derive(Clone, Debug, Default)]
pub struct CandidatePaths {
    pub regular: Vec<PathBuf>,
    pub bold: Vec<PathBuf>,
    pub italic: Vec<PathBuf>,
}

impl CandidatePaths {
    /// Common locations of Arial and DejaVu Sans on Windows, Linux and macOS.
    pub fn system() -> Self {
        fn paths(list: &[&str]) -> Vec<PathBuf> {
            list.iter().map(PathBuf::from).collect()
        }
        Self {
            regular: paths(&[
                "C:/Windows/Fonts/arial.ttf",
                "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
                "/usr/share/fonts/TTF/DejaVuSans.ttf",
                "/usr/share/fonts/dejavu/DejaVuSans.ttf",
                "/Library/Fonts/Arial.ttf",
                "/System/Library/Fonts/Supplemental/Arial.ttf",
            ]),
            bold: paths(&[
                "C:/Windows/Fonts/arialbd.ttf",
                "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
                "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
                "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
                "/Library/Fonts/Arial Bold.ttf",
                "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
            ]),
            italic: paths(&[
                "C:/Windows/Fonts/ariali.ttf",
                "/usr/share/fonts/truetype/dejavu/DejaVuSans-Oblique.ttf",
                "/usr/share/fonts/TTF/DejaVuSans-Oblique.ttf",
                "/usr/share/fonts/dejavu/DejaVuSans-Oblique.ttf",
                "/Library/Fonts/Arial Italic.ttf",
                "/System/Library/Fonts/Supplemental/Arial Italic.ttf",
            ]),
        }
    }

    fn first_loadable(candidates: &[PathBuf]) -> Option<FontFace> {
        candidates
            .iter()
            .filter(|p| p.is_file())
            .find_map(|p| match FontFace::load(p) {
                Ok(face) => Some(face),
                Err(err) => {
                    tracing::warn!(path = %p.display(), %err, "skipping unreadable font");
                    None
                }
            })
    }
}

impl FontResolver for CandidatePaths {
    fn resolve(&self) -> SlidecastResult<FontSet> {
        let regular = Self::first_loadable(&self.regular).ok_or_else(|| {
            SlidecastError::font(format!(
                "no regular font found among {} candidate paths (pass --font-regular)",
                self.regular.len()
            ))
        })?;
        let bold = Self::first_loadable(&self.bold);
        let italic = Self::first_loadable(&self.italic);
        if bold.is_none() || italic.is_none() {
            tracing::warn!(
                bold = bold.is_some(),
                italic = italic.is_some(),
                "missing emphasis faces fall back to the regular font"
            );
        }
        let set = FontSet::new(regular, bold, italic);
        tracing::debug!(
            regular = %set.regular.describe(),
            bold = %set.bold.describe(),
            italic = %set.italic.describe(),
            "fonts resolved"
        );
        Ok(set)
    }
}

/// Fonts named explicitly, e.g. from the command line.
#[derive(Clone, Debug)]
pub struct ExplicitFonts {
    pub regular: PathBuf,
    pub bold: Option<PathBuf>,
    pub italic: Option<PathBuf>,
}

impl FontResolver for ExplicitFonts {
    fn resolve(&self) -> SlidecastResult<FontSet> {
        let regular = FontFace::load(&self.regular).map_err(|err| {
            SlidecastError::font(format!(
                "regular font '{}': {err}",
                self.regular.display()
            ))
        })?;
        let bold = self.bold.as_deref().map(FontFace::load).transpose()?;
        let italic = self.italic.as_deref().map(FontFace::load).transpose()?;
        Ok(FontSet::new(regular, bold, italic))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fonts/mod.rs"]
mod tests;
