use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::config::PanelBox;
use crate::foundation::error::SlidecastResult;
use crate::foundation::math::{half_slack, premultiply_rgba8_in_place};

/// Premultiplied RGBA8 pixels ready for painting.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// An image resized to fit a panel, with its top-left corner in canvas pixels.
#[derive(Clone, Debug)]
pub struct PlacedImage {
    pub image: PreparedImage,
    pub x: u32,
    pub y: u32,
}

pub fn decode_image(bytes: &[u8]) -> SlidecastResult<image::RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// Size of a `w`x`h` image scaled uniformly to fit `box_w`x`box_h`. Never returns a zero side.
pub fn fit_size(w: u32, h: u32, box_w: u32, box_h: u32) -> (u32, u32) {
    if w == 0 || h == 0 {
        return (1, 1);
    }
    let r = (box_w as f64 / w as f64).min(box_h as f64 / h as f64);
    let scale = |dim: u32| ((dim as f64 * r) as u32).max(1);
    (scale(w), scale(h))
}

/// Lanczos-resize `img` to fit `panel` and center it there.
pub fn place_in_panel(img: &image::RgbaImage, panel: PanelBox) -> PlacedImage {
    let (w, h) = img.dimensions();
    let (nw, nh) = fit_size(w, h, panel.width, panel.height);
    let resized = if (nw, nh) == (w, h) {
        img.clone()
    } else {
        image::imageops::resize(img, nw, nh, image::imageops::FilterType::Lanczos3)
    };
    let mut rgba8_premul = resized.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    let x = panel.x as i64 + half_slack(panel.width as i64, nw as i64);
    let y = panel.y as i64 + half_slack(panel.height as i64, nh as i64);
    PlacedImage {
        image: PreparedImage {
            width: nw,
            height: nh,
            rgba8_premul: Arc::new(rgba8_premul),
        },
        x: x as u32,
        y: y as u32,
    }
}

/// Load and place the image at `path`. A missing or undecodable file leaves the panel blank.
pub fn load_panel_image(path: &Path, panel: PanelBox) -> Option<PlacedImage> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "slide image unavailable, panel left blank");
            return None;
        }
    };
    match decode_image(&bytes) {
        Ok(img) => Some(place_in_panel(&img, panel)),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "slide image unreadable, panel left blank");
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/image.rs"]
mod tests;
