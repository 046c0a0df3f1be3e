//! Slide images and the narration track.

pub mod audio;
pub mod image;
