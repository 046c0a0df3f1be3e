//! CPU rasterization of slides with `vello_cpu`.

pub mod animated;
pub(crate) mod draw;
pub mod frame;
pub mod slide;

pub use frame::FrameRGBA;
