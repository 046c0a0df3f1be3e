#![forbid(unsafe_code)]

//! Turn a timestamped narration script plus per-slide images into a narrated 854x480 MP4.
//!
//! Each script entry becomes one slide: the image on the left, a callout box with the spoken
//! explanation and up to four bullet lines on the right. Text is auto-fitted to the column.
//! Slides are either static stills or staged fade/slide-in animations, rendered on the CPU with
//! `vello_cpu` and encoded by the system `ffmpeg`.

pub mod animation;
pub mod assets;
pub mod config;
pub mod encode;
pub mod fonts;
pub mod foundation;
pub mod pipeline;
pub mod render;
pub mod script;
pub mod text;

pub use config::RenderConfig;
pub use encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
pub use encode::sink::{AudioInput, FrameSink, InMemorySink, SinkConfig};
pub use fonts::{CandidatePaths, ExplicitFonts, FontFace, FontResolver, FontSet};
pub use foundation::core::{Canvas, Fps, FrameIndex, Rgb8};
pub use foundation::error::{SlidecastError, SlidecastResult};
pub use pipeline::{
    Project, RenderOpts, RenderPlan, RenderReport, RenderVariant, SlideReport, plan_render,
    render_plan_to_sink, render_slide_png, render_video,
};
pub use render::FrameRGBA;
pub use script::model::{Script, ScriptEntry};
