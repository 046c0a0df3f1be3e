//! End-to-end assembly: script and audio in, encoded video out.
//!
//! The work is strictly sequential: load the script, probe the audio, derive timings, then
//! render each slide and stream its frames into a [`FrameSink`].

use std::path::{Path, PathBuf};

use crate::assets::audio::{probe_duration, resolve_audio};
use crate::assets::image::load_panel_image;
use crate::config::RenderConfig;
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::sink::{AudioInput, FrameSink, SinkConfig};
use crate::fonts::{FontResolver, FontSet};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{SlidecastError, SlidecastResult};
use crate::render::animated::AnimatedSlide;
use crate::render::frame::FrameRGBA;
use crate::render::slide::SlideRenderer;
use crate::script::model::{Script, ScriptEntry};
use crate::script::timing::{
    FrameSpan, SlideTiming, derive_durations, derive_timings, schedule_frames, total_duration,
};

/// Project directory layout: `json/<id>.json`, `images/<id>/<n>.png`, `audio/<id>.*`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Project {
    pub root: PathBuf,
    pub id: String,
}

impl Project {
    pub fn new(root: impl Into<PathBuf>, id: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            id: id.into(),
        }
    }

    pub fn script_path(&self) -> PathBuf {
        self.root.join("json").join(format!("{}.json", self.id))
    }

    /// Image of the slide with 1-based number `n`.
    pub fn image_path(&self, n: usize) -> PathBuf {
        self.root
            .join("images")
            .join(&self.id)
            .join(format!("{n}.png"))
    }

    pub fn audio_dir(&self) -> PathBuf {
        self.root.join("audio")
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderVariant {
    /// One still per slide.
    #[default]
    Static,
    /// Staged fade and slide-in of the image, callout and line blocks.
    Animated,
}

/// One slide with its timing and its frames on the output timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct SlidePlan {
    pub entry: ScriptEntry,
    pub timing: SlideTiming,
    pub span: FrameSpan,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderPlan {
    pub slides: Vec<SlidePlan>,
    pub fps: Fps,
    /// Audio is cut from here, the first slide's timestamp.
    pub audio_start: f64,
    pub total_duration: f64,
    pub total_frames: u64,
}

/// Derive timings and frame spans for every script entry.
pub fn plan_render(
    script: &Script,
    audio_len: f64,
    cfg: &RenderConfig,
    variant: RenderVariant,
) -> SlidecastResult<RenderPlan> {
    let audio_start = script.first_timestamp();
    if variant == RenderVariant::Animated && audio_start > audio_len {
        return Err(SlidecastError::input_missing(format!(
            "first slide timestamp {audio_start:.3}s is beyond the audio duration {audio_len:.3}s"
        )));
    }

    let timings = derive_timings(&script.timestamps(), audio_len, cfg.min_slide_sec);
    let durations: Vec<f64> = timings.iter().map(|t| t.duration).collect();
    let spans = schedule_frames(&durations, cfg.fps);
    let total_frames = spans.last().map_or(0, |s| s.end().0);

    let slides = script
        .entries
        .iter()
        .zip(timings.iter().copied())
        .zip(spans)
        .map(|((entry, timing), span)| SlidePlan {
            entry: entry.clone(),
            timing,
            span,
        })
        .collect();

    Ok(RenderPlan {
        slides,
        fps: cfg.fps,
        audio_start,
        total_duration: total_duration(&timings),
        total_frames,
    })
}

/// Per-slide outcome of a render.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SlideReport {
    /// 1-based slide number in script order.
    pub slide: usize,
    pub start: f64,
    pub duration: f64,
    pub frames: u64,
    pub explanation_font_size: u32,
    pub lines_font_size: u32,
    pub overflow: bool,
    pub has_image: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RenderReport {
    pub variant: RenderVariant,
    pub slides: Vec<SlideReport>,
    pub frames: u64,
    pub duration_sec: f64,
    pub audio_start_sec: f64,
}

/// Render every planned slide into `sink`.
///
/// On error the sink is aborted so no partial output is left behind.
pub fn render_plan_to_sink(
    project: &Project,
    plan: &RenderPlan,
    fonts: &FontSet,
    cfg: &RenderConfig,
    variant: RenderVariant,
    sink: &mut dyn FrameSink,
    audio: Option<AudioInput>,
) -> SlidecastResult<RenderReport> {
    let mut renderer = SlideRenderer::new(cfg, fonts)?;
    sink.begin(SinkConfig {
        width: cfg.canvas.width,
        height: cfg.canvas.height,
        fps: plan.fps,
        audio,
    })?;

    let rendered = plan
        .slides
        .iter()
        .map(|slide| render_planned_slide(project, &mut renderer, plan.fps, variant, slide, sink))
        .collect::<SlidecastResult<Vec<_>>>();

    let slides = match rendered.and_then(|slides| sink.end().map(|()| slides)) {
        Ok(slides) => slides,
        Err(err) => {
            sink.abort();
            return Err(err);
        }
    };

    Ok(RenderReport {
        variant,
        slides,
        frames: plan.total_frames,
        duration_sec: plan.total_duration,
        audio_start_sec: plan.audio_start,
    })
}

fn render_planned_slide(
    project: &Project,
    renderer: &mut SlideRenderer,
    fps: Fps,
    variant: RenderVariant,
    slide: &SlidePlan,
    sink: &mut dyn FrameSink,
) -> SlidecastResult<SlideReport> {
    let entry = &slide.entry;
    let image = load_panel_image(
        &project.image_path(entry.slide_number()),
        renderer.config().left_box(),
    );
    let has_image = image.is_some();
    let prepared = renderer.prepare(entry, image);
    let span = slide.span;

    match variant {
        RenderVariant::Static => {
            let still = renderer.render_still(&prepared)?;
            for f in span.start.0..span.end().0 {
                sink.push_frame(FrameIndex(f), &still)?;
            }
        }
        RenderVariant::Animated => {
            let anim = AnimatedSlide::build(renderer, &prepared, slide.timing.duration)?;
            let settled = anim.settled_after();
            let mut at_rest: Option<FrameRGBA> = None;
            for i in 0..span.frames {
                let t = fps.frames_to_secs(i);
                let idx = FrameIndex(span.start.0 + i);
                if t >= settled {
                    if at_rest.is_none() {
                        at_rest = Some(anim.render_at(renderer, t)?);
                    }
                    if let Some(frame) = &at_rest {
                        sink.push_frame(idx, frame)?;
                    }
                } else {
                    sink.push_frame(idx, &anim.render_at(renderer, t)?)?;
                }
            }
        }
    }

    tracing::info!(
        slide = entry.slide_number(),
        start = slide.timing.start,
        duration = slide.timing.duration,
        frames = span.frames,
        font_size = prepared.layout.explanation_font_size,
        "slide rendered"
    );

    Ok(SlideReport {
        slide: entry.slide_number(),
        start: slide.timing.start,
        duration: slide.timing.duration,
        frames: span.frames,
        explanation_font_size: prepared.layout.explanation_font_size,
        lines_font_size: prepared.layout.lines_font_size,
        overflow: prepared.layout.overflow,
        has_image,
    })
}

/// Options of a full video render.
#[derive(Clone, Debug)]
pub struct RenderOpts {
    pub config: RenderConfig,
    pub variant: RenderVariant,
    pub out_path: PathBuf,
    pub overwrite: bool,
}

/// Render `project` to an MP4 with narration.
#[tracing::instrument(skip(opts, fonts), fields(root = %project.root.display(), id = %project.id))]
pub fn render_video(
    project: &Project,
    opts: &RenderOpts,
    fonts: &dyn FontResolver,
) -> SlidecastResult<RenderReport> {
    opts.config.validate()?;
    let script = Script::from_path(&project.script_path())?;
    tracing::info!(entries = script.entries.len(), "script loaded");

    let audio = resolve_audio(script.mp3.as_deref(), &project.audio_dir(), &project.id)?;
    let audio_len = probe_duration(audio.path())?;
    tracing::info!(path = %audio.path().display(), audio_len, "audio probed");

    let plan = plan_render(&script, audio_len, &opts.config, opts.variant)?;
    if plan.audio_start >= audio_len {
        tracing::warn!(
            audio_start = plan.audio_start,
            audio_len,
            "first slide starts after the audio ends; video will be silent"
        );
    }
    let font_set = fonts.resolve()?;

    let mut sink_opts = FfmpegSinkOpts::new(&opts.out_path);
    sink_opts.overwrite = opts.overwrite;
    sink_opts.bg_rgba = opts.config.theme.background.to_rgba();
    let mut sink = FfmpegSink::new(sink_opts);

    let report = render_plan_to_sink(
        project,
        &plan,
        &font_set,
        &opts.config,
        opts.variant,
        &mut sink,
        Some(AudioInput {
            path: audio.path().to_path_buf(),
            start_sec: plan.audio_start,
            duration_sec: plan.total_duration,
        }),
    )?;

    tracing::info!(
        out = %opts.out_path.display(),
        frames = report.frames,
        duration = report.duration_sec,
        "video written"
    );
    Ok(report)
}

/// Render slide number `slide` (1-based, script input order) at `at_sec` seconds into the slide
/// and write it as PNG. No audio is needed; the last slide is treated as open-ended.
#[tracing::instrument(skip(cfg, fonts), fields(root = %project.root.display(), id = %project.id))]
pub fn render_slide_png(
    project: &Project,
    slide: usize,
    at_sec: f64,
    cfg: &RenderConfig,
    variant: RenderVariant,
    fonts: &dyn FontResolver,
    out_path: &Path,
) -> SlidecastResult<SlideReport> {
    let script = Script::from_path(&project.script_path())?;
    let pos = script
        .entries
        .iter()
        .position(|e| e.slide_number() == slide)
        .ok_or_else(|| {
            SlidecastError::validation(format!(
                "slide {slide} does not exist (script has {} entries)",
                script.entries.len()
            ))
        })?;
    let durations = derive_durations(&script.timestamps(), f64::INFINITY, cfg.min_slide_sec);
    let entry = &script.entries[pos];
    let duration = durations[pos];

    let font_set = fonts.resolve()?;
    let mut renderer = SlideRenderer::new(cfg, &font_set)?;
    let image = load_panel_image(&project.image_path(entry.slide_number()), cfg.left_box());
    let has_image = image.is_some();
    let prepared = renderer.prepare(entry, image);

    let frame = match variant {
        RenderVariant::Static => renderer.render_still(&prepared)?,
        RenderVariant::Animated => {
            AnimatedSlide::build(&mut renderer, &prepared, duration)?.render_at(&renderer, at_sec)?
        }
    };
    crate::encode::ffmpeg::ensure_parent_dir(out_path)?;
    frame.save_png(out_path)?;
    tracing::info!(out = %out_path.display(), "slide preview written");

    Ok(SlideReport {
        slide,
        start: entry.timestamp,
        duration,
        frames: 1,
        explanation_font_size: prepared.layout.explanation_font_size,
        lines_font_size: prepared.layout.lines_font_size,
        overflow: prepared.layout.overflow,
        has_image,
    })
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
