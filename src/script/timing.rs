use crate::foundation::core::{FrameIndex, Fps};

/// Display window of one slide.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SlideTiming {
    /// Script start time in seconds (position in the narration).
    pub start: f64,
    /// On-screen duration in seconds, never below the configured minimum.
    pub duration: f64,
}

/// Derive per-slide durations from ascending start times.
///
/// Each slide lasts until the next one starts; the last lasts until the audio ends. Every value is
/// floored at `min_slide_sec` with no upper bound and no renormalization, so a script whose
/// timestamps disagree with the audio simply produces a longer video.
pub fn derive_durations(timestamps: &[f64], audio_len: f64, min_slide_sec: f64) -> Vec<f64> {
    timestamps
        .iter()
        .enumerate()
        .map(|(i, &t)| {
            let end = timestamps.get(i + 1).copied().unwrap_or(audio_len);
            (end - t).max(min_slide_sec)
        })
        .collect()
}

pub fn derive_timings(timestamps: &[f64], audio_len: f64, min_slide_sec: f64) -> Vec<SlideTiming> {
    derive_durations(timestamps, audio_len, min_slide_sec)
        .into_iter()
        .zip(timestamps)
        .map(|(duration, &start)| SlideTiming { start, duration })
        .collect()
}

/// Output-frame span of one slide on the concatenated video timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSpan {
    pub start: FrameIndex,
    pub frames: u64,
}

impl FrameSpan {
    pub fn end(self) -> FrameIndex {
        FrameIndex(self.start.0 + self.frames)
    }
}

/// Lay slides back to back and cut them at the nearest frame boundary of the running total.
///
/// Cutting on the cumulative time keeps rounding error from accumulating over long scripts. Every
/// slide receives at least one frame.
pub fn schedule_frames(durations: &[f64], fps: Fps) -> Vec<FrameSpan> {
    let mut out = Vec::with_capacity(durations.len());
    let mut elapsed = 0.0f64;
    let mut next_start = 0u64;
    for &d in durations {
        elapsed += d;
        let end = fps.secs_to_frames_round(elapsed).max(next_start + 1);
        out.push(FrameSpan {
            start: FrameIndex(next_start),
            frames: end - next_start,
        });
        next_start = end;
    }
    out
}

/// Total length of the assembled video in seconds.
pub fn total_duration(timings: &[SlideTiming]) -> f64 {
    timings.iter().map(|t| t.duration).sum()
}

#[cfg(test)]
#[path = "../../tests/unit/script/timing.rs"]
mod tests;
