use crate::animation::ease::Ease;
use crate::config::AnimationTimings;
use crate::foundation::core::Vec2;

/// Entrance animation of one layer: hidden until `delay`, then fades in over `fade_duration`
/// while travelling `slide_offset` px into its resting position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSpec {
    pub delay: f64,
    pub fade_duration: f64,
    /// Displacement at progress 0, subtracted from the resting position.
    pub slide_offset: Vec2,
    pub easing: Ease,
}

/// State of a layer at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerSample {
    pub opacity: f32,
    /// Offset to add to the resting position.
    pub offset: Vec2,
}

impl LayerSample {
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

impl AnimationSpec {
    /// Eased progress at `local_t` seconds after the delay.
    pub fn progress(&self, local_t: f64) -> f64 {
        if local_t < 0.0 {
            return 0.0;
        }
        if self.fade_duration <= 0.0 {
            return 1.0;
        }
        self.easing.apply(local_t / self.fade_duration)
    }

    pub fn sample(&self, local_t: f64) -> LayerSample {
        let p = self.progress(local_t);
        LayerSample {
            opacity: p as f32,
            offset: -(self.slide_offset * (1.0 - p)),
        }
    }

    /// Sample at `slide_t` seconds after the slide starts.
    pub fn sample_at(&self, slide_t: f64) -> LayerSample {
        self.sample(slide_t - self.delay)
    }

    /// Time the layer stays on screen after its delay.
    pub fn lifetime(&self, slide_duration: f64, min_layer_sec: f64) -> f64 {
        (slide_duration - self.delay).max(min_layer_sec)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerKind {
    Image,
    Callout,
    /// Line block `k`, 0-based.
    TextBlock(usize),
}

/// A layer with its animation and lifetime within one slide.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledLayer {
    pub kind: LayerKind,
    pub spec: AnimationSpec,
    pub lifetime: f64,
}

impl ScheduledLayer {
    /// `true` while `slide_t` falls inside `[delay, delay + lifetime)`.
    pub fn is_live(&self, slide_t: f64) -> bool {
        slide_t >= self.spec.delay && slide_t < self.spec.delay + self.lifetime
    }
}

/// Layers of one animated slide in drawing order: image, callout, then text blocks.
pub fn layer_schedule(
    timings: &AnimationTimings,
    text_blocks: usize,
    slide_duration: f64,
) -> Vec<ScheduledLayer> {
    let easing = timings.easing;
    let mut specs = Vec::with_capacity(2 + text_blocks);
    specs.push((
        LayerKind::Image,
        AnimationSpec {
            delay: timings.image_delay,
            fade_duration: timings.image_fade,
            slide_offset: Vec2::new(timings.image_slide_px, 0.0),
            easing,
        },
    ));
    specs.push((
        LayerKind::Callout,
        AnimationSpec {
            delay: timings.callout_delay,
            fade_duration: timings.callout_fade,
            slide_offset: Vec2::new(0.0, timings.callout_slide_px),
            easing,
        },
    ));
    for k in 0..text_blocks {
        specs.push((
            LayerKind::TextBlock(k),
            AnimationSpec {
                delay: timings.text_start_delay + timings.text_stagger * k as f64,
                fade_duration: timings.text_fade,
                slide_offset: Vec2::new(0.0, timings.text_slide_px),
                easing,
            },
        ));
    }

    specs
        .into_iter()
        .map(|(kind, spec)| ScheduledLayer {
            kind,
            lifetime: spec.lifetime(slide_duration, timings.min_layer_sec),
            spec,
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spec.rs"]
mod tests;
