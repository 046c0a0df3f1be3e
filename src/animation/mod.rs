//! Easing and per-layer animation specs of the animated slide variant.

pub mod ease;
pub mod spec;
