//! Encoding sinks.
//!
//! Sinks consume rendered frames in timeline order. The pipeline drives them.

/// `ffmpeg`-based MP4 output via the system binary.
pub mod ffmpeg;
/// Sink contract and the in-memory sink.
pub mod sink;
