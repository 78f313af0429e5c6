//! Low-level waveform math used by the per-band engines.
//!
//! These functions are pure and allocation-free: they write into buffers the
//! caller owns and keep no state between calls, so an identical parameter set
//! always reproduces an identical table. Orchestration (when to recompute,
//! how to hand tables to the audio thread) lives in `engine`.

/// Zero-centered display table derivation for the oscilloscope view.
pub mod display;
/// Soft edge rounding for discontinuous shapes.
pub mod smoothing;
/// Min/max scan and linear remapping into gain range.
pub mod table;
/// Rate, tempo sync, and phase-to-entry-offset math.
pub mod tempo;
/// Raw one-cycle table synthesis for the seven shapes.
pub mod waveshape;
