pub mod dsp; // Waveform synthesis, normalization, tempo math
pub mod engine; // Per-band recompute orchestration and realtime handoff
pub mod params; // Host-facing parameter model

/// Number of frequency bands driven by the effect (low/mid/high).
pub const BAND_COUNT: usize = 3;
