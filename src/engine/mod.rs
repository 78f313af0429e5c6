//! Per-band waveform engine: recompute orchestration and table ownership.
//!
//! One `BandEngine` exists per frequency band. It is driven entirely by the
//! control thread: any parameter, tempo, or sample-rate change triggers a
//! full synchronous rebuild of the affected outputs. The audio thread never
//! touches the engine directly - it reads published `BandSnapshot`s through
//! a `BandCursor` (see `snapshot`), so it can never observe a half-written
//! table.

pub mod multiband;
pub mod snapshot;

use std::sync::Arc;

use thiserror::Error;

use crate::dsp::{display, table, tempo, waveshape};
use crate::params::{BandParams, ParamError, RateMultiplier, Waveshape};
use self::snapshot::BandSnapshot;

/// Host tempo assumed before the transport reports one.
pub const DEFAULT_HOST_BPM: f32 = 120.0;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine refuses to build a zero-length or nonsensical table.
    #[error("sample rate must be positive and finite, got {0}")]
    InvalidSampleRate(f32),
    #[error(transparent)]
    Param(#[from] ParamError),
}

/// The waveform engine for one band.
///
/// Owns the raw cycle, the published audio gain table, the display table,
/// and the phase increment. All outputs are pure functions of the current
/// parameters plus host tempo and sample rate; rebuilding twice with the
/// same inputs reproduces bit-identical results.
pub struct BandEngine {
    params: BandParams,
    host_bpm: f32,
    sample_rate: f32,
    table_size: usize,

    raw: Vec<f32>,
    raw_min: f32,
    raw_max: f32,
    audio: Arc<[f32]>,
    display: Vec<f32>,
    scratch: Vec<f32>,

    increment: f32,
    phase_offset: f32,
}

impl BandEngine {
    /// Create an engine with default parameters at the given sample rate.
    ///
    /// The table length equals the sample rate (one entry per Hz), so the
    /// increment doubles as the modulation frequency.
    pub fn new(sample_rate: f32) -> Result<Self, EngineError> {
        let table_size = validated_table_size(sample_rate)?;

        let mut engine = Self {
            params: BandParams::default(),
            host_bpm: DEFAULT_HOST_BPM,
            sample_rate,
            table_size,
            raw: vec![0.0; table_size],
            raw_min: 0.0,
            raw_max: 0.0,
            audio: vec![1.0; table_size].into(),
            display: vec![0.0; table_size],
            scratch: vec![0.0; table_size],
            increment: 0.0,
            phase_offset: 0.0,
        };
        engine.rebuild_all();
        Ok(engine)
    }

    /// Replace the full parameter set and rebuild every output.
    pub fn set_params(&mut self, params: BandParams) {
        self.params = params.clamped();
        self.rebuild_all();
    }

    /// Apply a raw shape index from the parameter store.
    ///
    /// An out-of-range index rejects the change; the last valid tables stay
    /// published.
    pub fn set_shape_index(&mut self, index: usize) -> Result<(), EngineError> {
        let shape = Waveshape::from_index(index).ok_or_else(|| {
            log::warn!("rejected waveshape index {index}; keeping last table");
            ParamError::ShapeIndex(index)
        })?;
        if shape != self.params.shape {
            self.params.shape = shape;
            self.rebuild_tables();
        }
        Ok(())
    }

    /// Apply a raw multiplier index from the parameter store.
    pub fn set_multiplier_index(&mut self, index: usize) -> Result<(), EngineError> {
        let multiplier = RateMultiplier::from_index(index).ok_or_else(|| {
            log::warn!("rejected multiplier index {index}; keeping last increment");
            ParamError::MultiplierIndex(index)
        })?;
        if multiplier != self.params.multiplier {
            self.params.multiplier = multiplier;
            self.rebuild_increment();
            self.rebuild_display();
        }
        Ok(())
    }

    /// Update the host tempo. Only synced bands change their increment.
    pub fn set_host_bpm(&mut self, bpm: f32) {
        self.host_bpm = bpm;
        if self.params.sync_to_host {
            self.rebuild_increment();
        }
    }

    /// Change the sample rate, resizing and rebuilding everything.
    pub fn set_sample_rate(&mut self, sample_rate: f32) -> Result<(), EngineError> {
        let table_size = validated_table_size(sample_rate)?;
        self.sample_rate = sample_rate;
        self.table_size = table_size;
        self.raw.resize(table_size, 0.0);
        self.display.resize(table_size, 0.0);
        self.scratch.resize(table_size, 0.0);
        self.rebuild_all();
        Ok(())
    }

    /// Audio-ready gain table, bounded to [1 - depth/100, 1].
    pub fn audio_table(&self) -> &Arc<[f32]> {
        &self.audio
    }

    /// Zero-centered display table. Visualization only; never read by audio.
    pub fn display_table(&self) -> &[f32] {
        &self.display
    }

    /// Per-sample phase advance in table entries.
    pub fn increment(&self) -> f32 {
        self.increment
    }

    /// Table-entry offset pre-rotating this band's read position.
    pub fn phase_offset_entries(&self) -> f32 {
        self.phase_offset
    }

    pub fn params(&self) -> &BandParams {
        &self.params
    }

    pub fn table_size(&self) -> usize {
        self.table_size
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Everything the audio callback needs, behind one cheap handle.
    pub fn snapshot(&self) -> BandSnapshot {
        BandSnapshot {
            table: Arc::clone(&self.audio),
            increment: self.increment,
            phase_offset: self.phase_offset,
        }
    }

    fn rebuild_all(&mut self) {
        self.rebuild_tables();
        self.rebuild_increment();
    }

    /// Raw cycle -> extrema -> gain table -> display table.
    fn rebuild_tables(&mut self) {
        waveshape::render_cycle(
            self.params.shape,
            self.params.symmetry,
            self.params.invert,
            &mut self.raw,
        );

        let (min, max) = table::extrema(&self.raw);
        self.raw_min = min;
        self.raw_max = max;

        // New allocation each rebuild: the previously published table may
        // still be in use on the audio thread.
        let mut audio = vec![0.0; self.table_size];
        table::normalize_gain(&self.raw, self.params.depth, &mut audio);
        self.audio = audio.into();

        self.rebuild_display();

        log::debug!(
            "rebuilt tables: shape={:?} symmetry={} depth={} invert={}",
            self.params.shape,
            self.params.symmetry,
            self.params.depth,
            self.params.invert,
        );
    }

    fn rebuild_increment(&mut self) {
        self.increment = tempo::increment(
            self.params.rate_hz,
            self.params.sync_to_host,
            self.host_bpm,
            self.params.multiplier,
        );
        self.phase_offset = tempo::phase_to_entries(self.params.phase_degrees, self.table_size);
    }

    fn rebuild_display(&mut self) {
        let phase_entries = tempo::phase_to_entries(self.params.phase_degrees, self.table_size);
        let display_phase_entries =
            tempo::phase_to_entries(self.params.display_phase_degrees, self.table_size);
        display::render_display(
            &self.raw,
            self.params.depth,
            self.params.multiplier,
            phase_entries,
            display_phase_entries,
            self.raw_min,
            self.raw_max,
            &mut self.display,
            &mut self.scratch,
        );
    }
}

fn validated_table_size(sample_rate: f32) -> Result<usize, EngineError> {
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(EngineError::InvalidSampleRate(sample_rate));
    }
    let table_size = sample_rate.round() as usize;
    if table_size == 0 {
        return Err(EngineError::InvalidSampleRate(sample_rate));
    }
    Ok(table_size)
}
