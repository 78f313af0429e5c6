#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::engine::snapshot::BandSnapshot;
use crate::engine::{BandEngine, EngineError};
use crate::params::BandParams;
use crate::BAND_COUNT;

/// One of the three frequency ranges of the effect.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Low,
    Mid,
    High,
}

impl Band {
    pub const ALL: [Band; BAND_COUNT] = [Band::Low, Band::Mid, Band::High];

    pub fn index(self) -> usize {
        match self {
            Band::Low => 0,
            Band::Mid => 1,
            Band::High => 2,
        }
    }
}

/// Three independent band engines sharing the host tempo and sample rate.
///
/// The bands hold no mutable state in common: each can be reparameterized
/// on its own, and a tempo change fans out to all three (only the synced
/// ones actually change their increment).
pub struct MultibandEngine {
    bands: [BandEngine; BAND_COUNT],
    host_bpm: f32,
    sample_rate: f32,
}

impl MultibandEngine {
    pub fn new(sample_rate: f32) -> Result<Self, EngineError> {
        Ok(Self {
            bands: [
                BandEngine::new(sample_rate)?,
                BandEngine::new(sample_rate)?,
                BandEngine::new(sample_rate)?,
            ],
            host_bpm: super::DEFAULT_HOST_BPM,
            sample_rate,
        })
    }

    pub fn band(&self, band: Band) -> &BandEngine {
        &self.bands[band.index()]
    }

    pub fn band_mut(&mut self, band: Band) -> &mut BandEngine {
        &mut self.bands[band.index()]
    }

    /// Reparameterize one band; the other two are untouched.
    pub fn set_band_params(&mut self, band: Band, params: BandParams) {
        self.bands[band.index()].set_params(params);
    }

    /// Fan a transport tempo change out to every band.
    pub fn set_host_bpm(&mut self, bpm: f32) {
        self.host_bpm = bpm;
        for engine in &mut self.bands {
            engine.set_host_bpm(bpm);
        }
    }

    /// Sample-rate change: every band rebuilds its tables at the new length.
    pub fn set_sample_rate(&mut self, sample_rate: f32) -> Result<(), EngineError> {
        // Validate up front so a bad rate leaves all three bands in their
        // previous state.
        super::validated_table_size(sample_rate)?;
        for engine in &mut self.bands {
            engine.set_sample_rate(sample_rate)?;
        }
        self.sample_rate = sample_rate;
        Ok(())
    }

    pub fn host_bpm(&self) -> f32 {
        self.host_bpm
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Current snapshots for all bands, in `Band::ALL` order.
    pub fn snapshots(&self) -> [BandSnapshot; BAND_COUNT] {
        [
            self.bands[0].snapshot(),
            self.bands[1].snapshot(),
            self.bands[2].snapshot(),
        ]
    }
}
