//! Host-facing parameter model for one band's waveform engine.
//!
//! The host hands these over as plain values whenever something changes; the
//! engine recomputes its tables in response. Raw indices coming from a
//! parameter store are validated here (`from_index`) before they can reach
//! the synthesis code.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One full cycle of the modulation waveform, selected by the host.
///
/// The cycle is split into a left and a right segment at the symmetry point;
/// each shape defines its own curve per segment (see `dsp::waveshape`).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveshape {
    RampUp,
    RampDown,
    Square,
    Triangle,
    Sine,
    HumpDown,
    HumpUp,
}

impl Waveshape {
    pub const COUNT: usize = 7;

    /// Validate a raw shape index from the parameter store.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::RampUp),
            1 => Some(Self::RampDown),
            2 => Some(Self::Square),
            3 => Some(Self::Triangle),
            4 => Some(Self::Sine),
            5 => Some(Self::HumpDown),
            6 => Some(Self::HumpUp),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::RampUp => 0,
            Self::RampDown => 1,
            Self::Square => 2,
            Self::Triangle => 3,
            Self::Sine => 4,
            Self::HumpDown => 5,
            Self::HumpUp => 6,
        }
    }
}

/// Rhythmic ratio applied to the modulation rate.
///
/// When synced to the host, the base rate is one cycle per beat (BPM/60);
/// the multiplier scales that into musically related speeds.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateMultiplier {
    Half,
    Whole,
    WholeAndHalf,
    Double,
    Triple,
    Quadruple,
}

impl RateMultiplier {
    pub const COUNT: usize = 6;

    /// Validate a raw multiplier index from the parameter store.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Half),
            1 => Some(Self::Whole),
            2 => Some(Self::WholeAndHalf),
            3 => Some(Self::Double),
            4 => Some(Self::Triple),
            5 => Some(Self::Quadruple),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Half => 0,
            Self::Whole => 1,
            Self::WholeAndHalf => 2,
            Self::Double => 3,
            Self::Triple => 4,
            Self::Quadruple => 5,
        }
    }

    /// The ratio applied to the base rate.
    pub fn ratio(self) -> f32 {
        match self {
            Self::Half => 0.5,
            Self::Whole => 1.0,
            Self::WholeAndHalf => 1.5,
            Self::Double => 2.0,
            Self::Triple => 3.0,
            Self::Quadruple => 4.0,
        }
    }

    /// How many duplicated cycles the display transform packs into one table
    /// length: 2·ratio + 1. Always a whole number, including for the
    /// fractional ratios.
    pub fn display_cycles(self) -> usize {
        match self {
            Self::Half => 2,
            Self::Whole => 3,
            Self::WholeAndHalf => 4,
            Self::Double => 5,
            Self::Triple => 7,
            Self::Quadruple => 9,
        }
    }

    /// Half-cycle corrective phase for the display transform, in table
    /// entries. The fractional ratios (0.5 and 1.5) land the duplicated
    /// cycles half a period out of alignment; the correction re-centers them.
    pub fn display_parity_offset(self, table_size: usize) -> usize {
        match self {
            Self::Half | Self::WholeAndHalf => table_size / 2,
            Self::Whole | Self::Double | Self::Triple | Self::Quadruple => 0,
        }
    }
}

/// Full parameter set for one band, read on every recompute.
///
/// `symmetry` and `depth` are percentages in [0, 100]; the phase fields are
/// degrees in (-180, 180]. `display_phase_degrees` only scrolls the
/// visualization and never reaches the audio table.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandParams {
    pub shape: Waveshape,
    pub symmetry: f32,
    pub invert: bool,
    pub depth: f32,
    pub phase_degrees: f32,
    pub display_phase_degrees: f32,
    pub rate_hz: f32,
    pub sync_to_host: bool,
    pub multiplier: RateMultiplier,
}

impl Default for BandParams {
    fn default() -> Self {
        Self {
            shape: Waveshape::Sine,
            symmetry: 50.0,
            invert: false,
            depth: 50.0,
            phase_degrees: 0.0,
            display_phase_degrees: 0.0,
            rate_hz: 1.0,
            sync_to_host: false,
            multiplier: RateMultiplier::Whole,
        }
    }
}

impl BandParams {
    /// Clamp the continuous fields into their documented ranges.
    pub fn clamped(mut self) -> Self {
        self.symmetry = self.symmetry.clamp(0.0, 100.0);
        self.depth = self.depth.clamp(0.0, 100.0);
        self.phase_degrees = wrap_degrees(self.phase_degrees);
        self.display_phase_degrees = wrap_degrees(self.display_phase_degrees);
        self.rate_hz = self.rate_hz.max(0.0);
        self
    }
}

/// Wrap an angle into (-180, 180].
fn wrap_degrees(degrees: f32) -> f32 {
    let mut wrapped = degrees % 360.0;
    if wrapped > 180.0 {
        wrapped -= 360.0;
    } else if wrapped <= -180.0 {
        wrapped += 360.0;
    }
    wrapped
}

/// A parameter change the engine refuses to apply.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamError {
    #[error("waveshape index {0} out of range 0..7")]
    ShapeIndex(usize),
    #[error("multiplier index {0} out of range 0..6")]
    MultiplierIndex(usize),
}
