use crate::params::RateMultiplier;

/*
Tempo and Increment
===================

The table has one entry per Hz of potential frequency resolution
(table_size == sample rate), which makes the increment math direct:
advancing the phase cursor by `f` entries per sample plays the cycle at
`f` Hz. So the increment *is* the modulation frequency:

    free-running:  increment = rate_hz * ratio
    host-synced:   increment = (bpm / 60) * ratio

At 120 BPM with a x2 multiplier the band wobbles at 4 Hz, locked to the
beat no matter the sample rate.

Phase offsets stagger the bands against a shared reference. Degrees are
converted to a table-entry offset with a deliberately preserved quirk from
the effect's original behavior: non-positive angles take their absolute
value, positive angles take the one's complement of the turn. Both sides
land in [0, table_size), 0 degrees maps to offset 0, but +90 and -90 are
not mirror images. Callers that need a symmetric convention should decide
at a higher layer; this function matches the effect's long-standing
behavior.
*/

/// Per-sample phase advance in table entries.
#[inline]
pub fn increment(rate_hz: f32, sync_to_host: bool, host_bpm: f32, multiplier: RateMultiplier) -> f32 {
    let base = if sync_to_host { host_bpm / 60.0 } else { rate_hz };
    base * multiplier.ratio()
}

/// Convert a phase angle in degrees to a table-entry offset in
/// [0, table_size).
///
/// Sign convention (preserved, see module notes): for `degrees <= 0` the
/// offset is `|deg/360| * N`; for `degrees > 0` it is `(1 - deg/360) * N`.
#[inline]
pub fn phase_to_entries(degrees: f32, table_size: usize) -> f32 {
    let turns = degrees / 360.0;
    let n = table_size as f32;
    if turns <= 0.0 {
        -turns * n
    } else {
        (1.0 - turns) * n
    }
}
