use crate::dsp::table::remap;
use crate::params::RateMultiplier;

/*
Display Transform
=================

The oscilloscope view draws a second table derived from the same raw cycle
the audio path uses, but remapped for legibility:

  1. Several cycles are packed into one table length - `2 * ratio + 1` of
     them - so fractional multipliers (x0.5, x1.5) still show complete
     cycles on screen instead of cutting off mid-wave. The fractional
     ratios also land half a period out of alignment, so they get a
     half-table corrective offset (`RateMultiplier::display_parity_offset`).
  2. The band's relative phase offset rotates the read position, and an
     independent display phase rotates the write position, so the view can
     scroll without touching anything the audio path reads.
  3. A final remap centers the values around zero in
     [-0.5 * depth/100, +0.5 * depth/100] for symmetric drawing.

The transform reads the *raw* cycle, never the published gain table, and
writes only into caller-owned buffers: nothing here can perturb audio.
*/

/// Derive the zero-centered display table from a raw cycle.
///
/// `phase_entries` and `display_phase_entries` are entry offsets already
/// converted by `dsp::tempo::phase_to_entries`; `min`/`max` are the raw
/// extremes from the normalization pass. `scratch` is a caller-owned
/// buffer of the same length as `raw`, reused across recomputes.
pub fn render_display(
    raw: &[f32],
    depth: f32,
    multiplier: RateMultiplier,
    phase_entries: f32,
    display_phase_entries: f32,
    min: f32,
    max: f32,
    out: &mut [f32],
    scratch: &mut [f32],
) {
    let table_size = raw.len();
    debug_assert_eq!(out.len(), table_size);
    debug_assert_eq!(scratch.len(), table_size);
    if table_size == 0 {
        return;
    }

    let cycles = multiplier.display_cycles();
    let parity = multiplier.display_parity_offset(table_size);
    let read_offset = phase_entries as usize;
    let write_offset = display_phase_entries as usize;

    for i in 0..table_size {
        let revolving = (cycles * i + read_offset + parity) % table_size;
        let display_index = (i + write_offset) % table_size;
        scratch[display_index] = raw[revolving];
    }

    let half_swing = 0.5 * depth / 100.0;
    for (entry, &v) in out.iter_mut().zip(scratch.iter()) {
        *entry = remap(v, min, max, -half_swing, half_swing);
    }
}
