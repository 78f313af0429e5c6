use std::f32::consts::PI;

use crate::dsp::smoothing::edge_smooth;
use crate::params::Waveshape;

/*
Waveshape Synthesis
===================

One call fills a full-cycle raw amplitude table. The cycle is split into two
segments at the symmetry point:

    period_left  = table_size * symmetry / 100
    period_right = table_size - period_left

Each shape defines a curve per segment. With symmetry at 50 the segments are
equal; pushing symmetry toward 0 or 100 skews the cycle until one segment
vanishes entirely. A zero-length segment is valid - its loop body simply
never runs, so the degenerate cases cannot divide by zero.

Raw tables are *not* gain values yet. They are unit-ish curves (roughly 0..1,
negated when inverted) that `dsp::table` later rescales against the depth
setting. Keeping synthesis and depth scaling separate means the extremes of
any shape/symmetry combination always map to exactly [1 - depth, 1].

Discontinuous shapes get edge smoothing (`dsp::smoothing`):

  - Ramps jump only at the cycle wrap, so one window spans the whole table.
  - Square jumps at the symmetry point too, so each segment gets its own
    window, and the level passes through the 0.5 midline at every edge.
*/

/// Index of the first entry of the right segment.
#[inline]
pub fn period_left(table_size: usize, symmetry: f32) -> usize {
    (table_size as f32 * symmetry / 100.0) as usize
}

/// Fill `out` with one raw cycle of `shape`.
///
/// `symmetry` is a percentage in [0, 100]; `invert` flips the polarity of
/// the whole cycle. The output is deterministic: same inputs, same table.
pub fn render_cycle(shape: Waveshape, symmetry: f32, invert: bool, out: &mut [f32]) {
    let table_size = out.len();
    let split = period_left(table_size, symmetry);

    let n = table_size as f32;
    let pl = split as f32;
    let pr = (table_size - split) as f32;
    let sign = if invert { -1.0 } else { 1.0 };

    for (i, entry) in out.iter_mut().enumerate() {
        let x = i as f32;
        // Segment-local position; only meaningful in the right branch.
        let j = x - pl;

        let value = if i < split {
            match shape {
                Waveshape::RampUp => 0.5 * (x / pl) * edge_smooth(x, n),
                Waveshape::RampDown => (1.0 - 0.5 * x / pl) * edge_smooth(x, n),
                Waveshape::Square => 0.5 + 0.5 * edge_smooth(x, pl),
                Waveshape::Triangle => x / pl,
                Waveshape::Sine => 0.5 + 0.5 * (PI * x / pl).sin(),
                Waveshape::HumpDown => 1.0 - (0.5 * PI * x / pl).sin(),
                Waveshape::HumpUp => (0.5 * PI * x / pl).sin(),
            }
        } else {
            match shape {
                Waveshape::RampUp => (0.5 + 0.5 * j / pr) * edge_smooth(x, n),
                Waveshape::RampDown => (0.5 - 0.5 * j / pr) * edge_smooth(x, n),
                Waveshape::Square => 0.5 - 0.5 * edge_smooth(j, pr),
                Waveshape::Triangle => 1.0 - j / pr,
                Waveshape::Sine => 0.5 - 0.5 * (PI * j / pr).sin(),
                Waveshape::HumpDown => 1.0 - (0.5 * PI * j / pr).cos(),
                Waveshape::HumpUp => (0.5 * PI * j / pr).cos(),
            }
        };

        *entry = sign * value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE_SIZE: usize = 4800;

    fn all_shapes() -> [Waveshape; Waveshape::COUNT] {
        [
            Waveshape::RampUp,
            Waveshape::RampDown,
            Waveshape::Square,
            Waveshape::Triangle,
            Waveshape::Sine,
            Waveshape::HumpDown,
            Waveshape::HumpUp,
        ]
    }

    fn render(shape: Waveshape, symmetry: f32, invert: bool) -> Vec<f32> {
        let mut table = vec![0.0; TABLE_SIZE];
        render_cycle(shape, symmetry, invert, &mut table);
        table
    }

    #[test]
    fn raw_values_stay_in_unit_band() {
        for shape in all_shapes() {
            for &symmetry in &[0.0, 25.0, 50.0, 75.0, 100.0] {
                let table = render(shape, symmetry, false);
                for (i, &v) in table.iter().enumerate() {
                    assert!(
                        (-0.001..=1.001).contains(&v),
                        "{shape:?} sym={symmetry} entry {i} = {v}"
                    );
                }
            }
        }
    }

    #[test]
    fn degenerate_symmetry_does_not_panic() {
        // symmetry 0 leaves the left segment empty, 100 the right one; both
        // must still fill the full table with finite values.
        for shape in all_shapes() {
            for &symmetry in &[0.0, 100.0] {
                let table = render(shape, symmetry, false);
                assert!(table.iter().all(|v| v.is_finite()));
            }
        }
    }

    #[test]
    fn invert_flips_polarity_of_every_entry() {
        for shape in all_shapes() {
            let plain = render(shape, 50.0, false);
            let flipped = render(shape, 50.0, true);
            for (i, (&a, &b)) in plain.iter().zip(&flipped).enumerate() {
                assert!((a + b).abs() < 1e-6, "{shape:?} entry {i}: {a} vs {b}");
            }
        }
    }

    #[test]
    fn square_plateaus_high_then_low() {
        let table = render(Waveshape::Square, 50.0, false);
        let mid_left = table[TABLE_SIZE / 4];
        let mid_right = table[3 * TABLE_SIZE / 4];
        assert!((mid_left - 1.0).abs() < 1e-2, "left plateau {mid_left}");
        assert!(mid_right.abs() < 1e-2, "right plateau {mid_right}");
    }

    #[test]
    fn square_crosses_midline_at_edges() {
        let table = render(Waveshape::Square, 50.0, false);
        assert!((table[0] - 0.5).abs() < 1e-4);
        assert!((table[TABLE_SIZE / 2] - 0.5).abs() < 1e-4);
    }

    #[test]
    fn triangle_peaks_at_symmetry_point() {
        for &symmetry in &[25.0, 50.0, 75.0] {
            let table = render(Waveshape::Triangle, symmetry, false);
            let split = period_left(TABLE_SIZE, symmetry);
            let peak_entry = table[split];
            assert!(
                (peak_entry - 1.0).abs() < 1e-3,
                "sym={symmetry} peak {peak_entry}"
            );
        }
    }

    #[test]
    fn ramp_up_is_monotonic_away_from_edges() {
        let table = render(Waveshape::RampUp, 50.0, false);
        // Skip the smoothed bands at the wrap; the body of the ramp rises.
        let body = &table[TABLE_SIZE / 10..9 * TABLE_SIZE / 10];
        for pair in body.windows(2) {
            assert!(pair[1] >= pair[0] - 1e-4);
        }
    }

    #[test]
    fn hump_up_rises_then_falls() {
        let table = render(Waveshape::HumpUp, 50.0, false);
        assert!(table[0].abs() < 1e-6);
        assert!((table[TABLE_SIZE / 2 - 1] - 1.0).abs() < 1e-3);
        assert!(table[TABLE_SIZE - 1].abs() < 1e-3);
    }

    #[test]
    fn identical_inputs_reproduce_identical_tables() {
        for shape in all_shapes() {
            let first = render(shape, 33.0, true);
            let second = render(shape, 33.0, true);
            assert_eq!(first, second);
        }
    }
}
