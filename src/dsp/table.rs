/*
Table Normalization
===================

Raw cycles come out of `dsp::waveshape` as unit-ish curves whose exact
extremes depend on shape, symmetry, and the smoothing windows. The audio
path wants none of that variance: whatever the raw extremes were, the
published gain table must span exactly

    [1 - depth/100, 1.0]

so depth 0 collapses to a constant 1.0 (no modulation) and depth 100
reaches the full [0, 1] swing. We scan for the raw min/max once, then remap
every entry linearly.

The degenerate case min == max (a flat raw table, e.g. a fully smoothed-out
shape at extreme settings) must not divide by zero. It resolves locally to
the top of the output range - a flat table of 1.0 on the audio path - and
no error is surfaced.
*/

/// Scan a table for its minimum and maximum values.
pub fn extrema(table: &[f32]) -> (f32, f32) {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for &v in table {
        min = min.min(v);
        max = max.max(v);
    }
    (min, max)
}

/// Linear remap of `x` from [in_min, in_max] to [out_min, out_max].
///
/// A degenerate input range maps everything to `out_max`.
#[inline]
pub fn remap(x: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let span = in_max - in_min;
    if span.abs() <= f32::EPSILON {
        return out_max;
    }
    out_min + (x - in_min) * (out_max - out_min) / span
}

/// Rescale a raw cycle into an audio-ready gain table spanning
/// [1 - depth/100, 1.0].
pub fn normalize_gain(raw: &[f32], depth: f32, out: &mut [f32]) {
    debug_assert_eq!(raw.len(), out.len());

    let (min, max) = extrema(raw);
    let floor = 1.0 - depth / 100.0;
    for (entry, &v) in out.iter_mut().zip(raw) {
        *entry = remap(v, min, max, floor, 1.0);
    }
}
