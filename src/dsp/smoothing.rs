use std::f32::consts::PI;

/*
Edge Smoothing
==============

Ramp and square shapes have hard jumps: a rising ramp snaps from full level
back to zero at the cycle wrap, and a square snaps twice per cycle. Played as
an amplitude envelope those jumps click audibly.

The fix is a soft-clip window applied across a segment:

    y(i) = atan( sin(pi * i / N) / delta ) / atan(1 / delta)

  - sin(pi*i/N) is 0 at both segment boundaries and 1 mid-segment
  - dividing by a small delta and running through atan squashes everything
    that isn't near a boundary up toward 1
  - the outer 1/atan(1/delta) factor rescales the plateau back to exactly 1

So the window is ~1 almost everywhere and collapses to 0 in a narrow band at
each boundary. Smaller delta = narrower band = sharper corners. The engine
fixes delta at 0.01, which at a 48k-entry table confines the transition to a
few hundred entries.

Ramps multiply the whole cycle by one window (the only jump is at the wrap).
Square applies a window per segment, because it jumps at the symmetry point
as well as at the wrap - see `dsp::waveshape`.
*/

/// Smoothing constant used for every edge window in the engine.
pub const EDGE_DELTA: f32 = 0.01;

/// Soft window over a segment of length `segment_len`: ~1.0 mid-segment,
/// collapsing to 0.0 at both boundaries.
#[inline]
pub fn edge_smooth(index: f32, segment_len: f32) -> f32 {
    edge_smooth_with_delta(index, segment_len, EDGE_DELTA)
}

/// Same window with an explicit smoothing constant.
#[inline]
pub fn edge_smooth_with_delta(index: f32, segment_len: f32, delta: f32) -> f32 {
    let scale = 1.0 / (1.0 / delta).atan();
    scale * ((PI * index / segment_len).sin() / delta).atan()
}
