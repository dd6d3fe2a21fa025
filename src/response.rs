//! Response curves that turn raw motion deltas into `[0, 1]` channel inputs.

use crate::constants::DEGENERATE_RANGE_TOLERANCE;

/// Whether `[min, max]` is too narrow to normalize against
#[must_use]
pub fn is_degenerate_range(min: f64, max: f64) -> bool {
    (min - max).abs() < DEGENERATE_RANGE_TOLERANCE
}

/// Normalize `raw` against `[min, max]` without clamping.
///
/// Used by the angular channel, whose input may exceed the range before
/// smoothing. A degenerate range yields 0.
#[must_use]
pub fn normalize_unclamped(raw: f64, min: f64, max: f64) -> f64 {
    if is_degenerate_range(min, max) {
        return 0.0;
    }
    (raw - min) / (max - min)
}

/// Normalize `raw` against `[min, max]` and clamp into `[0, 1]`.
#[must_use]
pub fn normalize(raw: f64, min: f64, max: f64) -> f64 {
    if is_degenerate_range(min, max) {
        return 0.0;
    }
    normalize_unclamped(raw, min, max).clamp(0.0, 1.0)
}

/// Map `value` from `input` to `output`, clamping the interpolation
/// fraction so the result stays between the output endpoints.
///
/// The output range may be descending. A degenerate input range maps
/// everything to the start of the output range.
#[must_use]
pub fn map_range_clamped(value: f64, input: (f64, f64), output: (f64, f64)) -> f64 {
    let span = input.1 - input.0;
    let pct = if span == 0.0 {
        0.0
    } else {
        ((value - input.0) / span).clamp(0.0, 1.0)
    };
    (output.1 - output.0).mul_add(pct, output.0)
}
