//! Tick and nice-domain arithmetic for continuous numeric domains.
//!
//! Steps are always 1, 2 or 5 times a power of ten. Sub-unit steps are
//! represented by their negated inverse (`-10` for a step of `0.1`) so that
//! boundaries are computed by division, which keeps them exact.

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

fn step_factor(error: f64) -> f64 {
    if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    }
}

/// Generate approximately `count` round values within `[start, stop]`
pub fn ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if !(count > 0.0) {
        return vec![];
    }

    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (i1, i2, inc) = if reverse {
        tick_spec(stop, start, count)
    } else {
        tick_spec(start, stop, count)
    };

    if !(i2 >= i1) {
        return vec![];
    }

    let n = (i2 - i1 + 1.0) as usize;
    let value = |i: f64| if inc < 0.0 { i / -inc } else { i * inc };

    if reverse {
        (0..n).map(|i| value(i2 - i as f64)).collect()
    } else {
        (0..n).map(|i| value(i1 + i as f64)).collect()
    }
}

/// Returns `(first index, last index, increment)` of the ticks in `[start, stop]`
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powi(power as i32);
    let factor = step_factor(error);

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let inverse = 10f64.powi(-power as i32) / factor;
        i1 = (start * inverse).round();
        i2 = (stop * inverse).round();
        if i1 / inverse < start {
            i1 += 1.0;
        }
        if i2 / inverse > stop {
            i2 -= 1.0;
        }
        inc = -inverse;
    } else {
        inc = 10f64.powi(power as i32) * factor;
        i1 = (start / inc).round();
        i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
    }

    if i2 < i1 && 0.5 <= count && count < 2.0 {
        return tick_spec(start, stop, count * 2.0);
    }

    (i1, i2, inc)
}

/// Tick increment for the given span and count.
///
/// Positive results are the step itself, negative results the negated
/// inverse of a sub-unit step. NaN for a non-positive count, negative
/// infinity for an empty span.
pub fn tick_increment(start: f64, stop: f64, count: f64) -> f64 {
    if !(count > 0.0) {
        return f64::NAN;
    }

    if start == stop {
        return f64::NEG_INFINITY;
    }

    let step = (stop - start) / count;
    if step == 0.0 {
        return f64::NAN;
    }

    let power = step.log10().floor();
    let error = step / 10f64.powi(power as i32);
    let factor = step_factor(error);

    if power >= 0.0 {
        factor * 10f64.powi(power as i32)
    } else {
        -10f64.powi(-power as i32) / factor
    }
}

/// Signed distance between adjacent ticks
pub fn tick_step(start: f64, stop: f64, count: f64) -> f64 {
    let reverse = stop < start;
    let inc = if reverse {
        tick_increment(stop, start, count)
    } else {
        tick_increment(start, stop, count)
    };
    let step = if inc < 0.0 { 1.0 / -inc } else { inc };
    if reverse {
        -step
    } else {
        step
    }
}

// Multiples of a round step computed by division can land one ulp off an
// integer; treat those as the integer so rounding again is a no-op.
fn floor_snapped(v: f64) -> f64 {
    let r = v.round();
    if r > v && r - v <= 1e-12 * r.abs().max(1.0) {
        r
    } else {
        v.floor()
    }
}

fn ceil_snapped(v: f64) -> f64 {
    let r = v.round();
    if r < v && v - r <= 1e-12 * r.abs().max(1.0) {
        r
    } else {
        v.ceil()
    }
}

/// Widen `(start, stop)` outward to multiples of the tick step for `count`
/// ticks. Reversed domains stay reversed; the result always contains the
/// input and rounding a rounded domain returns it unchanged.
pub fn nice_domain(start: f64, stop: f64, count: usize) -> (f64, f64) {
    if start == stop || !start.is_finite() || !stop.is_finite() || count == 0 {
        return (start, stop);
    }

    let reverse = stop < start;
    let (orig_lo, orig_hi) = if reverse { (stop, start) } else { (start, stop) };
    let (mut lo, mut hi) = (orig_lo, orig_hi);

    let mut prestep = 0.0;
    for _ in 0..10 {
        let step = tick_increment(lo, hi, count as f64);
        if step == prestep {
            break;
        } else if step > 0.0 {
            lo = floor_snapped(lo / step) * step;
            hi = ceil_snapped(hi / step) * step;
        } else if step < 0.0 {
            lo = ceil_snapped(lo * step) / step;
            hi = floor_snapped(hi * step) / step;
        } else {
            break;
        }
        prestep = step;
    }

    let lo = lo.min(orig_lo);
    let hi = hi.max(orig_hi);
    if reverse {
        (hi, lo)
    } else {
        (lo, hi)
    }
}
