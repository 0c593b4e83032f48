/// Tick count requested from the value axis when the layout does not override it.
pub const DEFAULT_VALUE_TICK_COUNT: usize = 10;

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Integer tick index bounds plus increment. A negative increment encodes a
/// fractional step as its reciprocal so tick values stay exact decimals.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10_f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, increment);
    if power < 0.0 {
        let inverse = 10_f64.powf(-power) / factor;
        i1 = (start * inverse).round();
        i2 = (stop * inverse).round();
        if i1 / inverse < start {
            i1 += 1.0;
        }
        if i2 / inverse > stop {
            i2 -= 1.0;
        }
        increment = -inverse;
    } else {
        let step = 10_f64.powf(power) * factor;
        i1 = (start / step).round();
        i2 = (stop / step).round();
        if i1 * step < start {
            i1 += 1.0;
        }
        if i2 * step > stop {
            i2 -= 1.0;
        }
        increment = step;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, increment)
}

/// Round-number ticks (steps of 1, 2 or 5 times a power of ten) covering
/// `[start, stop]`, aiming for roughly `count` values.
///
/// A zero-width range yields the single value `start`.
#[must_use]
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (low, high) = if reverse { (stop, start) } else { (start, stop) };
    let (i1, i2, increment) = tick_spec(low, high, count as f64);
    if !(i2 >= i1) {
        return Vec::new();
    }

    let n = (i2 - i1 + 1.0) as usize;
    let mut ticks: Vec<f64> = (0..n)
        .map(|offset| {
            let index = i1 + offset as f64;
            if increment < 0.0 {
                index / -increment
            } else {
                index * increment
            }
        })
        .collect();
    if reverse {
        ticks.reverse();
    }
    ticks
}

/// Spacing between the ticks [`linear_ticks`] would produce, or `0.0` when
/// there is no spacing (zero-width or invalid range).
#[must_use]
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    if count == 0 || !start.is_finite() || !stop.is_finite() || start == stop {
        return 0.0;
    }
    let (low, high) = if stop < start { (stop, start) } else { (start, stop) };
    let (_, _, increment) = tick_spec(low, high, count as f64);
    if increment < 0.0 {
        1.0 / -increment
    } else {
        increment
    }
}

/// Decimal places needed to print values on a grid of `step`.
#[must_use]
pub fn step_precision(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 || step >= 1.0 {
        return 0;
    }
    (-step.log10().floor()).clamp(0.0, 12.0) as usize
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{linear_ticks, step_precision, tick_step};

    #[test]
    fn ticks_cover_zero_to_hundred_in_tens() {
        let ticks = linear_ticks(0.0, 100.0, 10);
        assert_eq!(ticks.len(), 11);
        for (index, tick) in ticks.iter().enumerate() {
            assert_relative_eq!(*tick, index as f64 * 10.0);
        }
        assert_relative_eq!(tick_step(0.0, 100.0, 10), 10.0);
    }

    #[test]
    fn ticks_pick_nice_steps_for_awkward_maxima() {
        let ticks = linear_ticks(0.0, 873.0, 10);
        assert_eq!(ticks.first().copied(), Some(0.0));
        assert_eq!(ticks.last().copied(), Some(800.0));
        assert_relative_eq!(tick_step(0.0, 873.0, 10), 100.0);

        let small = linear_ticks(0.0, 3.0, 10);
        assert_relative_eq!(small[1], 0.2);
        assert_relative_eq!(*small.last().unwrap(), 3.0);
        assert_eq!(step_precision(tick_step(0.0, 3.0, 10)), 1);
    }

    #[test]
    fn degenerate_and_empty_requests() {
        assert_eq!(linear_ticks(0.0, 0.0, 10), vec![0.0]);
        assert!(linear_ticks(0.0, 10.0, 0).is_empty());
        assert!(linear_ticks(0.0, f64::NAN, 10).is_empty());
        assert_relative_eq!(tick_step(0.0, 0.0, 10), 0.0);
    }

    #[test]
    fn reversed_range_yields_descending_ticks() {
        assert_eq!(linear_ticks(10.0, 0.0, 2), vec![10.0, 5.0, 0.0]);
    }
}
