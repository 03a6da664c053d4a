//! Minimal continuous scales for chart layout.
//!
//! Same semantics as the d3 `scaleLinear`/`scaleTime` pair the charts were
//! originally designed around, including the `nice()` domain rounding.

use chrono::{DateTime, Utc};

const E10: f64 = 7.071_067_811_865_475_5; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Continuous linear scale mapping a numeric domain onto an output range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Map a domain value onto the output range.
    ///
    /// A zero-span domain maps everything to the range midpoint.
    pub fn scale(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;

        let span = d1 - d0;
        let t = if span == 0.0 { 0.5 } else { (value - d0) / span };
        r0 + t * (r1 - r0)
    }

    /// Extend the domain outward to round values, with the default tick
    /// count of 10.
    pub fn nice(self) -> Self {
        self.nice_count(10.0)
    }

    fn nice_count(mut self, count: f64) -> Self {
        let (mut start, mut stop) = self.domain;
        let reversed = stop < start;
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }

        let mut prestep = f64::NAN;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count);
            if step == prestep {
                break;
            } else if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                // Fractional steps are encoded as -1/step.
                let inv = -step;
                start = (start * inv).floor() / inv;
                stop = (stop * inv).ceil() / inv;
            } else {
                break;
            }
            prestep = step;
        }

        self.domain = if reversed { (stop, start) } else { (start, stop) };
        self
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// Tick step for a domain and target count. Positive values are the step
/// itself; negative values encode a fractional step as -1/step.
fn tick_increment(start: f64, stop: f64, count: f64) -> f64 {
    let step = (stop - start) / count.max(0.0);
    let power = (step.ln() / std::f64::consts::LN_10).floor();
    let error = step / 10f64.powf(power);

    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -(10f64.powf(-power)) / factor
    }
}

/// Time-domain scale backed by a linear scale over epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    inner: LinearScale,
}

impl TimeScale {
    pub fn new(domain: (DateTime<Utc>, DateTime<Utc>), range: (f64, f64)) -> Self {
        Self {
            inner: LinearScale::new(
                (
                    domain.0.timestamp_millis() as f64,
                    domain.1.timestamp_millis() as f64,
                ),
                range,
            ),
        }
    }

    /// Map a timestamp onto the output range.
    pub fn scale(&self, value: DateTime<Utc>) -> f64 {
        self.inner.scale(value.timestamp_millis() as f64)
    }
}
