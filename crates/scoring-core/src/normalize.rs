use crate::config::Thresholds;

/// Sub-score reported when a metric cannot be computed ("no information").
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Outcome of a metric extraction. Missing years, empty denominators and
/// too-short series all collapse to `Undefined`, which normalizes to the
/// neutral sentinel instead of failing the evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Defined(f64),
    Undefined,
}

impl MetricValue {
    /// Normalize against configured thresholds; `Undefined` maps to the
    /// neutral sentinel.
    pub fn stretch(self, thresholds: &Thresholds) -> f64 {
        match self {
            MetricValue::Defined(value) => stretch_score(value, thresholds),
            MetricValue::Undefined => NEUTRAL_SCORE,
        }
    }

    /// Rescale a defined value (e.g. fraction to percent) before scoring.
    pub fn map(self, f: impl FnOnce(f64) -> f64) -> MetricValue {
        match self {
            MetricValue::Defined(value) => MetricValue::Defined(f(value)),
            MetricValue::Undefined => MetricValue::Undefined,
        }
    }

    /// Normalize with the fixed-clamp policy: `clamp(base + k * raw)`.
    pub fn clamp_linear(self, base: f64, k: f64) -> f64 {
        match self {
            MetricValue::Defined(value) => clamp_score(base + k * value),
            MetricValue::Undefined => NEUTRAL_SCORE,
        }
    }
}

impl From<Option<f64>> for MetricValue {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) => MetricValue::Defined(v),
            None => MetricValue::Undefined,
        }
    }
}

/// Hard clamp onto the score scale.
pub fn clamp_score(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// Reported scores carry two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Piecewise-linear stretch of a raw metric value onto [0, 100].
///
/// Non-reversed: `low` maps to 0, `high` to 100, values in between are
/// interpolated linearly. A configured `mid` is a fixed anchor that scores
/// exactly 75 regardless of where interpolation would place it.
///
/// Reversed (lower is better, `high < low` by convention): `low` maps to 0,
/// `high` to 100.
pub fn stretch_score(value: f64, t: &Thresholds) -> f64 {
    if t.reverse {
        if value >= t.low {
            0.0
        } else if value <= t.high {
            100.0
        } else {
            clamp_score((1.0 - (value - t.high) / (t.low - t.high)) * 100.0)
        }
    } else if value <= t.low {
        0.0
    } else if value >= t.high {
        100.0
    } else if t.mid == Some(value) {
        75.0
    } else {
        clamp_score((value - t.low) / (t.high - t.low) * 100.0)
    }
}
