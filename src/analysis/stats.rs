use std::fmt;

// ---------------------------------------------------------------------------
// ColumnStatistics – descriptive statistics of one column
// ---------------------------------------------------------------------------

/// Mean and population standard deviation of a column's clean samples.
///
/// Nothing is special-cased: an empty column yields `NaN` for `mean` and
/// `std_dev`, a constant column yields `std_dev == 0.0`. Both flow on to the
/// curve as non-finite densities; [`is_degenerate`](Self::is_degenerate)
/// lets the UI point that out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStatistics {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation (divisor = `count`).
    pub std_dev: f64,
    /// Smallest sample, `+∞` when there are none.
    pub min: f64,
    /// Largest sample, `−∞` when there are none.
    pub max: f64,
}

impl ColumnStatistics {
    pub fn compute(samples: &[f64]) -> Self {
        let count = samples.len();
        let n = count as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        ColumnStatistics {
            count,
            mean,
            std_dev: variance.sqrt(),
            min,
            max,
        }
    }

    /// True when the fitted density cannot be evaluated (no samples or zero spread).
    pub fn is_degenerate(&self) -> bool {
        !self.mean.is_finite() || !self.std_dev.is_finite() || self.std_dev == 0.0
    }
}

/// One-line summary: `label - mean: m, std dev: s` (two decimals).
pub struct Summary<'a> {
    pub label: &'a str,
    pub stats: &'a ColumnStatistics,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - mean: {}, std dev: {}",
            self.label,
            fixed2(self.stats.mean),
            fixed2(self.stats.std_dev)
        )
    }
}

/// Two decimal places, with exact halves rounded away from zero.
///
/// `{:.2}` already rounds the exact binary value correctly; it only differs
/// on exact ties, which it sends to even. A double is an exact tie at the
/// third decimal only when it is a multiple of 1/8, so those are the only
/// values rounded by hand. `1.005` is stored below the tie and stays `1.00`.
pub fn fixed2(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if v == 0.0 {
        return "0.00".to_string();
    }

    let magnitude = v.abs();
    let hundredths = magnitude * 100.0;
    let text = if (magnitude * 8.0).fract() == 0.0 && hundredths.fract() == 0.5 {
        format!("{:.2}", hundredths.ceil() / 100.0)
    } else {
        format!("{magnitude:.2}")
    };

    if v < 0.0 {
        format!("-{text}")
    } else {
        text
    }
}
