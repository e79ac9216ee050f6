use std::f64::consts::PI;

use crate::color::SeriesColor;
use crate::data::model::Column;

use super::stats::ColumnStatistics;

/// Distance added on both sides of the pooled sample range.
pub const DEFAULT_MARGIN: f64 = 3.0;
/// Number of x-coordinates every curve is sampled at.
pub const DEFAULT_RESOLUTION: usize = 100;

// ---------------------------------------------------------------------------
// SharedDomain – the x-axis common to all curves
// ---------------------------------------------------------------------------

/// Evenly spaced x-coordinates spanning every column's samples plus a margin.
#[derive(Debug, Clone, PartialEq)]
pub struct SharedDomain {
    pub global_min: f64,
    pub global_max: f64,
    pub points: Vec<f64>,
}

impl SharedDomain {
    /// Pool the extremes of all columns and lay `resolution` points over
    /// `[global_min - margin, global_max + margin]`.
    ///
    /// Empty columns drop out of the reduction. When every column is empty the
    /// extremes stay at `+∞` / `−∞` and the points come out non-finite.
    pub fn resolve(columns: &[Column], margin: f64, resolution: usize) -> Self {
        let (global_min, global_max) = columns
            .iter()
            .flat_map(|c| c.samples.iter().copied())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });

        SharedDomain {
            global_min,
            global_max,
            points: linspace(global_min - margin, global_max + margin, resolution),
        }
    }

    pub fn start(&self) -> Option<f64> {
        self.points.first().copied()
    }

    pub fn end(&self) -> Option<f64> {
        self.points.last().copied()
    }
}

/// `num` points from `start` to `end`, both included.
pub fn linspace(start: f64, end: f64, num: usize) -> Vec<f64> {
    if num < 2 {
        return vec![start; num];
    }
    let step = (end - start) / (num - 1) as f64;
    (0..num).map(|k| start + step * k as f64).collect()
}

// ---------------------------------------------------------------------------
// Curve synthesis
// ---------------------------------------------------------------------------

/// Normal probability density with the given mean and standard deviation.
pub fn normal_pdf(x: f64, mean: f64, std_dev: f64) -> f64 {
    (1.0 / (std_dev * (2.0 * PI).sqrt())) * (-0.5 * ((x - mean) / std_dev).powi(2)).exp()
}

/// Evaluate a column's fitted density at every domain point, in order.
pub fn synthesize(domain: &SharedDomain, stats: &ColumnStatistics) -> Vec<f64> {
    domain
        .points
        .iter()
        .map(|&x| normal_pdf(x, stats.mean, stats.std_dev))
        .collect()
}

/// One column's density curve, ready to hand to the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSeries {
    pub label: String,
    /// Same length and order as the [`SharedDomain`] points.
    pub values: Vec<f64>,
    pub color: SeriesColor,
}
