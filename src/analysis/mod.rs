//! Statistics and curve synthesis for a loaded table.
//!
//! ```text
//!  RawTable ─► sampler ─► Vec<Column>
//!                              │
//!                 ┌────────────┴────────────┐
//!                 ▼                         ▼
//!        ColumnStatistics (per column)   SharedDomain (pooled)
//!                 └────────────┬────────────┘
//!                              ▼
//!                     CurveSeries (per column)
//! ```
//!
//! A run is a pure function of its input: submitting the same table twice
//! gives identical results.

pub mod curve;
pub mod stats;

use crate::color::generate_palette;
use crate::data::model::{Column, RawTable};
use crate::data::sampler::sample_columns;

use curve::{synthesize, CurveSeries, SharedDomain, DEFAULT_MARGIN, DEFAULT_RESOLUTION};
use stats::{ColumnStatistics, Summary};

/// Tunables of a single run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    pub margin: f64,
    pub resolution: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            resolution: DEFAULT_RESOLUTION,
        }
    }
}

/// Everything derived from one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub source: String,
    pub columns: Vec<Column>,
    /// Parallel to `columns`.
    pub stats: Vec<ColumnStatistics>,
    pub domain: SharedDomain,
    /// Parallel to `columns`.
    pub series: Vec<CurveSeries>,
}

impl Analysis {
    pub fn run(table: &RawTable, config: &AnalysisConfig) -> Self {
        let columns = sample_columns(table);
        let stats: Vec<ColumnStatistics> = columns
            .iter()
            .map(|c| ColumnStatistics::compute(&c.samples))
            .collect();

        for (col, st) in columns.iter().zip(&stats) {
            if col.is_empty() {
                log::warn!("Column '{}' has no numeric samples; its curve is not finite", col.label);
            } else if st.is_degenerate() {
                log::warn!(
                    "Column '{}' has zero spread over {} sample(s); its curve is not finite",
                    col.label,
                    st.count
                );
            }
        }

        let domain = SharedDomain::resolve(&columns, config.margin, config.resolution);
        let colors = generate_palette(columns.len());

        let series = columns
            .iter()
            .zip(&stats)
            .zip(colors)
            .map(|((col, st), color)| CurveSeries {
                label: col.label.clone(),
                values: synthesize(&domain, st),
                color,
            })
            .collect();

        log::info!(
            "Analysed {} column(s) from {}, pooled range [{}, {}]",
            columns.len(),
            table.source,
            domain.global_min,
            domain.global_max
        );

        Analysis {
            source: table.source.clone(),
            columns,
            stats,
            domain,
            series,
        }
    }

    /// Display line per column: label, mean and std dev to two decimals.
    pub fn summaries(&self) -> Vec<String> {
        self.columns
            .iter()
            .zip(&self.stats)
            .map(|(col, stats)| {
                Summary {
                    label: &col.label,
                    stats,
                }
                .to_string()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_clipboard_text;

    fn run(text: &str) -> Analysis {
        let table = parse_clipboard_text(text).unwrap();
        Analysis::run(&table, &AnalysisConfig::default())
    }

    fn argmax(values: &[f64]) -> usize {
        values
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |(bi, bv), (i, &v)| {
                if v > bv {
                    (i, v)
                } else {
                    (bi, bv)
                }
            })
            .0
    }

    #[test]
    fn two_column_scenario() {
        let a = run("A\tB\n1\t10\n2\t20\n3\t30");

        assert_eq!(a.columns[0].samples, vec![1.0, 2.0, 3.0]);
        assert_eq!(a.columns[1].samples, vec![10.0, 20.0, 30.0]);

        assert!((a.stats[0].mean - 2.0).abs() < 1e-12);
        assert!((a.stats[0].std_dev - 0.816_496_580_927_726).abs() < 1e-9);
        assert!((a.stats[1].mean - 20.0).abs() < 1e-12);
        assert!((a.stats[1].std_dev - 8.164_965_809_277_26).abs() < 1e-9);

        assert_eq!(a.domain.points.len(), 100);
        assert_eq!(a.domain.start(), Some(-2.0));
        assert!((a.domain.end().unwrap() - 33.0).abs() < 1e-12);

        assert_eq!(a.series.len(), 2);
        for (series, stats) in a.series.iter().zip(&a.stats) {
            assert_eq!(series.values.len(), 100);
            let peak_x = a.domain.points[argmax(&series.values)];
            let spacing = 35.0 / 99.0;
            assert!((peak_x - stats.mean).abs() <= spacing);
        }
    }

    #[test]
    fn summaries_are_display_lines() {
        let a = run("A\tB\n1\t10\n2\t20\n3\t30");
        assert_eq!(
            a.summaries(),
            vec![
                "A - mean: 2.00, std dev: 0.82".to_string(),
                "B - mean: 20.00, std dev: 8.16".to_string(),
            ]
        );
    }

    #[test]
    fn resubmission_is_identical() {
        let text = "x\ty\tz\n1.1\t7\t\n2.2\tfoo\t3\n-4\t8.5\t3\n";
        let first = run(text);
        let second = run(text);
        assert_eq!(first.domain.points.len(), second.domain.points.len());
        for (p, q) in first.domain.points.iter().zip(&second.domain.points) {
            assert_eq!(p.to_bits(), q.to_bits());
        }
        for (s, t) in first.series.iter().zip(&second.series) {
            assert_eq!(s.label, t.label);
            assert_eq!(s.color, t.color);
            let sb: Vec<u64> = s.values.iter().map(|v| v.to_bits()).collect();
            let tb: Vec<u64> = t.values.iter().map(|v| v.to_bits()).collect();
            assert_eq!(sb, tb);
        }
    }

    #[test]
    fn one_series_per_header_with_distinct_colors() {
        let a = run("a\tb\tc\td\te\n1\t2\t3\t4\t5\n2\t3\t4\t5\t6");
        assert_eq!(a.series.len(), 5);
        let hues: Vec<u32> = a.series.iter().map(|s| s.color.hue).collect();
        assert_eq!(hues, vec![0, 72, 144, 216, 288]);
    }

    #[test]
    fn degenerate_columns_propagate_non_finite_values() {
        let a = run("ok\tconst\tempty\n1\t5\tx\n3\t5\t\n");
        assert_eq!(a.series.len(), 3);

        assert!(a.series[0].values.iter().all(|v| v.is_finite()));
        assert!(a.stats[1].is_degenerate());
        assert!(a.series[1].values.iter().any(|v| !v.is_finite()));
        assert!(a.stats[2].mean.is_nan());
        assert!(a.series[2].values.iter().all(|v| v.is_nan()));

        // The empty column does not shrink or stretch the domain.
        assert_eq!(a.domain.global_min, 1.0);
        assert_eq!(a.domain.global_max, 5.0);
    }

    #[test]
    fn custom_margin_and_resolution() {
        let table = parse_clipboard_text("v\n0\n10").unwrap();
        let config = AnalysisConfig {
            margin: 1.0,
            resolution: 12,
        };
        let a = Analysis::run(&table, &config);
        assert_eq!(a.domain.points.len(), 12);
        assert_eq!(a.domain.start(), Some(-1.0));
        assert_eq!(a.series[0].values.len(), 12);
    }
}
