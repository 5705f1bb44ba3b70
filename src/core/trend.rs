//! Weekly trend series for a currency pair.
//!
//! A trend is at most [`TREND_DAYS`] points, oldest first, each labelled
//! with its weekday. When no real history is available a plausible series
//! is synthesized around the latest rate so the chart never goes blank.

use crate::core::rates::HistoryPoint;
use chrono::{Duration, NaiveDate};
use rand::Rng;

/// Days of history shown in the trend chart.
pub const TREND_DAYS: usize = 7;

/// How far a synthesized point may wander from the latest rate (1%).
const SYNTH_JITTER: f64 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    /// Abbreviated weekday, e.g. "Mon".
    pub label: String,
    pub rate: f64,
}

fn day_label(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

/// Converts provider history into a trend, keeping only the most recent
/// [`TREND_DAYS`] points.
pub fn from_history(points: &[HistoryPoint]) -> Vec<TrendPoint> {
    let start = points.len().saturating_sub(TREND_DAYS);
    points[start..]
        .iter()
        .map(|point| TrendPoint {
            label: day_label(point.date),
            rate: point.rate,
        })
        .collect()
}

/// Builds a stand-in series for the week ending at `today`. Every point
/// except the last jitters within ±[`SYNTH_JITTER`] of `latest_rate`; the
/// last point is the exact latest rate so the chart agrees with the
/// headline number.
pub fn synthesize(latest_rate: f64, today: NaiveDate, rng: &mut impl Rng) -> Vec<TrendPoint> {
    (0..TREND_DAYS)
        .map(|i| {
            let days_back = (TREND_DAYS - 1 - i) as i64;
            let date = today - Duration::days(days_back);
            let rate = if days_back == 0 {
                latest_rate
            } else {
                latest_rate * (1.0 + rng.gen_range(-SYNTH_JITTER..SYNTH_JITTER))
            };
            TrendPoint {
                label: day_label(date),
                rate,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_history_keeps_last_seven_days() {
        let points: Vec<HistoryPoint> = (1..=9)
            .map(|d| HistoryPoint {
                date: date(2024, 1, d),
                rate: f64::from(d),
            })
            .collect();

        let trend = from_history(&points);
        assert_eq!(trend.len(), TREND_DAYS);
        assert_eq!(trend[0].rate, 3.0);
        assert_eq!(trend[6].rate, 9.0);
    }

    #[test]
    fn test_from_history_accepts_short_series() {
        let points = vec![
            HistoryPoint {
                date: date(2024, 1, 1), // a Monday
                rate: 0.92,
            },
            HistoryPoint {
                date: date(2024, 1, 2),
                rate: 0.93,
            },
        ];

        let trend = from_history(&points);
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].label, "Mon");
        assert_eq!(trend[1].label, "Tue");
    }

    #[test]
    fn test_synthesize_covers_week_ending_today() {
        let mut rng = StdRng::seed_from_u64(7);
        let today = date(2024, 2, 3); // a Saturday
        let trend = synthesize(15800.0, today, &mut rng);

        assert_eq!(trend.len(), TREND_DAYS);
        assert_eq!(trend[0].label, "Sun");
        assert_eq!(trend[6].label, "Sat");
    }

    #[test]
    fn test_synthesize_jitters_within_one_percent() {
        let mut rng = StdRng::seed_from_u64(42);
        let trend = synthesize(15800.0, date(2024, 2, 3), &mut rng);

        for point in &trend {
            assert!(point.rate >= 15800.0 * 0.99);
            assert!(point.rate <= 15800.0 * 1.01);
        }
        // final point is the exact latest rate, not a jittered one
        assert_eq!(trend[6].rate, 15800.0);
    }
}
