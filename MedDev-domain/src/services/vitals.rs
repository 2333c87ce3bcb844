//! Synthetic vitals generation
//!
//! Each series is a smooth wave around the patient's baseline plus a small
//! uniform jitter. Both the random source and "today" are injected so a
//! seeded generator reproduces the same vectors.

use chrono::{Days, NaiveDate, Utc};
use rand::Rng;

use meddev_data::models::{VitalsBaseline, VitalsSample};

/// Number of days a chart covers
pub const DEFAULT_SERIES_DAYS: u32 = 30;

/// Source of the current calendar day
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall clock, UTC calendar day
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Clock pinned to one day
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Generate `days` samples ending on `today`, oldest first
///
/// For the sample `i` days before today:
/// heart rate = base + 5·sin(i/3) + U(0,3),
/// systolic = base + 6·cos(i/4) + U(0,4),
/// diastolic = base + 4·sin(i/5) + U(0,3), each rounded to the nearest integer.
///
/// Days before the earliest representable date are left out, so the series
/// is shorter than `days` only when `today` is that close to it.
pub fn generate<R: Rng>(
    base_heart_rate: f64,
    base_systolic: f64,
    base_diastolic: f64,
    days: u32,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<VitalsSample> {
    let days = days.min(reachable_days(today));
    (0..days)
        .rev()
        .filter_map(|days_back| {
            let date = today.checked_sub_days(Days::new(u64::from(days_back)))?;
            let i = f64::from(days_back);
            Some(VitalsSample {
                date,
                heart_rate: round(base_heart_rate + 5.0 * (i / 3.0).sin() + rng.gen_range(0.0..3.0)),
                systolic: round(base_systolic + 6.0 * (i / 4.0).cos() + rng.gen_range(0.0..4.0)),
                diastolic: round(base_diastolic + 4.0 * (i / 5.0).sin() + rng.gen_range(0.0..3.0)),
            })
        })
        .collect()
}

// Number of days from NaiveDate::MIN up to and including `today`
fn reachable_days(today: NaiveDate) -> u32 {
    let span = today.signed_duration_since(NaiveDate::MIN).num_days();
    u32::try_from(span).map_or(u32::MAX, |d| d.saturating_add(1))
}

/// [`generate`] driven by a stored baseline
pub fn generate_for<R: Rng>(
    baseline: &VitalsBaseline,
    days: u32,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<VitalsSample> {
    generate(
        baseline.heart_rate,
        baseline.systolic,
        baseline.diastolic,
        days,
        today,
        rng,
    )
}

// Half-way values round towards +inf, matching browser Math.round
fn round(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_sample_count_and_consecutive_dates() {
        let today = day(2024, 3, 5);
        let mut rng = StdRng::seed_from_u64(7);
        let samples = generate(72.0, 120.0, 80.0, 30, today, &mut rng);

        assert_eq!(samples.len(), 30);
        assert_eq!(samples.last().unwrap().date, today);
        assert_eq!(samples.first().unwrap().date, day(2024, 2, 5));
        for pair in samples.windows(2) {
            assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
        }
    }

    #[test]
    fn test_crosses_month_and_leap_day() {
        let mut rng = StdRng::seed_from_u64(1);
        let samples = generate(72.0, 120.0, 80.0, 3, day(2024, 3, 1), &mut rng);
        let dates: Vec<String> = samples.iter().map(|s| s.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-02-28", "2024-02-29", "2024-03-01"]);
    }

    #[test]
    fn test_zero_days_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate(72.0, 120.0, 80.0, 0, day(2024, 1, 1), &mut rng).is_empty());
    }

    #[test]
    fn test_series_stops_at_earliest_date() {
        let today = NaiveDate::MIN + Duration::days(2);
        let mut rng = StdRng::seed_from_u64(3);
        let samples = generate(72.0, 120.0, 80.0, 10, today, &mut rng);

        assert_eq!(samples.len(), 3);
        assert_eq!(samples.first().unwrap().date, NaiveDate::MIN);
        assert_eq!(samples.last().unwrap().date, today);
    }

    #[test]
    fn test_huge_day_count_at_earliest_date() {
        let mut rng = StdRng::seed_from_u64(3);
        let samples = generate(72.0, 120.0, 80.0, u32::MAX, NaiveDate::MIN, &mut rng);
        assert_eq!(samples.len(), 1);
        assert_eq!(reachable_days(NaiveDate::MIN), 1);
    }

    #[test]
    fn test_same_seed_reproduces_series() {
        let today = day(2025, 7, 22);
        let a = generate(85.0, 130.0, 85.0, 30, today, &mut StdRng::seed_from_u64(42));
        let b = generate(85.0, 130.0, 85.0, 30, today, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_values_stay_within_wave_and_jitter_bounds() {
        let today = day(2025, 7, 22);
        let mut rng = StdRng::seed_from_u64(99);
        let samples = generate(72.0, 120.0, 80.0, 60, today, &mut rng);

        // base ± amplitude, plus jitter below its upper bound, then rounding
        for s in &samples {
            assert!((67..=80).contains(&s.heart_rate), "heart rate {}", s.heart_rate);
            assert!((114..=130).contains(&s.systolic), "systolic {}", s.systolic);
            assert!((76..=87).contains(&s.diastolic), "diastolic {}", s.diastolic);
        }
    }

    #[test]
    fn test_today_sample_uses_zero_phase() {
        // sin(0) = 0 and cos(0) = 1, so today's values are base + jitter (+6 systolic)
        let today = day(2025, 1, 10);
        let mut rng = StdRng::seed_from_u64(5);
        let samples = generate(60.0, 100.0, 70.0, 1, today, &mut rng);
        let s = &samples[0];
        assert!((60..=63).contains(&s.heart_rate));
        assert!((106..=110).contains(&s.systolic));
        assert!((70..=73).contains(&s.diastolic));
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round(72.5), 73);
        assert_eq!(round(72.49), 72);
        assert_eq!(round(-0.5), 0);
    }
}
