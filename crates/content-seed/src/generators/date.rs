//! Historical date generation.

use rand::Rng;
use time::{Date, Duration};

/// Picks dates from a window of days before a reference day.
#[derive(Debug, Clone, Copy)]
pub struct DateGenerator {
    today: Date,
    days: u32,
}

impl DateGenerator {
    /// Creates a generator for the `days` days before `today`.
    ///
    /// A window of zero is widened to one day. A window reaching past
    /// [`Date::MIN`] is narrowed to end there, so every offset stays
    /// representable.
    pub fn new(today: Date, days: u32) -> Self {
        let days = days.max(1).min(max_window(today));
        Self { today, days }
    }

    /// Whether a window of `days` before `today` fits in the calendar.
    pub fn fits(today: Date, days: u32) -> bool {
        days <= max_window(today)
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    /// Earliest date this generator can return.
    pub fn earliest(&self) -> Date {
        self.today
            .checked_sub(Duration::days(self.days as i64))
            .unwrap_or(Date::MIN)
    }

    /// Latest date this generator can return (the day before `today`).
    pub fn latest(&self) -> Date {
        self.today.previous_day().unwrap_or(Date::MIN)
    }

    /// Returns `today` minus a uniformly chosen offset in `1..=days`.
    pub fn generate(&self, rng: &mut impl Rng) -> Date {
        let offset = rng.gen_range(1..=self.days as i64);
        self.today
            .checked_sub(Duration::days(offset))
            .unwrap_or(Date::MIN)
    }
}

/// Days between [`Date::MIN`] and `today`, at least one.
fn max_window(today: Date) -> u32 {
    let span = (today - Date::MIN).whole_days();
    u32::try_from(span).unwrap_or(u32::MAX).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use time::macros::date;

    #[test]
    fn test_dates_within_window() {
        let date_gen = DateGenerator::new(date!(2024 - 03 - 01), 30);
        let mut rng = rand::thread_rng();

        for _ in 0..500 {
            let d = date_gen.generate(&mut rng);
            assert!(d >= date!(2024 - 01 - 31));
            assert!(d <= date!(2024 - 02 - 29));
        }
        assert_eq!(date_gen.earliest(), date!(2024 - 01 - 31));
        assert_eq!(date_gen.latest(), date!(2024 - 02 - 29));
    }

    #[test]
    fn test_single_day_window() {
        let date_gen = DateGenerator::new(date!(2024 - 01 - 01), 1);
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(date_gen.generate(&mut rng), date!(2023 - 12 - 31));
    }

    #[test]
    fn test_oversized_window_is_narrowed() {
        let today = date!(2024 - 01 - 01);
        assert!(!DateGenerator::fits(today, u32::MAX));
        assert!(DateGenerator::fits(today, 730));

        let date_gen = DateGenerator::new(today, u32::MAX);
        assert_eq!(date_gen.earliest(), Date::MIN);
        assert_eq!(date_gen.days() as i64, (today - Date::MIN).whole_days());

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let d = date_gen.generate(&mut rng);
            assert!(d >= Date::MIN && d < today);
        }
    }

    #[test]
    fn test_zero_window_is_widened() {
        let date_gen = DateGenerator::new(date!(2024 - 01 - 01), 0);
        let mut rng = rand::thread_rng();

        assert_eq!(date_gen.generate(&mut rng), date!(2023 - 12 - 31));
    }
}
