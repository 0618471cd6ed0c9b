use chrono::NaiveDate;
use serde::Serialize;

/// An inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Every date in the window, in chronological order.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }

    pub fn num_days(self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn days_are_inclusive_and_ordered() {
        let window = DateWindow {
            start: date(2025, 4, 28),
            end: date(2025, 5, 2),
        };
        let days: Vec<NaiveDate> = window.days().collect();
        assert_eq!(
            days,
            vec![
                date(2025, 4, 28),
                date(2025, 4, 29),
                date(2025, 4, 30),
                date(2025, 5, 1),
                date(2025, 5, 2),
            ]
        );
        assert_eq!(window.num_days(), 5);
    }

    #[test]
    fn single_day_window() {
        let window = DateWindow {
            start: date(2025, 4, 3),
            end: date(2025, 4, 3),
        };
        assert_eq!(window.days().count(), 1);
        assert_eq!(window.num_days(), 1);
    }
}
