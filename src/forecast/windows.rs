//! Calendar window policy for one forecast request.
//!
//! All three windows derive from the target month: 36 months of history for
//! fitting, the 3rd-through-last-day of the month for prediction, and a
//! 4-month lead-in of actuals for visual comparison.

use crate::forecast::error::ForecastError;
use crate::types::window::DateWindow;
use chrono::{Days, Months, NaiveDate};

/// Months of daily history used for fitting.
pub const TRAINING_MONTHS: u32 = 36;
/// Months before the target month included in the comparison series.
pub const ACTUALS_MONTHS: u32 = 4;

/// A forecast target month, parsed from `MM/YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetMonth {
    first_day: NaiveDate,
}

impl TargetMonth {
    /// Parses `"MM/YYYY"`, e.g. `"04/2025"`.
    pub fn parse(raw: &str) -> Result<Self, ForecastError> {
        let first_day = NaiveDate::parse_from_str(&format!("01/{raw}"), "%d/%m/%Y").map_err(
            |source| ForecastError::InvalidTargetMonth {
                raw: raw.to_string(),
                source,
            },
        )?;
        Ok(TargetMonth { first_day })
    }

    pub fn first_day(self) -> NaiveDate {
        self.first_day
    }

    /// 36 calendar months of history, ending the day before the target month
    /// begins. Strictly disjoint from (and earlier than) the forecast window:
    /// the model never trains on its own horizon.
    pub fn training_window(self) -> DateWindow {
        DateWindow {
            start: self.first_day - Months::new(TRAINING_MONTHS),
            end: self.first_day - Days::new(1),
        }
    }

    /// The 3rd of the target month through its last day. The last day comes
    /// from rolling to the next month's 1st and stepping back one day; the
    /// start on the 3rd is deliberate policy, not a generic whole-month
    /// window.
    pub fn forecast_window(self) -> DateWindow {
        DateWindow {
            start: self.first_day + Days::new(2),
            end: self.first_day + Months::new(1) - Days::new(1),
        }
    }

    /// Four months before the target month through the end of the forecast
    /// window. Fetched only for visual comparison, never for fitting.
    pub fn actuals_window(self) -> DateWindow {
        DateWindow {
            start: self.first_day - Months::new(ACTUALS_MONTHS),
            end: self.forecast_window().end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_month_and_year() {
        let month = TargetMonth::parse("04/2025").unwrap();
        assert_eq!(month.first_day(), date(2025, 4, 1));
    }

    #[test]
    fn rejects_malformed_input() {
        for raw in ["2025/04", "April 2025", "13/2025", "", "4-2025"] {
            let err = TargetMonth::parse(raw).unwrap_err();
            assert!(
                matches!(err, ForecastError::InvalidTargetMonth { .. }),
                "{raw:?} should not parse"
            );
        }
    }

    #[test]
    fn training_window_spans_36_months_ending_before_target() {
        let window = TargetMonth::parse("04/2025").unwrap().training_window();
        assert_eq!(window.start, date(2022, 4, 1));
        assert_eq!(window.end, date(2025, 3, 31));
    }

    #[test]
    fn forecast_window_runs_third_through_month_end() {
        let window = TargetMonth::parse("04/2025").unwrap().forecast_window();
        assert_eq!(window.start, date(2025, 4, 3));
        assert_eq!(window.end, date(2025, 4, 30));
        assert_eq!(window.num_days(), 28);
    }

    #[test]
    fn forecast_window_handles_leap_february() {
        let window = TargetMonth::parse("02/2024").unwrap().forecast_window();
        assert_eq!(window.end, date(2024, 2, 29));

        let window = TargetMonth::parse("02/2025").unwrap().forecast_window();
        assert_eq!(window.end, date(2025, 2, 28));
    }

    #[test]
    fn forecast_window_handles_year_rollover() {
        let window = TargetMonth::parse("12/2024").unwrap().forecast_window();
        assert_eq!(window.start, date(2024, 12, 3));
        assert_eq!(window.end, date(2024, 12, 31));
    }

    #[test]
    fn actuals_window_leads_in_four_months() {
        let month = TargetMonth::parse("04/2025").unwrap();
        let window = month.actuals_window();
        assert_eq!(window.start, date(2024, 12, 1));
        assert_eq!(window.end, month.forecast_window().end);
    }

    #[test]
    fn training_always_precedes_forecast() {
        for raw in ["01/2023", "02/2024", "07/2025", "12/2026"] {
            let month = TargetMonth::parse(raw).unwrap();
            assert!(
                month.training_window().end < month.forecast_window().start,
                "{raw}: training window leaks into the forecast horizon"
            );
        }
    }
}
