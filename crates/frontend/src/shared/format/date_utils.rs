//! Date labels for the period dropdown.

use chrono::{Datelike, NaiveDate};
use contracts::dashboards::d400_sales_metrics::PeriodSelector;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// "15 Mar 2024"
pub fn format_short_date(date: NaiveDate) -> String {
    let month = MONTHS[date.month0() as usize];
    format!("{} {} {}", date.day(), month, date.year())
}

/// Window covered by `period`, ending `today`. Single-day windows show one date.
pub fn period_range_text(period: &PeriodSelector, today: NaiveDate) -> String {
    let (start, end) = period.date_range(today);
    if start == end {
        format_short_date(end)
    } else {
        format!("{} to {}", format_short_date(start), format_short_date(end))
    }
}

/// Local calendar date of the browser.
pub fn today_local() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::dashboards::d400_sales_metrics::CustomDays;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_short_date() {
        assert_eq!(format_short_date(date(2024, 3, 15)), "15 Mar 2024");
        assert_eq!(format_short_date(date(2023, 12, 1)), "1 Dec 2023");
    }

    #[test]
    fn test_period_range_text() {
        let today = date(2024, 3, 15);
        assert_eq!(
            period_range_text(&PeriodSelector::Today, today),
            "15 Mar 2024"
        );
        assert_eq!(
            period_range_text(&PeriodSelector::Last7Days, today),
            "8 Mar 2024 to 15 Mar 2024"
        );
        assert_eq!(
            period_range_text(&PeriodSelector::Custom(CustomDays::new(20)), today),
            "24 Feb 2024 to 15 Mar 2024"
        );
    }
}
