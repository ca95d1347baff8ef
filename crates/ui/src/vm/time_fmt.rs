use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc, Weekday};

/// "Mar 5, 2024"
#[must_use]
pub fn format_long_date(value: NaiveDate) -> String {
    value.format("%b %-d, %Y").to_string()
}

/// "Mar 5"
#[must_use]
pub fn format_short_date(value: NaiveDate) -> String {
    value.format("%b %-d").to_string()
}

#[must_use]
pub fn format_clock(value: NaiveTime) -> String {
    value.format("%H:%M").to_string()
}

#[must_use]
pub fn format_time_range(start: NaiveTime, end: NaiveTime) -> String {
    format!("{} - {}", format_clock(start), format_clock(end))
}

/// Wall-clock time of a message in the viewer's zone.
#[must_use]
pub fn format_message_time(value: DateTime<Utc>) -> String {
    value.with_timezone(&Local).format("%H:%M").to_string()
}

#[must_use]
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_render_month_day_year() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_long_date(date), "Mar 5, 2024");
        assert_eq!(format_short_date(date), "Mar 5");
    }

    #[test]
    fn ranges_use_24_hour_clock() {
        let start = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        let end = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
        assert_eq!(format_time_range(start, end), "08:00 - 09:30");
    }
}
