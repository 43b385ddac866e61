use chrono::{DateTime, Datelike, TimeZone, Timelike};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Formats a timestamp for display, e.g. `Jun 3rd 2:05 PM`.
///
/// The formatter is generic over the timezone; display paths pass local
/// time, while the stored values remain UTC.
pub fn format_timestamp<Tz: TimeZone>(ts: &DateTime<Tz>) -> String {
    let month = MONTHS[ts.month0() as usize];
    let day = ts.day();

    let hour = ts.hour();
    let meridiem = if hour >= 12 { "PM" } else { "AM" };
    // Hour 0 and hour 12 both display as 12.
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };

    format!(
        "{} {}{} {}:{:02} {}",
        month,
        day,
        ordinal_suffix(day),
        display_hour,
        ts.minute(),
        meridiem
    )
}

/// Ordinal suffix for a day of month: 1st, 2nd, 3rd, 4th... 11th-13th are "th".
fn ordinal_suffix(day: u32) -> &'static str {
    if (4..=20).contains(&day) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{format_timestamp, ordinal_suffix};

    #[test]
    fn formats_afternoon_times_in_twelve_hour_clock() {
        let ts = Utc.with_ymd_and_hms(2024, 6, 3, 14, 5, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "Jun 3rd 2:05 PM");
    }

    #[test]
    fn midnight_displays_as_twelve_am() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 0, 5, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "Jan 2nd 12:05 AM");
    }

    #[test]
    fn noon_displays_as_twelve_pm() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 11, 12, 0, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "Mar 11th 12:00 PM");
    }

    #[test]
    fn one_pm_on_the_twenty_first() {
        let ts = Utc.with_ymd_and_hms(2024, 7, 21, 13, 0, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "Jul 21st 1:00 PM");
    }

    #[test]
    fn teen_days_always_take_th() {
        for day in 4..=20 {
            assert_eq!(ordinal_suffix(day), "th", "day {}", day);
        }
    }

    #[test]
    fn suffix_follows_last_digit_outside_the_teens() {
        assert_eq!(ordinal_suffix(1), "st");
        assert_eq!(ordinal_suffix(2), "nd");
        assert_eq!(ordinal_suffix(3), "rd");
        assert_eq!(ordinal_suffix(22), "nd");
        assert_eq!(ordinal_suffix(23), "rd");
        assert_eq!(ordinal_suffix(30), "th");
        assert_eq!(ordinal_suffix(31), "st");
    }
}
