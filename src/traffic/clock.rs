use chrono::{NaiveDateTime, NaiveTime, Timelike};

pub const MINUTES_PER_DAY: usize = 1440;

/// Collapses a timestamp to its minute of day, discarding seconds and date.
pub fn minute_of_day(t: NaiveDateTime) -> u16 {
    (t.hour() * 60 + t.minute()) as u16
}

/// 12-hour clock label for a minute of day, e.g. 870 -> "2:30 PM".
pub fn format_minute(minute: u16) -> String {
    let time = NaiveTime::from_hms_opt(minute as u32 / 60, minute as u32 % 60, 0)
        .unwrap_or(NaiveTime::MIN);
    time.format("%-I:%M %p").to_string()
}
