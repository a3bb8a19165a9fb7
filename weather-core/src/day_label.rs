use chrono::{DateTime, Local, TimeZone, Utc};

/// Human label for a forecast timestamp relative to `now`.
///
/// Dates are compared in `now`'s timezone: "Today", "Tomorrow", otherwise the
/// English short weekday name ("Mon", "Tue", ...).
pub fn label_for_day<Tz: TimeZone>(timestamp_secs: i64, now: &DateTime<Tz>) -> String {
    let Some(utc) = DateTime::<Utc>::from_timestamp(timestamp_secs, 0) else {
        return "Unknown".to_string();
    };

    let date = utc.with_timezone(&now.timezone()).date_naive();
    let today = now.date_naive();

    if date == today {
        return "Today".to_string();
    }
    if today.succ_opt() == Some(date) {
        return "Tomorrow".to_string();
    }

    date.format("%a").to_string()
}

/// [`label_for_day`] against the local clock and timezone.
pub fn label_for_day_local(timestamp_secs: i64) -> String {
    label_for_day(timestamp_secs, &Local::now())
}
