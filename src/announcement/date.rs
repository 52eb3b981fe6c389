use chrono::{DateTime, Days, NaiveDate, Utc};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Announcements report the previous day's games.
pub fn result_date(received_at: DateTime<Utc>) -> String {
    date_for(received_at, true)
}

pub fn date_for(received_at: DateTime<Utc>, is_yesterday: bool) -> String {
    let day = received_at.date_naive();
    let day = if is_yesterday {
        day.checked_sub_days(Days::new(1)).unwrap_or(NaiveDate::MIN)
    } else {
        day
    };
    day.format(DATE_FORMAT).to_string()
}
