use chrono::Duration;

pub const MINUTE_MILLIS: i64 = 1000 * 60;

/// Zeroes the seconds and millis of a timestamp in millis
pub fn truncate_to_minute(timestamp: i64) -> i64 {
    timestamp - timestamp.rem_euclid(MINUTE_MILLIS)
}

fn push_part(out: &mut Vec<String>, value: i64, unit: &str) {
    if value > 0 {
        let plural = if value == 1 { "" } else { "s" };
        out.push(format!("{} {}{}", value, unit, plural));
    }
}

/// Human readable whole days, hours and minutes left from `now` until `due`,
/// e.g. "2 days 3 hours 15 minutes". Parts that are zero are left out.
pub fn format_time_left(now: i64, due: i64) -> String {
    let mut left = Duration::milliseconds(due - now);
    if left < Duration::minutes(1) {
        return "0 minutes".into();
    }

    let mut parts = Vec::with_capacity(3);

    let days = left.num_days();
    push_part(&mut parts, days, "day");
    left = left - Duration::days(days);

    let hours = left.num_hours();
    push_part(&mut parts, hours, "hour");
    left = left - Duration::hours(hours);

    push_part(&mut parts, left.num_minutes(), "minute");

    parts.join(" ")
}
