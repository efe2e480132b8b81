use chrono::Utc;

use crate::api::Time;

// Math.round semantics: halves go towards positive infinity
fn round(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

fn label(n: i64, unit: &str) -> String {
    if n > 1 {
        format!("{n} {unit}s ago")
    } else {
        format!("{n} {unit} ago")
    }
}

/// Human-readable age of something created at `created_at`, e.g. "3 hrs ago".
///
/// Each unit is derived by rounding the previous, already-rounded one, and
/// only when the previous one overflowed its range: 89s is "1 min", 90s is
/// "2 mins", 3599s is "1 hr".
pub fn time_since(created_at: Time, now: Time) -> String {
    let secs = round((now - created_at).num_milliseconds() as f64 / 1000.0);
    if secs <= 59 {
        return label(secs, "sec");
    }
    let mins = round(secs as f64 / 60.0);
    if mins <= 59 {
        return label(mins, "min");
    }
    let hours = round(mins as f64 / 60.0);
    if hours <= 23 {
        return label(hours, "hr");
    }
    label(round(hours as f64 / 24.0), "day")
}

pub fn time_since_now(created_at: Time) -> String {
    time_since(created_at, Utc::now())
}
