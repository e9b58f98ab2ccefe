//! UTC time arithmetic used for scheduling reminders.
//!
//! All instants are unix timestamps in millis. Nothing in here looks at the
//! local timezone of the process, so results are stable across restarts and
//! daylight-saving transitions.

use chrono::{prelude::*, Duration};

pub const MILLIS_PER_MINUTE: i64 = 1000 * 60;
pub const MILLIS_PER_HOUR: i64 = MILLIS_PER_MINUTE * 60;

pub fn hours_to_millis(hours: f64) -> i64 {
    (hours * MILLIS_PER_HOUR as f64).round() as i64
}

/// Fractional hours from `now` until `deadline`. Negative when the
/// deadline has already passed.
pub fn hours_until(deadline: i64, now: i64) -> f64 {
    deadline.saturating_sub(now) as f64 / MILLIS_PER_HOUR as f64
}

/// The instant `hours_before` hours ahead of `deadline`, or `None` if the
/// offset is not a positive number or the instant is not representable.
pub fn resolve_one_time_reminder(deadline: i64, hours_before: f64) -> Option<i64> {
    if !hours_before.is_finite() || hours_before <= 0.0 {
        return None;
    }
    deadline.checked_sub(hours_to_millis(hours_before))
}

/// Whether a recurring reminder last sent at `last_sent_at` should fire
/// again at `now`. Only the elapsed duration counts, there is no notion of
/// calendar days or weeks.
pub fn next_recurrence_due(last_sent_at: Option<i64>, interval_hours: f64, now: i64) -> bool {
    match last_sent_at {
        None => true,
        Some(last_sent_at) => now.saturating_sub(last_sent_at) >= hours_to_millis(interval_hours),
    }
}

pub fn is_past(instant: i64, now: i64) -> bool {
    instant <= now
}

/// First instant strictly after `now` that falls on `hour_of_day:00` UTC and,
/// when given, on `day_of_week` (0 = Sunday).
///
/// Returns `None` for an hour above 23 or a weekday above 6.
pub fn next_utc_occurrence(hour_of_day: u32, day_of_week: Option<u32>, now: i64) -> Option<i64> {
    let now = Utc.timestamp_millis_opt(now).single()?;
    let mut candidate = now
        .date_naive()
        .and_hms_opt(hour_of_day, 0, 0)?
        .and_utc();

    let step = match day_of_week {
        Some(day) if day > 6 => return None,
        Some(day) => {
            let today = now.weekday().num_days_from_sunday();
            let days_ahead = (7 + day - today) % 7;
            candidate += Duration::days(days_ahead as i64);
            Duration::days(7)
        }
        None => Duration::days(1),
    };
    if candidate <= now {
        candidate += step;
    }

    Some(candidate.timestamp_millis())
}
