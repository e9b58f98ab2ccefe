//! Turns loosely structured reminder requests, typed by a user or produced by
//! a text understanding service, into canonical `Reminder`s.
//!
//! Invalid or impossible requests are dropped without reporting an error.

use crate::date::{hours_until, is_past, resolve_one_time_reminder, MILLIS_PER_MINUTE};
use crate::reminder::{Recurrence, Reminder};
use serde::{Deserialize, Serialize};

/// A reminder request as it arrives over the wire. Every field is optional
/// and nothing has been validated yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReminder {
    /// `one-time` (also when absent), `daily` or `weekly`
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub reminder_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remind_at: Option<i64>,
    /// Hours before the deadline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remind_before: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_due_at: Option<i64>,
}

impl RawReminder {
    pub fn one_time_before(hours: f64) -> Self {
        Self {
            remind_before: Some(hours),
            ..Default::default()
        }
    }

    pub fn one_time_at(remind_at: i64) -> Self {
        Self {
            remind_at: Some(remind_at),
            ..Default::default()
        }
    }

    pub fn recurring(recurrence: Recurrence) -> Self {
        Self {
            reminder_type: Some(recurrence.to_string()),
            interval_hours: Some(recurrence.default_interval_hours()),
            ..Default::default()
        }
    }
}

impl From<&Reminder> for RawReminder {
    fn from(reminder: &Reminder) -> Self {
        match reminder {
            Reminder::OneTime(r) => Self::one_time_at(r.remind_at),
            Reminder::Daily(r) | Reminder::Weekly(r) => Self {
                reminder_type: Some(reminder.kind().to_string()),
                interval_hours: Some(r.interval_hours),
                first_due_at: r.first_due_at,
                ..Default::default()
            },
        }
    }
}

/// How a new list of reminders is combined with the ones a `Task` already has
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderAction {
    /// Replace the full list
    Overwrite,
    /// Add to the existing list
    Append,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum OneTimeTarget {
    HoursBefore(f64),
    CustomDate(i64),
    At(i64),
}

#[derive(Debug, Clone, PartialEq)]
enum ReminderRequest {
    OneTime(OneTimeTarget),
    Recurring {
        recurrence: Recurrence,
        interval_hours: f64,
        first_due_at: Option<i64>,
    },
}

impl ReminderRequest {
    fn classify(raw: &RawReminder) -> Option<Self> {
        // Accepts both `one-time` and `ONE_TIME` spellings
        let reminder_type = raw
            .reminder_type
            .as_deref()
            .map(|t| t.trim().to_lowercase().replace('_', "-"));

        let recurrence = match reminder_type.as_deref() {
            None | Some("one-time") => None,
            Some("daily") => Some(Recurrence::Daily),
            Some("weekly") => Some(Recurrence::Weekly),
            Some(_) => return None,
        };

        match recurrence {
            None => {
                let target = if let Some(hours) = raw.remind_before {
                    OneTimeTarget::HoursBefore(hours)
                } else if let Some(ts) = raw.custom_date {
                    OneTimeTarget::CustomDate(ts)
                } else if let Some(ts) = raw.remind_at {
                    OneTimeTarget::At(ts)
                } else {
                    return None;
                };
                Some(Self::OneTime(target))
            }
            Some(recurrence) => {
                // The interval has to be present, but the kind decides its length
                raw.interval_hours
                    .filter(|hours| hours.is_finite() && *hours > 0.0)?;
                Some(Self::Recurring {
                    recurrence,
                    interval_hours: recurrence.default_interval_hours(),
                    first_due_at: raw.first_due_at,
                })
            }
        }
    }

    fn resolve(self, deadline: i64, now: i64) -> Option<Reminder> {
        match self {
            Self::OneTime(target) => {
                let remind_at = match target {
                    OneTimeTarget::HoursBefore(hours) => {
                        resolve_one_time_reminder(deadline, hours)?
                    }
                    OneTimeTarget::CustomDate(ts) | OneTimeTarget::At(ts) => ts,
                };
                if is_past(remind_at, now) || remind_at >= deadline {
                    return None;
                }
                Some(Reminder::one_time(remind_at))
            }
            Self::Recurring {
                recurrence,
                interval_hours,
                first_due_at,
            } => {
                // Needs at least one full interval of lead time
                if hours_until(deadline, now) < interval_hours {
                    return None;
                }
                Some(Reminder::recurring(recurrence, interval_hours, first_due_at))
            }
        }
    }
}

/// Validates `raw` against `deadline` and returns the surviving reminders in
/// insertion order, freshly stamped as unsent.
pub fn normalize_reminders(raw: &[RawReminder], deadline: Option<i64>, now: i64) -> Vec<Reminder> {
    let deadline = match deadline {
        Some(deadline) => deadline,
        None => return Vec::new(),
    };

    raw.iter()
        .filter_map(ReminderRequest::classify)
        .filter_map(|request| request.resolve(deadline, now))
        .fold(Vec::new(), |mut reminders, reminder| {
            push_deduplicated(&mut reminders, reminder);
            reminders
        })
}

/// Adds already normalized `incoming` reminders to `existing` ones. An
/// existing one-time reminder wins over an incoming one at the same minute,
/// while an incoming recurring reminder replaces the existing one of its kind.
pub fn merge_reminders(existing: Vec<Reminder>, incoming: Vec<Reminder>) -> Vec<Reminder> {
    incoming.into_iter().fold(existing, |mut reminders, reminder| {
        push_deduplicated(&mut reminders, reminder);
        reminders
    })
}

fn same_minute(a: i64, b: i64) -> bool {
    a.div_euclid(MILLIS_PER_MINUTE) == b.div_euclid(MILLIS_PER_MINUTE)
}

fn push_deduplicated(reminders: &mut Vec<Reminder>, reminder: Reminder) {
    match (reminder.recurrence(), reminder.remind_at()) {
        (Some(recurrence), _) => {
            match reminders
                .iter()
                .position(|r| r.recurrence() == Some(recurrence))
            {
                Some(index) => reminders[index] = reminder,
                None => reminders.push(reminder),
            }
        }
        (None, Some(remind_at)) => {
            let duplicate = reminders
                .iter()
                .filter_map(Reminder::remind_at)
                .any(|ts| same_minute(ts, remind_at));
            if !duplicate {
                reminders.push(reminder);
            }
        }
        (None, None) => {}
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::date::MILLIS_PER_HOUR;

    const NOW: i64 = 1613865600000;

    fn in_hours(hours: i64) -> i64 {
        NOW + hours * MILLIS_PER_HOUR
    }

    #[test]
    fn no_deadline_gives_no_reminders() {
        let raw = vec![
            RawReminder::one_time_before(1.0),
            RawReminder::recurring(Recurrence::Daily),
        ];
        assert!(normalize_reminders(&raw, None, NOW).is_empty());
    }

    #[test]
    fn resolves_hours_before_deadline() {
        let deadline = in_hours(48);
        let reminders = normalize_reminders(&[RawReminder::one_time_before(24.0)], Some(deadline), NOW);
        assert_eq!(reminders, vec![Reminder::one_time(deadline - 24 * MILLIS_PER_HOUR)]);
    }

    #[test]
    fn drops_offsets_reaching_into_the_past() {
        let reminders =
            normalize_reminders(&[RawReminder::one_time_before(24.0)], Some(in_hours(2)), NOW);
        assert!(reminders.is_empty());
    }

    #[test]
    fn drops_non_positive_offsets() {
        let raw = vec![
            RawReminder::one_time_before(0.0),
            RawReminder::one_time_before(-2.0),
        ];
        assert!(normalize_reminders(&raw, Some(in_hours(48)), NOW).is_empty());
    }

    #[test]
    fn explicit_times_must_lie_between_now_and_deadline() {
        let deadline = in_hours(10);
        let raw = vec![
            RawReminder::one_time_at(NOW - 1),
            RawReminder::one_time_at(NOW),
            RawReminder::one_time_at(deadline),
            RawReminder::one_time_at(deadline + 1),
            RawReminder::one_time_at(in_hours(5)),
            RawReminder {
                custom_date: Some(in_hours(6)),
                ..Default::default()
            },
            RawReminder {
                custom_date: Some(in_hours(11)),
                ..Default::default()
            },
        ];
        let reminders = normalize_reminders(&raw, Some(deadline), NOW);
        assert_eq!(
            reminders,
            vec![
                Reminder::one_time(in_hours(5)),
                Reminder::one_time(in_hours(6))
            ]
        );
    }

    #[test]
    fn relative_offset_takes_precedence_over_explicit_times() {
        let deadline = in_hours(10);
        let raw = vec![RawReminder {
            remind_at: Some(in_hours(1)),
            custom_date: Some(in_hours(2)),
            remind_before: Some(3.0),
            ..Default::default()
        }];
        let reminders = normalize_reminders(&raw, Some(deadline), NOW);
        assert_eq!(reminders, vec![Reminder::one_time(in_hours(7))]);
    }

    #[test]
    fn drops_entries_missing_required_fields() {
        let raw = vec![
            RawReminder::default(),
            RawReminder {
                reminder_type: Some("one-time".into()),
                ..Default::default()
            },
            RawReminder {
                reminder_type: Some("daily".into()),
                ..Default::default()
            },
            RawReminder {
                reminder_type: Some("weekly".into()),
                interval_hours: Some(0.0),
                ..Default::default()
            },
            RawReminder {
                reminder_type: Some("hourly".into()),
                interval_hours: Some(1.0),
                ..Default::default()
            },
        ];
        assert!(normalize_reminders(&raw, Some(in_hours(500)), NOW).is_empty());
    }

    #[test]
    fn recurring_reminders_need_a_full_interval_of_lead_time() {
        let raw = vec![
            RawReminder::recurring(Recurrence::Daily),
            RawReminder::recurring(Recurrence::Weekly),
        ];

        let reminders = normalize_reminders(&raw, Some(in_hours(23)), NOW);
        assert!(reminders.is_empty());

        let reminders = normalize_reminders(&raw, Some(in_hours(24)), NOW);
        assert_eq!(reminders, vec![Reminder::recurring(Recurrence::Daily, 24.0, None)]);

        let reminders = normalize_reminders(&raw, Some(in_hours(168)), NOW);
        assert_eq!(reminders.len(), 2);
    }

    #[test]
    fn recurring_interval_follows_the_kind() {
        let raw = vec![RawReminder {
            reminder_type: Some("weekly".into()),
            interval_hours: Some(1.0),
            ..Default::default()
        }];

        assert!(normalize_reminders(&raw, Some(in_hours(48)), NOW).is_empty());

        let reminders = normalize_reminders(&raw, Some(in_hours(200)), NOW);
        assert_eq!(reminders, vec![Reminder::recurring(Recurrence::Weekly, 168.0, None)]);
    }

    #[test]
    fn extreme_deadlines_and_offsets_are_dropped() {
        let raw = vec![
            RawReminder::recurring(Recurrence::Daily),
            RawReminder::one_time_before(1.0),
        ];
        assert!(normalize_reminders(&raw, Some(i64::MIN), NOW).is_empty());

        let raw = vec![RawReminder::one_time_before(1e300)];
        assert!(normalize_reminders(&raw, Some(-1000), NOW).is_empty());
        assert!(normalize_reminders(&raw, Some(i64::MIN), NOW).is_empty());

        let raw = vec![
            RawReminder::recurring(Recurrence::Weekly),
            RawReminder::one_time_before(1e300),
        ];
        let reminders = normalize_reminders(&raw, Some(i64::MAX), NOW);
        assert_eq!(reminders, vec![Reminder::recurring(Recurrence::Weekly, 168.0, None)]);
    }

    #[test]
    fn accepts_upper_case_types() {
        let raw = vec![RawReminder {
            reminder_type: Some("DAILY".into()),
            interval_hours: Some(24.0),
            ..Default::default()
        }];
        let reminders = normalize_reminders(&raw, Some(in_hours(48)), NOW);
        assert_eq!(reminders[0].recurrence(), Some(Recurrence::Daily));
    }

    #[test]
    fn deduplicates_one_time_reminders_to_the_minute() {
        let deadline = in_hours(48);
        let raw = vec![
            RawReminder::one_time_before(24.0),
            RawReminder::one_time_at(deadline - 24 * MILLIS_PER_HOUR + 30 * 1000),
            RawReminder {
                custom_date: Some(deadline - 24 * MILLIS_PER_HOUR),
                ..Default::default()
            },
            RawReminder::one_time_before(23.0),
        ];
        let reminders = normalize_reminders(&raw, Some(deadline), NOW);
        assert_eq!(
            reminders,
            vec![
                Reminder::one_time(deadline - 24 * MILLIS_PER_HOUR),
                Reminder::one_time(deadline - 23 * MILLIS_PER_HOUR),
            ]
        );
    }

    #[test]
    fn later_recurring_entry_replaces_earlier_one() {
        let raw = vec![
            RawReminder::recurring(Recurrence::Daily),
            RawReminder::one_time_before(1.0),
            RawReminder {
                reminder_type: Some("daily".into()),
                interval_hours: Some(24.0),
                first_due_at: Some(in_hours(3)),
                ..Default::default()
            },
        ];
        let reminders = normalize_reminders(&raw, Some(in_hours(48)), NOW);
        assert_eq!(reminders.len(), 2);
        assert_eq!(
            reminders[0],
            Reminder::recurring(Recurrence::Daily, 24.0, Some(in_hours(3)))
        );
        assert_eq!(reminders[1], Reminder::one_time(in_hours(47)));
    }

    #[test]
    fn stamps_output_as_unsent() {
        let deadline = in_hours(48);
        let raw = vec![RawReminder::one_time_at(in_hours(3))];
        let reminders = normalize_reminders(&raw, Some(deadline), NOW);
        assert!(!reminders[0].is_sent());
        assert_eq!(reminders[0].last_sent_at(), None);
    }

    #[test]
    fn normalizing_is_idempotent() {
        let deadline = in_hours(200);
        let raw = vec![
            RawReminder::one_time_before(24.0),
            RawReminder::one_time_before(24.0),
            RawReminder::one_time_before(1.0),
            RawReminder::recurring(Recurrence::Daily),
            RawReminder {
                reminder_type: Some("weekly".into()),
                interval_hours: Some(168.0),
                first_due_at: Some(in_hours(9)),
                ..Default::default()
            },
        ];
        let once = normalize_reminders(&raw, Some(deadline), NOW);
        let again: Vec<RawReminder> = once.iter().map(RawReminder::from).collect();
        let twice = normalize_reminders(&again, Some(deadline), NOW);
        assert_eq!(once.len(), 4);
        assert_eq!(once, twice);
    }

    #[test]
    fn merge_keeps_existing_state_and_replaces_recurring_kind() {
        let mut sent = Reminder::one_time(in_hours(5));
        sent.mark_fired(in_hours(5));
        let mut daily = Reminder::recurring(Recurrence::Daily, 24.0, None);
        daily.mark_fired(NOW);
        let existing = vec![sent.clone(), daily];

        let incoming = vec![
            Reminder::one_time(in_hours(5) + 10 * 1000),
            Reminder::one_time(in_hours(8)),
            Reminder::recurring(Recurrence::Daily, 24.0, Some(in_hours(2))),
        ];
        let merged = merge_reminders(existing, incoming);
        assert_eq!(
            merged,
            vec![
                sent,
                Reminder::recurring(Recurrence::Daily, 24.0, Some(in_hours(2))),
                Reminder::one_time(in_hours(8)),
            ]
        );
    }

    #[test]
    fn parses_loose_json() {
        let raw: Vec<RawReminder> = serde_json::from_str(
            r#"[
                {"type": "one-time", "remindBefore": 2},
                {"customDate": 1614038400000},
                {"type": "weekly", "intervalHours": 168, "extra": "ignored"}
            ]"#,
        )
        .unwrap();
        assert_eq!(raw.len(), 3);
        assert_eq!(raw[0].remind_before, Some(2.0));
        assert_eq!(raw[1].custom_date, Some(1614038400000));
        assert_eq!(raw[2].interval_hours, Some(168.0));
    }
}
