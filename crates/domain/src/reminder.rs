use crate::date::{is_past, next_recurrence_due};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A `Reminder` is a notification the owner of a `Task` should receive
/// ahead of its deadline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Reminder {
    /// Fires once at `remind_at`
    OneTime(OneTimeReminder),
    /// Fires every `interval_hours` (normally 24)
    Daily(RecurringReminder),
    /// Fires every `interval_hours` (normally 168)
    Weekly(RecurringReminder),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OneTimeReminder {
    pub remind_at: i64,
    pub sent: bool,
    #[serde(default)]
    pub last_sent_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringReminder {
    pub interval_hours: f64,
    /// Only reflects the initial state, firing a recurring reminder
    /// never sets it.
    pub sent: bool,
    #[serde(default)]
    pub last_sent_at: Option<i64>,
    /// The reminder is not eligible before this instant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_due_at: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recurrence {
    Daily,
    Weekly,
}

impl Recurrence {
    pub fn default_interval_hours(&self) -> f64 {
        match self {
            Self::Daily => 24.0,
            Self::Weekly => 24.0 * 7.0,
        }
    }
}

impl Display for Recurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Weekly => write!(f, "weekly"),
        }
    }
}

impl Reminder {
    pub fn one_time(remind_at: i64) -> Self {
        Self::OneTime(OneTimeReminder {
            remind_at,
            sent: false,
            last_sent_at: None,
        })
    }

    pub fn recurring(recurrence: Recurrence, interval_hours: f64, first_due_at: Option<i64>) -> Self {
        let reminder = RecurringReminder {
            interval_hours,
            sent: false,
            last_sent_at: None,
            first_due_at,
        };
        match recurrence {
            Recurrence::Daily => Self::Daily(reminder),
            Recurrence::Weekly => Self::Weekly(reminder),
        }
    }

    /// `None` for one-time reminders
    pub fn recurrence(&self) -> Option<Recurrence> {
        match self {
            Self::OneTime(_) => None,
            Self::Daily(_) => Some(Recurrence::Daily),
            Self::Weekly(_) => Some(Recurrence::Weekly),
        }
    }

    pub fn remind_at(&self) -> Option<i64> {
        match self {
            Self::OneTime(r) => Some(r.remind_at),
            Self::Daily(_) | Self::Weekly(_) => None,
        }
    }

    pub fn is_sent(&self) -> bool {
        match self {
            Self::OneTime(r) => r.sent,
            Self::Daily(r) | Self::Weekly(r) => r.sent,
        }
    }

    pub fn last_sent_at(&self) -> Option<i64> {
        match self {
            Self::OneTime(r) => r.last_sent_at,
            Self::Daily(r) | Self::Weekly(r) => r.last_sent_at,
        }
    }

    pub fn is_due(&self, now: i64) -> bool {
        match self {
            Self::OneTime(r) => !r.sent && is_past(r.remind_at, now),
            Self::Daily(r) | Self::Weekly(r) => {
                let started = r.first_due_at.map(|ts| is_past(ts, now)).unwrap_or(true);
                started && next_recurrence_due(r.last_sent_at, r.interval_hours, now)
            }
        }
    }

    /// Records that the reminder fired at `now`. A one-time reminder
    /// becomes permanently sent.
    pub fn mark_fired(&mut self, now: i64) {
        match self {
            Self::OneTime(r) => {
                r.sent = true;
                r.last_sent_at = Some(now);
            }
            Self::Daily(r) | Self::Weekly(r) => {
                r.last_sent_at = Some(now);
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::OneTime(_) => "one-time",
            Self::Daily(_) => "daily",
            Self::Weekly(_) => "weekly",
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::date::MILLIS_PER_HOUR;

    const NOW: i64 = 1613865600000;

    #[test]
    fn one_time_reminder_fires_once() {
        let mut reminder = Reminder::one_time(NOW - 60 * 1000);
        assert!(reminder.is_due(NOW));

        reminder.mark_fired(NOW);
        assert!(reminder.is_sent());
        assert_eq!(reminder.last_sent_at(), Some(NOW));
        assert!(!reminder.is_due(NOW));
        assert!(!reminder.is_due(NOW + 100 * MILLIS_PER_HOUR));
    }

    #[test]
    fn one_time_reminder_waits_for_its_time() {
        let reminder = Reminder::one_time(NOW + 1);
        assert!(!reminder.is_due(NOW));
        assert!(reminder.is_due(NOW + 1));
    }

    #[test]
    fn recurring_reminder_cycles() {
        let mut reminder = Reminder::recurring(Recurrence::Daily, 24.0, None);
        assert!(reminder.is_due(NOW));

        reminder.mark_fired(NOW);
        assert!(!reminder.is_sent());
        assert!(!reminder.is_due(NOW + 23 * MILLIS_PER_HOUR));
        assert!(reminder.is_due(NOW + 24 * MILLIS_PER_HOUR));
    }

    #[test]
    fn recurring_reminder_respects_first_due_at() {
        let first_due_at = NOW + 9 * MILLIS_PER_HOUR;
        let reminder = Reminder::recurring(Recurrence::Weekly, 168.0, Some(first_due_at));
        assert!(!reminder.is_due(NOW));
        assert!(reminder.is_due(first_due_at));
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(Reminder::one_time(NOW)).unwrap();
        assert_eq!(json["type"], "one-time");
        assert_eq!(json["remindAt"], NOW);
        assert_eq!(json["sent"], false);

        let json = serde_json::to_value(Reminder::recurring(Recurrence::Weekly, 168.0, None)).unwrap();
        assert_eq!(json["type"], "weekly");
        assert_eq!(json["intervalHours"], 168.0);
        assert!(json.get("firstDueAt").is_none());

        let parsed: Reminder = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.recurrence(), Some(Recurrence::Weekly));
    }
}
