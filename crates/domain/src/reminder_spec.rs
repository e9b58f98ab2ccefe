use crate::date::next_utc_occurrence;
use crate::reminder::Recurrence;
use crate::reminder_normalizer::RawReminder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// UTC anchored reminder schema accepted by the reminders endpoint.
///
/// It is converted into a `RawReminder` before normalization, so the rest of
/// the system only ever sees the hours relative model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UtcReminderSpec {
    OneTime {
        #[serde(rename = "triggerAtUTC")]
        trigger_at_utc: DateTime<Utc>,
        /// Accepted but ignored, everything is computed in UTC
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timezone: Option<String>,
    },
    Daily {
        #[serde(rename = "hourOfDayUTC")]
        hour_of_day_utc: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timezone: Option<String>,
    },
    Weekly {
        #[serde(rename = "hourOfDayUTC")]
        hour_of_day_utc: u32,
        /// 0 = Sunday
        #[serde(rename = "dayOfWeek")]
        day_of_week: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timezone: Option<String>,
    },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InvalidReminderSpec {
    #[error("hourOfDayUTC must be between 0 and 23, got: {0}")]
    HourOfDay(u32),
    #[error("dayOfWeek must be between 0 and 6, got: {0}")]
    DayOfWeek(u32),
}

impl UtcReminderSpec {
    pub fn to_raw(&self, now: i64) -> Result<RawReminder, InvalidReminderSpec> {
        match self {
            Self::OneTime { trigger_at_utc, .. } => {
                Ok(RawReminder::one_time_at(trigger_at_utc.timestamp_millis()))
            }
            Self::Daily {
                hour_of_day_utc, ..
            } => Self::recurring(Recurrence::Daily, *hour_of_day_utc, None, now),
            Self::Weekly {
                hour_of_day_utc,
                day_of_week,
                ..
            } => Self::recurring(
                Recurrence::Weekly,
                *hour_of_day_utc,
                Some(*day_of_week),
                now,
            ),
        }
    }

    fn recurring(
        recurrence: Recurrence,
        hour_of_day: u32,
        day_of_week: Option<u32>,
        now: i64,
    ) -> Result<RawReminder, InvalidReminderSpec> {
        if hour_of_day > 23 {
            return Err(InvalidReminderSpec::HourOfDay(hour_of_day));
        }
        if let Some(day) = day_of_week.filter(|day| *day > 6) {
            return Err(InvalidReminderSpec::DayOfWeek(day));
        }

        Ok(RawReminder {
            first_due_at: next_utc_occurrence(hour_of_day, day_of_week, now),
            ..RawReminder::recurring(recurrence)
        })
    }
}
