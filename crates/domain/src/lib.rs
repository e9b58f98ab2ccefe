mod date;
mod reminder;
mod reminder_normalizer;
mod reminder_spec;
mod shared;
mod task;
mod user;

pub use date::{
    hours_to_millis, hours_until, is_past, next_recurrence_due, next_utc_occurrence,
    resolve_one_time_reminder, MILLIS_PER_HOUR, MILLIS_PER_MINUTE,
};
pub use reminder::{OneTimeReminder, RecurringReminder, Recurrence, Reminder};
pub use reminder_normalizer::{merge_reminders, normalize_reminders, RawReminder, ReminderAction};
pub use reminder_spec::{InvalidReminderSpec, UtcReminderSpec};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use task::{InvalidTaskStatusError, Task, TaskStatus};
pub use user::User;
