use crate::{
    reminder::Reminder,
    reminder_normalizer::{merge_reminders, ReminderAction},
    shared::entity::{Entity, ID},
};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not-started"),
            Self::InProgress => write!(f, "in-progress"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Error, Debug)]
#[error("Invalid task status: {0}")]
pub struct InvalidTaskStatusError(String);

impl FromStr for TaskStatus {
    type Err = InvalidTaskStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not-started" => Ok(Self::NotStarted),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(InvalidTaskStatusError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: ID,
    /// Owner of the `Task` and recipient of its `Reminder`s
    pub user_id: ID,
    pub title: String,
    pub description: Option<String>,
    /// Without a deadline no `Reminder` is ever evaluated
    pub deadline: Option<i64>,
    pub status: TaskStatus,
    pub reminders: Vec<Reminder>,
    pub created: i64,
    pub updated: i64,
}

impl Entity for Task {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Task {
    pub fn new(user_id: ID, title: String, now: i64) -> Self {
        Self {
            id: Default::default(),
            user_id,
            title,
            description: None,
            deadline: None,
            status: Default::default(),
            reminders: Vec::new(),
            created: now,
            updated: now,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Whether the reminder scan should look at this `Task` at all
    pub fn is_reminder_candidate(&self, now: i64) -> bool {
        !self.is_completed()
            && !self.reminders.is_empty()
            && matches!(self.deadline, Some(deadline) if deadline > now)
    }

    /// Marks every due `Reminder` as fired and returns their updated
    /// copies, in list order.
    pub fn fire_due_reminders(&mut self, now: i64) -> Vec<Reminder> {
        if !self.is_reminder_candidate(now) {
            return Vec::new();
        }

        let mut fired = Vec::new();
        for reminder in self.reminders.iter_mut() {
            if reminder.is_due(now) {
                reminder.mark_fired(now);
                fired.push(reminder.clone());
            }
        }
        fired
    }

    /// Clearing the deadline clears the reminders. A new deadline drops
    /// one-time reminders that are no longer strictly before it.
    pub fn set_deadline(&mut self, deadline: Option<i64>) {
        self.deadline = deadline;
        match deadline {
            None => self.reminders.clear(),
            Some(deadline) => self
                .reminders
                .retain(|r| r.remind_at().map(|ts| ts < deadline).unwrap_or(true)),
        }
    }

    /// `reminders` are expected to be normalized against the current deadline
    pub fn apply_reminders(&mut self, action: ReminderAction, reminders: Vec<Reminder>) {
        self.reminders = match action {
            ReminderAction::Overwrite => reminders,
            ReminderAction::Append => {
                merge_reminders(std::mem::take(&mut self.reminders), reminders)
            }
        };
    }
}
