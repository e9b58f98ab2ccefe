use chrono::{DateTime, Utc};
use taskbell_domain::{hours_until, Reminder, Task, User};
use taskbell_infra::Mail;

fn format_instant(ts: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ts)
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| ts.to_string())
}

/// Renders the email sent to `user` when `reminder` of `task` fires at `now`
pub fn render_reminder_mail(task: &Task, reminder: &Reminder, user: &User, now: i64) -> Mail {
    let mut body = format!(
        "Hi {},\n\nThis is your {} reminder for \"{}\".\n",
        user.name,
        reminder.kind(),
        task.title
    );

    if let Some(deadline) = task.deadline {
        let hours_left = hours_until(deadline, now).max(0.0);
        body.push_str(&format!(
            "The deadline is {} ({:.1} hours from now).\n",
            format_instant(deadline),
            hours_left
        ));
    }
    if let Some(description) = task.description.as_deref().filter(|d| !d.trim().is_empty()) {
        body.push_str(&format!("\n{}\n", description));
    }
    body.push_str(&format!("\nCurrent status: {}\n", task.status));

    Mail {
        to: user.email.clone(),
        subject: format!("Reminder: {}", task.title),
        body,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use taskbell_domain::{Recurrence, MILLIS_PER_HOUR};

    const NOW: i64 = 1613865600000;

    #[test]
    fn renders_mail_for_task_owner() {
        let user = User::new("ada@example.com".into(), "Ada".into());
        let mut task = Task::new(user.id.clone(), "File taxes".into(), NOW);
        task.deadline = Some(NOW + 36 * MILLIS_PER_HOUR);
        task.description = Some("Bring the receipts".into());

        let reminder = Reminder::recurring(Recurrence::Daily, 24.0, None);
        let mail = render_reminder_mail(&task, &reminder, &user, NOW);

        assert_eq!(mail.to, "ada@example.com");
        assert_eq!(mail.subject, "Reminder: File taxes");
        assert!(mail.body.contains("daily reminder"));
        assert!(mail.body.contains("2021-02-22 12:00 UTC (36.0 hours from now)"));
        assert!(mail.body.contains("Bring the receipts"));
        assert!(mail.body.contains("Current status: not-started"));
    }
}
