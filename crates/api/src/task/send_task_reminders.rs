use super::notification::render_reminder_mail;
use crate::shared::usecase::UseCase;
use futures::{stream, StreamExt};
use std::ops::AddAssign;
use taskbell_domain::Task;
use taskbell_infra::TaskbellContext;
use tracing::{error, warn};

/// Evaluates the reminders of every candidate `Task` and mails the owners
/// of the ones that are due.
///
/// Two scans never overlap: a scan waits for the one in flight to finish
/// before reading candidates, so a due reminder is only fired once.
#[derive(Debug)]
pub struct SendTaskRemindersUseCase;

/// What happened during one scan
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReminderScanReport {
    pub tasks_evaluated: usize,
    pub reminders_fired: usize,
    pub notifications_sent: usize,
    pub dispatch_failures: usize,
    pub missing_recipients: usize,
    pub save_failures: usize,
}

impl AddAssign for ReminderScanReport {
    fn add_assign(&mut self, other: Self) {
        self.tasks_evaluated += other.tasks_evaluated;
        self.reminders_fired += other.reminders_fired;
        self.notifications_sent += other.notifications_sent;
        self.dispatch_failures += other.dispatch_failures;
        self.missing_recipients += other.missing_recipients;
        self.save_failures += other.save_failures;
    }
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

/// Fires the due reminders of a single `Task`, dispatches them and saves the
/// new reminder state whatever the dispatch outcome was.
async fn process_task(mut task: Task, now: i64, ctx: &TaskbellContext) -> ReminderScanReport {
    let mut report = ReminderScanReport {
        tasks_evaluated: 1,
        ..Default::default()
    };

    let fired = task.fire_due_reminders(now);
    if fired.is_empty() {
        return report;
    }
    report.reminders_fired = fired.len();

    match ctx.repos.users.find(&task.user_id).await {
        Some(user) => {
            for reminder in &fired {
                let mail = render_reminder_mail(&task, reminder, &user, now);
                match ctx.mailer.send(&mail).await {
                    Ok(_) => report.notifications_sent += 1,
                    Err(e) => {
                        error!(
                            "Unable to send {} reminder of task {} to {}. Err: {:?}",
                            reminder.kind(),
                            task.id,
                            user.email,
                            e
                        );
                        report.dispatch_failures += 1;
                    }
                }
            }
        }
        None => {
            warn!(
                "Owner {} of task {} was not found, skipping {} reminder(s)",
                task.user_id,
                task.id,
                fired.len()
            );
            report.missing_recipients += fired.len();
        }
    }

    // Only the reminder state is written back, the task may have been edited
    // while the mails were going out
    if let Err(e) = ctx.repos.tasks.save_reminders(&task.id, &task.reminders).await {
        error!("Unable to save reminder state of task {}. Err: {:?}", task.id, e);
        report.save_failures += 1;
    }

    report
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendTaskRemindersUseCase {
    type Response = ReminderScanReport;

    type Error = UseCaseError;

    const NAME: &'static str = "SendTaskReminders";

    async fn execute(&mut self, ctx: &TaskbellContext) -> Result<Self::Response, Self::Error> {
        let _scan = ctx.reminder_scan_lock.lock().await;

        let now = ctx.sys.get_timestamp_millis();
        let tasks = ctx
            .repos
            .tasks
            .find_reminder_candidates(now)
            .await
            .map_err(|e| {
                error!("Unable to read reminder candidates. Err: {:?}", e);
                UseCaseError::StorageError
            })?;

        let report = stream::iter(tasks)
            .map(|task| process_task(task, now, ctx))
            .buffer_unordered(ctx.config.reminder_dispatch_concurrency)
            .fold(ReminderScanReport::default(), |mut report, task_report| async move {
                report += task_report;
                report
            })
            .await;

        Ok(report)
    }
}
