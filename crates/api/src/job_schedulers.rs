use crate::{
    shared::usecase::execute,
    task::send_task_reminders::{ReminderScanReport, SendTaskRemindersUseCase},
};
use std::time::Duration;
use taskbell_infra::TaskbellContext;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::info;

/// Seconds until the next whole minute. A timestamp exactly on a minute
/// boundary waits for the following one.
pub fn get_start_delay(now_ts: usize) -> usize {
    60 - (now_ts / 1000) % 60
}

/// Runs a reminder scan at the start of every interval, beginning at the
/// next whole minute. A scan that overruns its interval makes the job skip
/// the missed ticks instead of queueing them.
pub fn start_send_reminders_job(ctx: TaskbellContext) {
    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize);
        let start = Instant::now() + Duration::from_secs(secs_to_next_run as u64);

        let period = Duration::from_secs(ctx.config.reminder_scan_interval_secs);
        let mut scan_interval = interval_at(start, period);
        scan_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            scan_interval.tick().await;
            send_reminders(&ctx).await;
        }
    });
}

/// Runs a single reminder scan. Failures are logged by `execute` and
/// never escape.
pub async fn send_reminders(ctx: &TaskbellContext) -> Option<ReminderScanReport> {
    let report = execute(SendTaskRemindersUseCase, ctx).await.ok()?;
    info!(
        tasks_evaluated = report.tasks_evaluated,
        reminders_fired = report.reminders_fired,
        notifications_sent = report.notifications_sent,
        dispatch_failures = report.dispatch_failures,
        missing_recipients = report.missing_recipients,
        save_failures = report.save_failures,
        "Reminder scan completed"
    );
    Some(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::testing::TestContext;
    use taskbell_domain::{Reminder, Task, MILLIS_PER_HOUR};

    #[test]
    fn start_delay_works() {
        assert_eq!(get_start_delay(50 * 1000), 10);
        assert_eq!(get_start_delay(50 * 1000 + 999), 10);
        assert_eq!(get_start_delay(60 * 1000), 60);
        assert_eq!(get_start_delay(59 * 1000), 1);
        assert_eq!(get_start_delay(0), 60);
    }

    #[actix_web::main]
    #[test]
    async fn send_reminders_reports_scan() {
        let now = 1613865600000;
        let t = TestContext::new(now);
        let user = t.insert_user("ada@example.com").await;
        let mut task = Task::new(user.id, "Water plants".into(), now);
        task.deadline = Some(now + MILLIS_PER_HOUR);
        task.reminders = vec![Reminder::one_time(now)];
        t.insert_task(&task).await;

        let report = send_reminders(&t.ctx).await.unwrap();
        assert_eq!(report.notifications_sent, 1);
        assert_eq!(t.mailer.sent().len(), 1);
    }
}
