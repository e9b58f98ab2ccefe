mod inmemory;
mod postgres;

pub use inmemory::InMemoryTaskRepo;
pub use postgres::PostgresTaskRepo;
use taskbell_domain::{Reminder, Task, ID};

#[async_trait::async_trait]
pub trait ITaskRepo: Send + Sync {
    async fn insert(&self, task: &Task) -> anyhow::Result<()>;
    async fn save(&self, task: &Task) -> anyhow::Result<()>;
    /// Overwrites only the reminders of the task, leaving every other field
    /// as it is currently stored
    async fn save_reminders(&self, task_id: &ID, reminders: &[Reminder]) -> anyhow::Result<()>;
    async fn find(&self, task_id: &ID) -> Option<Task>;
    async fn find_by_user(&self, user_id: &ID) -> Vec<Task>;
    async fn delete(&self, task_id: &ID) -> Option<Task>;
    /// Tasks that are not completed, have a deadline after `now` and at
    /// least one reminder
    async fn find_reminder_candidates(&self, now: i64) -> anyhow::Result<Vec<Task>>;
}
