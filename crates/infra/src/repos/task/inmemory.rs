use super::ITaskRepo;
use crate::repos::shared::inmemory_repo::*;
use taskbell_domain::{Reminder, Task, ID};

pub struct InMemoryTaskRepo {
    tasks: std::sync::Mutex<Vec<Task>>,
}

impl InMemoryTaskRepo {
    pub fn new() -> Self {
        Self {
            tasks: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl ITaskRepo for InMemoryTaskRepo {
    async fn insert(&self, task: &Task) -> anyhow::Result<()> {
        insert(task, &self.tasks);
        Ok(())
    }

    async fn save(&self, task: &Task) -> anyhow::Result<()> {
        save(task, &self.tasks);
        Ok(())
    }

    async fn save_reminders(&self, task_id: &ID, reminders: &[Reminder]) -> anyhow::Result<()> {
        update(task_id, &self.tasks, |task| task.reminders = reminders.to_vec());
        Ok(())
    }

    async fn find(&self, task_id: &ID) -> Option<Task> {
        find(task_id, &self.tasks)
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Task> {
        find_by(&self.tasks, |t| t.user_id == *user_id)
    }

    async fn delete(&self, task_id: &ID) -> Option<Task> {
        delete(task_id, &self.tasks)
    }

    async fn find_reminder_candidates(&self, now: i64) -> anyhow::Result<Vec<Task>> {
        Ok(find_by(&self.tasks, |t| t.is_reminder_candidate(now)))
    }
}
