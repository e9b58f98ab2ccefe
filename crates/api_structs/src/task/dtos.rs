use serde::{Deserialize, Serialize};
use taskbell_domain::{Reminder, Task, TaskStatus, ID};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TaskDTO {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<i64>,
    pub status: TaskStatus,
    pub reminders: Vec<Reminder>,
    pub created: i64,
    pub updated: i64,
}

impl TaskDTO {
    pub fn new(task: Task) -> Self {
        Self {
            id: task.id,
            user_id: task.user_id,
            title: task.title,
            description: task.description,
            deadline: task.deadline,
            status: task.status,
            reminders: task.reminders,
            created: task.created,
            updated: task.updated,
        }
    }
}
