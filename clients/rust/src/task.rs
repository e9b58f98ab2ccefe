use crate::{
    APIResponse, BaseClient, RawReminder, ReminderAction, TaskStatus, UtcReminderSpec, ID,
};
use reqwest::StatusCode;
use std::sync::Arc;
use taskbell_api_structs::*;

#[derive(Clone)]
pub struct TaskClient {
    base: Arc<BaseClient>,
}

pub struct CreateTaskInput {
    pub user_id: ID,
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<i64>,
    pub status: Option<TaskStatus>,
    pub reminders: Vec<RawReminder>,
}

/// Fields left as `None` are not changed. `deadline: Some(None)` removes the
/// deadline and every reminder with it.
#[derive(Default)]
pub struct UpdateTaskInput {
    pub task_id: ID,
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<Option<i64>>,
    pub status: Option<TaskStatus>,
    pub reminders: Option<Vec<RawReminder>>,
}

pub struct UpdateTaskRemindersInput {
    pub task_id: ID,
    pub action: ReminderAction,
    pub reminders: Vec<UtcReminderSpec>,
}

impl TaskClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(&self, input: CreateTaskInput) -> APIResponse<create_task::APIResponse> {
        let body = create_task::RequestBody {
            title: input.title,
            description: input.description,
            deadline: input.deadline,
            status: input.status,
            reminders: input.reminders,
        };
        self.base
            .post(
                body,
                format!("users/{}/tasks", input.user_id),
                StatusCode::CREATED,
            )
            .await
    }

    pub async fn get(&self, task_id: ID) -> APIResponse<get_task::APIResponse> {
        self.base
            .get(format!("tasks/{}", task_id), StatusCode::OK)
            .await
    }

    pub async fn update(&self, input: UpdateTaskInput) -> APIResponse<update_task::APIResponse> {
        let body = update_task::RequestBody {
            title: input.title,
            description: input.description,
            deadline: input.deadline,
            status: input.status,
            reminders: input.reminders,
        };
        self.base
            .put(body, format!("tasks/{}", input.task_id), StatusCode::OK)
            .await
    }

    pub async fn update_reminders(
        &self,
        input: UpdateTaskRemindersInput,
    ) -> APIResponse<update_task_reminders::APIResponse> {
        let body = update_task_reminders::RequestBody {
            action: input.action,
            reminders: input.reminders,
        };
        self.base
            .put(
                body,
                format!("tasks/{}/reminders", input.task_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn delete(&self, task_id: ID) -> APIResponse<delete_task::APIResponse> {
        self.base
            .delete(format!("tasks/{}", task_id), StatusCode::OK)
            .await
    }
}
