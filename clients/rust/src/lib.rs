mod base;
mod status;
mod task;
mod user;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};
use status::StatusClient;
use std::sync::Arc;
use task::TaskClient;
pub use task::{CreateTaskInput, UpdateTaskInput, UpdateTaskRemindersInput};
use user::UserClient;
pub use user::CreateUserInput;

pub use taskbell_api_structs::dtos::*;
pub use taskbell_domain::{
    RawReminder, Recurrence, Reminder, ReminderAction, TaskStatus, UtcReminderSpec, ID,
};

// Domain
pub use taskbell_api_structs::dtos::TaskDTO as Task;
pub use taskbell_api_structs::dtos::UserDTO as User;

/// Taskbell Server SDK
///
/// The SDK contains methods for interacting with the Taskbell server
/// API.
#[derive(Clone)]
pub struct TaskbellSDK {
    pub status: StatusClient,
    pub task: TaskClient,
    pub user: UserClient,
}

impl TaskbellSDK {
    pub fn new(address: String) -> Self {
        let base = Arc::new(BaseClient::new(address));
        let status = StatusClient::new(base.clone());
        let task = TaskClient::new(base.clone());
        let user = UserClient::new(base);

        Self { status, task, user }
    }
}
