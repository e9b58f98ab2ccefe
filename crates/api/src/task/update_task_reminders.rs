use crate::{
    error::TaskbellError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use taskbell_api_structs::update_task_reminders::*;
use taskbell_domain::{
    normalize_reminders, InvalidReminderSpec, ReminderAction, Task, UtcReminderSpec, ID,
};
use taskbell_infra::TaskbellContext;

pub async fn update_task_reminders_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<TaskbellContext>,
) -> Result<HttpResponse, TaskbellError> {
    let body = body.0;
    let usecase = UpdateTaskRemindersUseCase {
        task_id: path_params.task_id.clone(),
        action: body.action,
        reminders: body.reminders,
    };

    execute(usecase, &ctx)
        .await
        .map(|task| HttpResponse::Ok().json(APIResponse::new(task)))
        .map_err(TaskbellError::from)
}

/// Overwrites or appends to the reminders of a `Task` using the UTC
/// anchored reminder schema
#[derive(Debug)]
pub struct UpdateTaskRemindersUseCase {
    pub task_id: ID,
    pub action: ReminderAction,
    pub reminders: Vec<UtcReminderSpec>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    NothingToAppend,
    InvalidReminder(InvalidReminderSpec),
    StorageError,
}

impl From<UseCaseError> for TaskbellError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => {
                Self::NotFound(format!("The task with id: {}, was not found.", id))
            }
            UseCaseError::NothingToAppend => {
                Self::BadClientData("Appending requires at least one reminder.".into())
            }
            UseCaseError::InvalidReminder(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateTaskRemindersUseCase {
    type Response = Task;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateTaskReminders";

    async fn execute(&mut self, ctx: &TaskbellContext) -> Result<Self::Response, Self::Error> {
        if self.action == ReminderAction::Append && self.reminders.is_empty() {
            return Err(UseCaseError::NothingToAppend);
        }

        let _scan = ctx.reminder_scan_lock.lock().await;

        let mut task = match ctx.repos.tasks.find(&self.task_id).await {
            Some(task) => task,
            None => return Err(UseCaseError::NotFound(self.task_id.clone())),
        };
        let now = ctx.sys.get_timestamp_millis();

        let raw = self
            .reminders
            .iter()
            .map(|spec| spec.to_raw(now))
            .collect::<Result<Vec<_>, _>>()
            .map_err(UseCaseError::InvalidReminder)?;

        let reminders = normalize_reminders(&raw, task.deadline, now);
        task.apply_reminders(self.action, reminders);
        task.updated = now;

        ctx.repos
            .tasks
            .save(&task)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(task)
    }
}
