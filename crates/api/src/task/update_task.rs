use crate::{
    error::TaskbellError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use taskbell_api_structs::update_task::*;
use taskbell_domain::{normalize_reminders, RawReminder, ReminderAction, Task, TaskStatus, ID};
use taskbell_infra::TaskbellContext;

pub async fn update_task_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<TaskbellContext>,
) -> Result<HttpResponse, TaskbellError> {
    let body = body.0;
    let usecase = UpdateTaskUseCase {
        task_id: path_params.task_id.clone(),
        title: body.title,
        description: body.description,
        deadline: body.deadline,
        status: body.status,
        reminders: body.reminders,
    };

    execute(usecase, &ctx)
        .await
        .map(|task| HttpResponse::Ok().json(APIResponse::new(task)))
        .map_err(TaskbellError::from)
}

#[derive(Debug)]
pub struct UpdateTaskUseCase {
    pub task_id: ID,
    pub title: Option<String>,
    pub description: Option<String>,
    /// `Some(None)` removes the deadline
    pub deadline: Option<Option<i64>>,
    pub status: Option<TaskStatus>,
    pub reminders: Option<Vec<RawReminder>>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    EmptyTitle,
    StorageError,
}

impl From<UseCaseError> for TaskbellError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => {
                Self::NotFound(format!("The task with id: {}, was not found.", id))
            }
            UseCaseError::EmptyTitle => {
                Self::BadClientData("The task title must not be empty.".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateTaskUseCase {
    type Response = Task;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateTask";

    async fn execute(&mut self, ctx: &TaskbellContext) -> Result<Self::Response, Self::Error> {
        // A running reminder scan holds fired reminders that are not saved yet
        let _scan = ctx.reminder_scan_lock.lock().await;

        let mut task = match ctx.repos.tasks.find(&self.task_id).await {
            Some(task) => task,
            None => return Err(UseCaseError::NotFound(self.task_id.clone())),
        };
        let now = ctx.sys.get_timestamp_millis();

        if let Some(title) = &self.title {
            let title = title.trim();
            if title.is_empty() {
                return Err(UseCaseError::EmptyTitle);
            }
            task.title = title.to_string();
        }
        if let Some(description) = &self.description {
            task.description = Some(description.clone());
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(deadline) = self.deadline {
            task.set_deadline(deadline);
        }
        if let Some(reminders) = &self.reminders {
            let reminders = normalize_reminders(reminders, task.deadline, now);
            task.apply_reminders(ReminderAction::Overwrite, reminders);
        }
        task.updated = now;

        ctx.repos
            .tasks
            .save(&task)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(task)
    }
}
