use crate::error::TaskbellError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use taskbell_api_structs::create_task::*;
use taskbell_domain::{normalize_reminders, RawReminder, Task, TaskStatus, ID};
use taskbell_infra::TaskbellContext;

pub async fn create_task_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<TaskbellContext>,
) -> Result<HttpResponse, TaskbellError> {
    let body = body.0;
    let usecase = CreateTaskUseCase {
        user_id: path_params.user_id.clone(),
        title: body.title,
        description: body.description,
        deadline: body.deadline,
        status: body.status.unwrap_or_default(),
        reminders: body.reminders,
    };

    execute(usecase, &ctx)
        .await
        .map(|task| HttpResponse::Created().json(APIResponse::new(task)))
        .map_err(TaskbellError::from)
}

#[derive(Debug)]
pub struct CreateTaskUseCase {
    pub user_id: ID,
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<i64>,
    pub status: TaskStatus,
    pub reminders: Vec<RawReminder>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EmptyTitle,
    UserNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for TaskbellError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyTitle => {
                Self::BadClientData("The task title must not be empty.".into())
            }
            UseCaseError::UserNotFound(id) => {
                Self::NotFound(format!("A user with id: {}, was not found.", id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateTaskUseCase {
    type Response = Task;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateTask";

    async fn execute(&mut self, ctx: &TaskbellContext) -> Result<Self::Response, Self::Error> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(UseCaseError::EmptyTitle);
        }
        if ctx.repos.users.find(&self.user_id).await.is_none() {
            return Err(UseCaseError::UserNotFound(self.user_id.clone()));
        }

        let now = ctx.sys.get_timestamp_millis();
        let mut task = Task::new(self.user_id.clone(), title.to_string(), now);
        task.description = self.description.clone();
        task.deadline = self.deadline;
        task.status = self.status;
        task.reminders = normalize_reminders(&self.reminders, self.deadline, now);

        ctx.repos
            .tasks
            .insert(&task)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(task)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::testing::TestContext;
    use taskbell_domain::{Recurrence, Reminder, MILLIS_PER_HOUR};

    const NOW: i64 = 1613865600000;

    fn new_usecase(
        user_id: ID,
        deadline: Option<i64>,
        reminders: Vec<RawReminder>,
    ) -> CreateTaskUseCase {
        CreateTaskUseCase {
            user_id,
            title: "Prepare talk".into(),
            description: None,
            deadline,
            status: TaskStatus::NotStarted,
            reminders,
        }
    }

    #[actix_web::main]
    #[test]
    async fn creates_task_with_normalized_reminders() {
        let t = TestContext::new(NOW);
        let user = t.insert_user("ada@example.com").await;
        let deadline = NOW + 48 * MILLIS_PER_HOUR;

        let mut usecase = new_usecase(
            user.id.clone(),
            Some(deadline),
            vec![
                RawReminder::one_time_before(24.0),
                RawReminder::one_time_before(24.0),
                RawReminder::recurring(Recurrence::Daily),
                RawReminder::one_time_before(100.0),
            ],
        );
        let task = usecase.execute(&t.ctx).await.unwrap();

        assert_eq!(
            task.reminders,
            vec![
                Reminder::one_time(deadline - 24 * MILLIS_PER_HOUR),
                Reminder::recurring(Recurrence::Daily, 24.0, None),
            ]
        );
        assert_eq!(t.ctx.repos.tasks.find(&task.id).await, Some(task));
    }

    #[actix_web::main]
    #[test]
    async fn drops_reminders_without_deadline() {
        let t = TestContext::new(NOW);
        let user = t.insert_user("ada@example.com").await;

        let mut usecase = new_usecase(user.id, None, vec![RawReminder::one_time_before(1.0)]);
        let task = usecase.execute(&t.ctx).await.unwrap();
        assert!(task.reminders.is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_unknown_user_and_empty_title() {
        let t = TestContext::new(NOW);
        let unknown = ID::default();

        let res = new_usecase(unknown.clone(), None, vec![]).execute(&t.ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::UserNotFound(unknown));

        let user = t.insert_user("ada@example.com").await;
        let mut usecase = new_usecase(user.id, None, vec![]);
        usecase.title = "   ".into();
        assert_eq!(usecase.execute(&t.ctx).await.unwrap_err(), UseCaseError::EmptyTitle);
    }
}
