use crate::{
    error::TaskbellError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use taskbell_api_structs::get_user_tasks::*;
use taskbell_domain::{Task, ID};
use taskbell_infra::TaskbellContext;

pub async fn get_user_tasks_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<TaskbellContext>,
) -> Result<HttpResponse, TaskbellError> {
    let usecase = GetUserTasksUseCase {
        user_id: path_params.user_id.clone(),
    };
    execute(usecase, &ctx)
        .await
        .map(|tasks| HttpResponse::Ok().json(APIResponse::new(tasks)))
        .map_err(TaskbellError::from)
}

#[derive(Debug)]
struct GetUserTasksUseCase {
    user_id: ID,
}

#[derive(Debug)]
enum UseCaseError {
    UserNotFound(ID),
}

impl From<UseCaseError> for TaskbellError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::UserNotFound(id) => {
                Self::NotFound(format!("A user with id: {}, was not found.", id))
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUserTasksUseCase {
    type Response = Vec<Task>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetUserTasks";

    async fn execute(&mut self, ctx: &TaskbellContext) -> Result<Self::Response, Self::Error> {
        if ctx.repos.users.find(&self.user_id).await.is_none() {
            return Err(UseCaseError::UserNotFound(self.user_id.clone()));
        }

        Ok(ctx.repos.tasks.find_by_user(&self.user_id).await)
    }
}
