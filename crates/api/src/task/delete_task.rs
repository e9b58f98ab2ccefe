use crate::{
    error::TaskbellError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use taskbell_api_structs::delete_task::*;
use taskbell_domain::{Task, ID};
use taskbell_infra::TaskbellContext;

pub async fn delete_task_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<TaskbellContext>,
) -> Result<HttpResponse, TaskbellError> {
    let usecase = DeleteTaskUseCase {
        task_id: path_params.task_id.clone(),
    };
    execute(usecase, &ctx)
        .await
        .map(|task| HttpResponse::Ok().json(APIResponse::new(task)))
        .map_err(TaskbellError::from)
}

#[derive(Debug)]
struct DeleteTaskUseCase {
    task_id: ID,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for TaskbellError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => {
                Self::NotFound(format!("The task with id: {}, was not found.", id))
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteTaskUseCase {
    type Response = Task;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteTask";

    async fn execute(&mut self, ctx: &TaskbellContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .tasks
            .delete(&self.task_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.task_id.clone()))
    }
}
