use crate::{
    error::TaskbellError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use taskbell_api_structs::get_user::*;
use taskbell_domain::{User, ID};
use taskbell_infra::TaskbellContext;

pub async fn get_user_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<TaskbellContext>,
) -> Result<HttpResponse, TaskbellError> {
    let usecase = GetUserUseCase {
        user_id: path_params.user_id.clone(),
    };
    execute(usecase, &ctx)
        .await
        .map(|usecase_res| HttpResponse::Ok().json(APIResponse::new(usecase_res.user)))
        .map_err(TaskbellError::from)
}

#[derive(Debug)]
struct GetUserUseCase {
    user_id: ID,
}

#[derive(Debug)]
struct UseCaseRes {
    pub user: User,
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
impl UseCase for GetUserUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "GetUser";

    async fn execute(&mut self, ctx: &TaskbellContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.users.find(&self.user_id).await {
            Some(user) => Ok(UseCaseRes { user }),
            None => Err(UseCaseError::UserNotFound(self.user_id.clone())),
        }
    }
}
