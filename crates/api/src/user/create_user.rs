use crate::error::TaskbellError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use taskbell_api_structs::create_user::*;
use taskbell_domain::User;
use taskbell_infra::TaskbellContext;

pub async fn create_user_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<TaskbellContext>,
) -> Result<HttpResponse, TaskbellError> {
    let body = body.0;
    let usecase = CreateUserUseCase {
        email: body.email,
        name: body.name,
    };

    execute(usecase, &ctx)
        .await
        .map(|usecase_res| HttpResponse::Created().json(APIResponse::new(usecase_res.user)))
        .map_err(TaskbellError::from)
}

#[derive(Debug)]
pub struct CreateUserUseCase {
    pub email: String,
    pub name: String,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub user: User,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidEmail(String),
    StorageError,
}

impl From<UseCaseError> for TaskbellError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidEmail(email) => Self::BadClientData(format!(
                "The provided email: {}, is not a valid email address.",
                email
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateUserUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateUser";

    async fn execute(&mut self, ctx: &TaskbellContext) -> Result<Self::Response, Self::Error> {
        let email = self.email.trim();
        if !email.contains('@') {
            return Err(UseCaseError::InvalidEmail(self.email.clone()));
        }

        let user = User::new(email.to_string(), self.name.clone());
        ctx.repos
            .users
            .insert(&user)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseRes { user })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[actix_web::main]
    #[test]
    async fn creates_user() {
        let ctx = TaskbellContext::create_inmemory();
        let mut usecase = CreateUserUseCase {
            email: " ada@example.com ".into(),
            name: "Ada".into(),
        };

        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.user.email, "ada@example.com");
        assert!(ctx.repos.users.find(&res.user.id).await.is_some());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_invalid_email() {
        let ctx = TaskbellContext::create_inmemory();
        let mut usecase = CreateUserUseCase {
            email: "ada".into(),
            name: "Ada".into(),
        };

        let res = usecase.execute(&ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::InvalidEmail("ada".into()));
    }
}
