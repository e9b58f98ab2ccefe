use crate::{APIResponse, BaseClient, ID};
use reqwest::StatusCode;
use std::sync::Arc;
use taskbell_api_structs::*;

#[derive(Clone)]
pub struct UserClient {
    base: Arc<BaseClient>,
}

pub struct CreateUserInput {
    pub email: String,
    pub name: String,
}

impl UserClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(&self, input: CreateUserInput) -> APIResponse<create_user::APIResponse> {
        let body = create_user::RequestBody {
            email: input.email,
            name: input.name,
        };
        self.base
            .post(body, "users".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get(&self, user_id: ID) -> APIResponse<get_user::APIResponse> {
        self.base
            .get(format!("users/{}", user_id), StatusCode::OK)
            .await
    }

    pub async fn get_tasks(&self, user_id: ID) -> APIResponse<get_user_tasks::APIResponse> {
        self.base
            .get(format!("users/{}/tasks", user_id), StatusCode::OK)
            .await
    }
}
