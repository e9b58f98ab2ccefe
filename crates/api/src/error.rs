use actix_web::{
    http::{header, StatusCode},
    HttpResponse,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskbellError {
    #[error("Internal server error")]
    InternalError,
    #[error("Invalid data provided: Error message: `{0}`")]
    BadClientData(String),
    #[error("404 Not found. Error message: `{0}`")]
    NotFound(String),
}

impl actix_web::error::ResponseError for TaskbellError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadClientData(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header((header::CONTENT_TYPE, "text/html; charset=utf-8"))
            .body(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn maps_errors_to_status_codes() {
        let cases = [
            (TaskbellError::InternalError, StatusCode::INTERNAL_SERVER_ERROR),
            (TaskbellError::BadClientData("bad".into()), StatusCode::BAD_REQUEST),
            (TaskbellError::NotFound("gone".into()), StatusCode::NOT_FOUND),
        ];
        for (error, status) in cases {
            assert_eq!(error.status_code(), status);
            assert_eq!(error.error_response().status(), status);
        }
    }
}
