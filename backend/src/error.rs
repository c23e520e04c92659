use axum::{http::StatusCode, response::IntoResponse, Json};
use shared::ErrorResponse;
use thiserror::Error;
use tracing::error;

use crate::repository::RepositoryError;

/// Failures reported to clients as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("输入不能为空")]
    EmptyInput,

    #[error("缺少任务ID")]
    MissingTaskId,

    #[error("任务ID格式错误")]
    InvalidTaskId,

    #[error("任务不存在")]
    NotFound,

    #[error("请求格式错误: {0}")]
    BadRequest(String),

    #[error("服务器错误: {0}")]
    Storage(#[from] RepositoryError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::EmptyInput
            | ApiError::MissingTaskId
            | ApiError::InvalidTaskId
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}
