//! 服务端错误类型，直接映射为 HTTP 响应。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("File not found")]
    NotFound,

    #[error("非法的文件标识: {0}")]
    InvalidFileId(String),

    #[error("读取文件失败: {0}")]
    Io(#[from] std::io::Error),
}

impl ServeError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServeError::NotFound => StatusCode::NOT_FOUND,
            ServeError::InvalidFileId(_) => StatusCode::BAD_REQUEST,
            ServeError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        let body = match &self {
            ServeError::NotFound => "File not found".to_string(),
            ServeError::InvalidFileId(_) => "Invalid file id".to_string(),
            // 不把本地路径等细节暴露给客户端
            ServeError::Io(_) => "Internal server error".to_string(),
        };
        (self.status(), body).into_response()
    }
}
