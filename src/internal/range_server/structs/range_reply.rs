use axum::body::Body;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use tokio::fs::File;
use tokio::io::Take;
use tokio_util::io::ReaderStream;

/// 文件内容流：已经定位到区间起点，并限制了读取长度。
pub type FileStream = ReaderStream<Take<File>>;

/// 一次分段请求的处理结果，与具体 Web 框架无关。
///
/// 流被丢弃（读完或客户端断开）时文件句柄随之关闭。
#[derive(Debug)]
pub struct RangeReply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// 416 没有响应体
    pub body: Option<FileStream>,
}

impl RangeReply {
    /// `Content-Length` 头的值
    pub fn content_length(&self) -> Option<u64> {
        self.headers
            .get(header::CONTENT_LENGTH)?
            .to_str()
            .ok()?
            .parse()
            .ok()
    }

    pub fn content_range(&self) -> Option<&str> {
        self.headers.get(header::CONTENT_RANGE)?.to_str().ok()
    }
}

impl IntoResponse for RangeReply {
    fn into_response(self) -> Response {
        let body = match self.body {
            Some(stream) => Body::from_stream(stream),
            None => Body::empty(),
        };
        (self.status, self.headers, body).into_response()
    }
}
