use std::io::{ErrorKind, SeekFrom};
use std::path::{Component, Path, PathBuf};

use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};

use super::byte_range::{content_range_header, parse_range_header};
use super::range_reply::RangeReply;
use super::serve_error::ServeError;
use super::server_config::ServerConfig;

const OCTET_STREAM: &str = "application/octet-stream";

/// 分段下载端点：只读访问 `root` 目录下的文件，自身无状态。
#[derive(Debug, Clone)]
pub struct RangeEndpoint {
    root: PathBuf,
}

impl RangeEndpoint {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.root_dir.clone())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 处理一次下载请求。
    ///
    /// - 无 `Range` 或格式错误：200，整个文件；
    /// - 合法区间：206，`end` 截断到文件末尾；
    /// - 起点越过文件末尾：416，`Content-Range: bytes */<size>`。
    pub async fn serve(
        &self,
        file_id: &str,
        range: Option<&str>,
    ) -> Result<RangeReply, ServeError> {
        let path = self.resolve(file_id).await?;
        let metadata = tokio::fs::metadata(&path).await?;
        let size = metadata.len();

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(OCTET_STREAM));
        headers.insert(header::ACCEPT_RANGES, HeaderValue::from_static("bytes"));
        if let Ok(disposition) =
            HeaderValue::from_str(&format!("attachment; filename=\"{}\"", file_id))
        {
            headers.insert(header::CONTENT_DISPOSITION, disposition);
        }

        let requested = match range {
            Some(raw) => {
                let parsed = parse_range_header(raw);
                if parsed.is_none() {
                    debug!("Range 头格式错误，返回整个文件: {:?}", raw);
                }
                parsed
            }
            None => None,
        };

        let Some(requested) = requested else {
            debug!("整体下载 {} ({} 字节)", path.display(), size);
            headers.insert(header::CONTENT_LENGTH, HeaderValue::from(size));
            let file = File::open(&path).await?;
            return Ok(RangeReply {
                status: StatusCode::OK,
                headers,
                body: Some(ReaderStream::new(file.take(size))),
            });
        };

        let Some((start, end)) = requested.resolve(size) else {
            debug!("区间起点 {} 超出文件大小 {}", requested.start, size);
            if let Ok(value) = HeaderValue::from_str(&format!("bytes */{}", size)) {
                headers.insert(header::CONTENT_RANGE, value);
            }
            headers.insert(header::CONTENT_LENGTH, HeaderValue::from(0u64));
            return Ok(RangeReply {
                status: StatusCode::RANGE_NOT_SATISFIABLE,
                headers,
                body: None,
            });
        };

        let length = end - start + 1;
        debug!("分段下载 {} [{}-{}]/{}", path.display(), start, end, size);
        if let Ok(value) = HeaderValue::from_str(&content_range_header(start, end, size)) {
            headers.insert(header::CONTENT_RANGE, value);
        }
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));

        let mut file = File::open(&path).await?;
        file.seek(SeekFrom::Start(start)).await?;
        Ok(RangeReply {
            status: StatusCode::PARTIAL_CONTENT,
            headers,
            body: Some(ReaderStream::new(file.take(length))),
        })
    }

    /// 把文件标识解析为根目录下的真实路径。
    ///
    /// 标识必须是单个普通路径段；符号链接解析后也不能跑出根目录。
    async fn resolve(&self, file_id: &str) -> Result<PathBuf, ServeError> {
        let mut components = Path::new(file_id).components();
        let single_segment = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !single_segment || file_id.contains(['/', '\\']) {
            warn!("拒绝非法的文件标识: {:?}", file_id);
            return Err(ServeError::InvalidFileId(file_id.to_string()));
        }

        let root = canonicalize(&self.root).await?;
        let path = canonicalize(&root.join(file_id)).await?;
        if !path.starts_with(&root) {
            warn!("文件标识 {:?} 指向根目录之外", file_id);
            return Err(ServeError::InvalidFileId(file_id.to_string()));
        }

        if !tokio::fs::metadata(&path).await?.is_file() {
            return Err(ServeError::NotFound);
        }
        Ok(path)
    }
}

async fn canonicalize(path: &Path) -> Result<PathBuf, ServeError> {
    tokio::fs::canonicalize(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => ServeError::NotFound,
        _ => ServeError::Io(e),
    })
}
