use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tokio::net::TcpListener;
use tracing::info;

use super::range_endpoint::RangeEndpoint;
use super::server_config::ServerConfig;

/// 把 [`RangeEndpoint`] 挂到 axum 上：`GET /<base_path>/:file_id`。
#[derive(Debug, Clone)]
pub struct RangeServer {
    endpoint: Arc<RangeEndpoint>,
    base_path: String,
}

impl RangeServer {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            endpoint: Arc::new(RangeEndpoint::from_config(&config)),
            base_path: config.base_path.trim_matches('/').to_string(),
        }
    }

    /// 路由模板，例如 `/download/:file_id`
    pub fn route_path(&self) -> String {
        if self.base_path.is_empty() {
            "/:file_id".to_string()
        } else {
            format!("/{}/:file_id", self.base_path)
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route(&self.route_path(), get(serve_file))
            .with_state(Arc::clone(&self.endpoint))
    }

    /// 在已绑定的监听器上提供服务，直到出错。
    pub async fn serve(self, listener: TcpListener) -> std::io::Result<()> {
        if let Ok(addr) = listener.local_addr() {
            info!(
                "分段下载服务已启动: http://{}{}，根目录 {}",
                addr,
                self.route_path(),
                self.endpoint.root().display()
            );
        }
        axum::serve(listener, self.router()).await
    }
}

async fn serve_file(
    State(endpoint): State<Arc<RangeEndpoint>>,
    Path(file_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let range = headers
        .get(header::RANGE)
        .and_then(|value| value.to_str().ok());

    match endpoint.serve(&file_id, range).await {
        Ok(reply) => reply.into_response(),
        Err(e) => e.into_response(),
    }
}
