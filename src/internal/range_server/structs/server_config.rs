use std::path::PathBuf;

use serde::Deserialize;

/// 默认的文件根目录
pub const DEFAULT_DATA_DIR: &str = "data";

/// 默认的路由前缀：`GET /download/<file_id>`
pub const DEFAULT_BASE_PATH: &str = "download";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 对外提供下载的文件所在目录
    pub root_dir: PathBuf,
    /// 路由前缀，不含首尾 `/`
    pub base_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from(DEFAULT_DATA_DIR),
            base_path: DEFAULT_BASE_PATH.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn root_dir(mut self, root_dir: impl Into<PathBuf>) -> Self {
        self.root_dir = root_dir.into();
        self
    }

    pub fn base_path(mut self, base_path: &str) -> Self {
        self.base_path = base_path.trim_matches('/').to_string();
        self
    }
}
