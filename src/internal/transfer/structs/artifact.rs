use std::path::{Path, PathBuf};

use bytes::Bytes;

/// 重组完成的文件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub bytes: Bytes,
}

impl Artifact {
    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// 写入 `dir/<file_name>`，目录不存在时创建，返回最终路径。
    ///
    /// 文件名只取最后一段，不会写到 `dir` 之外。
    pub async fn save_to(&self, dir: impl AsRef<Path>) -> std::io::Result<PathBuf> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir).await?;

        let name = Path::new(&self.file_name)
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "download".into());
        let path = dir.join(name);
        tokio::fs::write(&path, &self.bytes).await?;
        Ok(path)
    }
}
