use std::path::PathBuf;

/// 下载完成后如何交付文件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeliveryMode {
    /// 只保留在内存里，通过 `artifact()` 取用
    #[default]
    OutputBytes,
    /// 另外写入该目录，文件名取会话的文件名
    SaveFile(PathBuf),
}
