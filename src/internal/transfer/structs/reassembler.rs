use bytes::BytesMut;
use tracing::{debug, info};

use super::artifact::Artifact;
use super::transfer_error::TransferError;
use crate::internal::range_store::structs::SessionRecords;

/// 把会话里的分片按偏移升序拼成完整文件。
pub struct Reassembler<'a> {
    records: &'a SessionRecords,
    chunk_size: u64,
}

impl<'a> Reassembler<'a> {
    pub fn new(records: &'a SessionRecords, chunk_size: u64) -> Self {
        Self {
            records,
            chunk_size: chunk_size.max(1),
        }
    }

    /// 按 `0, chunk_size, 2*chunk_size, …` 逐个读取分片并拼接。
    ///
    /// 只有成功产出文件后才清空会话；缺分片或长度不符时存储保持原样。
    pub async fn assemble(
        &self,
        file_name: &str,
        total_size: u64,
    ) -> Result<Artifact, TransferError> {
        let mut buffer = BytesMut::with_capacity(total_size as usize);

        let mut offset = 0;
        while offset < total_size {
            let chunk = self
                .records
                .load_chunk(offset)
                .await?
                .ok_or(TransferError::MissingChunk { offset })?;
            buffer.extend_from_slice(&chunk);
            offset += self.chunk_size;
        }

        let actual = buffer.len() as u64;
        if actual != total_size {
            return Err(TransferError::AssemblyLength {
                expected: total_size,
                actual,
            });
        }
        debug!("{} 重组完成，共 {} 字节", file_name, actual);

        let artifact = Artifact {
            file_name: file_name.to_string(),
            bytes: buffer.freeze(),
        };

        self.records.clear().await?;
        info!("{} 下载完成，会话记录已清理", file_name);
        Ok(artifact)
    }
}
