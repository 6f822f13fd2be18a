//! `Range: bytes=<start>-<end>` 的解析，以及 `Content-Range` 的拼装。

/// 请求头里的单个字节区间，`end` 为闭区间终点，缺省表示读到文件末尾。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: Option<u64>,
}

impl ByteRange {
    /// 按文件大小落地为闭区间 `(start, end)`，`end` 截断到 `size - 1`。
    ///
    /// `start >= size` 时不可满足，返回 `None`。
    pub fn resolve(&self, size: u64) -> Option<(u64, u64)> {
        if self.start >= size {
            return None;
        }
        let last = size - 1;
        let end = self.end.map_or(last, |end| end.min(last));
        Some((self.start, end))
    }
}

/// 解析 `Range` 头，只支持单个 `bytes=<start>-<end>?` 区间。
///
/// 单位不是 `bytes`、数字非法、`start > end`、后缀区间（`-N`）、多区间，一律视为格式错误返回 `None`。
pub fn parse_range_header(value: &str) -> Option<ByteRange> {
    let ranges = value.trim().strip_prefix("bytes=")?;
    if ranges.contains(',') {
        return None;
    }

    let (start, end) = ranges.split_once('-')?;
    let start = parse_position(start)?;
    let end = match end.trim() {
        "" => None,
        end => Some(parse_position(end)?),
    };

    if end.is_some_and(|end| start > end) {
        return None;
    }
    Some(ByteRange { start, end })
}

/// 只接受纯十进制数字（`u64::from_str` 会接受 `+1`）。
fn parse_position(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// `bytes <start>-<end>/<size>`
pub fn content_range_header(start: u64, end: u64, size: u64) -> String {
    format!("bytes {}-{}/{}", start, end, size)
}
