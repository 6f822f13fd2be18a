//! 响应头 `Content-Range` 的解析。

/// `bytes <start>-<end>/<total>` 或 `bytes */<total>`；`total` 为 `*` 时未知。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentRange {
    /// 本次响应覆盖的闭区间，`*` 时为 `None`
    pub span: Option<(u64, u64)>,
    pub total: Option<u64>,
}

pub fn parse_content_range(value: &str) -> Option<ContentRange> {
    let rest = value.trim().strip_prefix("bytes")?.trim_start();
    let (span, total) = rest.split_once('/')?;

    let total = match total.trim() {
        "*" => None,
        total => Some(total.parse().ok()?),
    };

    let span = match span.trim() {
        "*" => None,
        span => {
            let (start, end) = span.split_once('-')?;
            let start: u64 = start.trim().parse().ok()?;
            let end: u64 = end.trim().parse().ok()?;
            if start > end {
                return None;
            }
            Some((start, end))
        }
    };

    Some(ContentRange { span, total })
}
