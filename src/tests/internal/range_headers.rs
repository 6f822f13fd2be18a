//! 请求头 `Range` 与响应头 `Content-Range` 的解析。

use crate::server::{ByteRange, content_range_header, parse_range_header};
use crate::transfer::{ContentRange, parse_content_range, range_header};

#[test]
fn parses_closed_and_open_ranges() {
    assert_eq!(
        parse_range_header("bytes=0-10239"),
        Some(ByteRange { start: 0, end: Some(10239) })
    );
    assert_eq!(
        parse_range_header("bytes=20480-"),
        Some(ByteRange { start: 20480, end: None })
    );
    assert_eq!(
        parse_range_header("  bytes=5-5 "),
        Some(ByteRange { start: 5, end: Some(5) })
    );
}

#[test]
fn rejects_malformed_ranges() {
    for raw in [
        "",
        "bytes=",
        "bytes=-",
        "bytes=-500",
        "bytes=abc-10",
        "bytes=+1-10",
        "bytes=10-5",
        "bytes=0-1,4-5",
        "items=0-10",
        "bytes 0-10",
        "bytes=99999999999999999999999-",
    ] {
        assert_eq!(parse_range_header(raw), None, "应视为格式错误: {:?}", raw);
    }
}

#[test]
fn resolve_clamps_end_and_rejects_start_past_eof() {
    let open = ByteRange { start: 20480, end: None };
    assert_eq!(open.resolve(25600), Some((20480, 25599)));

    let past_end = ByteRange { start: 20480, end: Some(30719) };
    assert_eq!(past_end.resolve(25600), Some((20480, 25599)));

    let inside = ByteRange { start: 0, end: Some(99) };
    assert_eq!(inside.resolve(25600), Some((0, 99)));

    assert_eq!(ByteRange { start: 25600, end: None }.resolve(25600), None);
    assert_eq!(ByteRange { start: 0, end: Some(10) }.resolve(0), None);
}

#[test]
fn builds_header_values() {
    assert_eq!(content_range_header(10240, 20479, 25600), "bytes 10240-20479/25600");
    assert_eq!(range_header(0, 10239), "bytes=0-10239");
}

#[test]
fn parses_content_range() {
    assert_eq!(
        parse_content_range("bytes 0-10239/25600"),
        Some(ContentRange { span: Some((0, 10239)), total: Some(25600) })
    );
    assert_eq!(
        parse_content_range("bytes */0"),
        Some(ContentRange { span: None, total: Some(0) })
    );
    assert_eq!(
        parse_content_range("bytes 0-9/*"),
        Some(ContentRange { span: Some((0, 9)), total: None })
    );
    assert_eq!(parse_content_range("bytes 9-0/10"), None);
    assert_eq!(parse_content_range("bytes 0-9"), None);
    assert_eq!(parse_content_range("items 0-9/10"), None);
}
