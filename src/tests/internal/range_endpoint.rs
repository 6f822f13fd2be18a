//! 分段下载端点：状态码与头部的字节算术、格式错误回退、目录穿越拦截，以及经 axum 的真实 HTTP 往返。

use axum::http::{StatusCode, header};
use futures_util::StreamExt;
use tempfile::TempDir;

use crate::server::{RangeEndpoint, RangeReply, ServeError};
use crate::tests::{local_client, random_bytes, spawn_range_server, write_fixture};

const SIZE: usize = 25600;

fn fixture() -> (TempDir, RangeEndpoint, Vec<u8>) {
    let dir = TempDir::new().expect("创建临时目录失败");
    let content = random_bytes(SIZE);
    write_fixture(dir.path(), "movie.bin", &content);
    let endpoint = RangeEndpoint::new(dir.path());
    (dir, endpoint, content)
}

async fn read_body(reply: RangeReply) -> Vec<u8> {
    let mut stream = reply.body.expect("应有响应体");
    let mut out = Vec::new();
    while let Some(chunk) = stream.next().await {
        out.extend_from_slice(&chunk.expect("读取响应体失败"));
    }
    out
}

fn header_str<'a>(reply: &'a RangeReply, name: header::HeaderName) -> Option<&'a str> {
    reply.headers.get(name).and_then(|v| v.to_str().ok())
}

#[tokio::test]
async fn full_content_without_range() {
    let (_dir, endpoint, content) = fixture();

    let reply = endpoint.serve("movie.bin", None).await.unwrap();
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.content_length(), Some(SIZE as u64));
    assert_eq!(reply.content_range(), None);
    assert_eq!(header_str(&reply, header::ACCEPT_RANGES), Some("bytes"));
    assert_eq!(
        header_str(&reply, header::CONTENT_TYPE),
        Some("application/octet-stream")
    );
    assert_eq!(
        header_str(&reply, header::CONTENT_DISPOSITION),
        Some("attachment; filename=\"movie.bin\"")
    );
    assert_eq!(read_body(reply).await, content);
}

#[tokio::test]
async fn partial_content_for_each_chunk() {
    let (_dir, endpoint, content) = fixture();

    for (start, end, expected_end) in [(0u64, 10239u64, 10239u64), (10240, 20479, 20479), (20480, 30719, 25599)] {
        let raw = format!("bytes={}-{}", start, end);
        let reply = endpoint.serve("movie.bin", Some(&raw)).await.unwrap();

        assert_eq!(reply.status, StatusCode::PARTIAL_CONTENT);
        let expected_range = format!("bytes {}-{}/{}", start, expected_end, SIZE);
        assert_eq!(reply.content_range(), Some(expected_range.as_str()));
        assert_eq!(reply.content_length(), Some(expected_end - start + 1));
        assert_eq!(header_str(&reply, header::ACCEPT_RANGES), Some("bytes"));

        let body = read_body(reply).await;
        assert_eq!(body, &content[start as usize..=expected_end as usize]);
    }
}

#[tokio::test]
async fn open_ended_range_reads_to_eof() {
    let (_dir, endpoint, content) = fixture();

    let reply = endpoint.serve("movie.bin", Some("bytes=25000-")).await.unwrap();
    assert_eq!(reply.status, StatusCode::PARTIAL_CONTENT);
    assert_eq!(reply.content_range(), Some("bytes 25000-25599/25600"));
    assert_eq!(read_body(reply).await, &content[25000..]);
}

#[tokio::test]
async fn malformed_range_falls_back_to_full_content() {
    let (_dir, endpoint, content) = fixture();

    for raw in ["bytes=abc-def", "bytes=10-5", "bytes=-100", "lines=0-1"] {
        let reply = endpoint.serve("movie.bin", Some(raw)).await.unwrap();
        assert_eq!(reply.status, StatusCode::OK, "{:?} 应回退为整体下载", raw);
        assert_eq!(reply.content_length(), Some(SIZE as u64));
        assert_eq!(read_body(reply).await, content);
    }
}

#[tokio::test]
async fn start_past_eof_is_unsatisfiable() {
    let (_dir, endpoint, _content) = fixture();

    let reply = endpoint.serve("movie.bin", Some("bytes=25600-")).await.unwrap();
    assert_eq!(reply.status, StatusCode::RANGE_NOT_SATISFIABLE);
    assert_eq!(reply.content_range(), Some("bytes */25600"));
    assert!(reply.body.is_none());
}

#[tokio::test]
async fn empty_file_answers_any_range_with_416() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path(), "empty.bin", &[]);
    let endpoint = RangeEndpoint::new(dir.path());

    let reply = endpoint.serve("empty.bin", Some("bytes=0-10239")).await.unwrap();
    assert_eq!(reply.status, StatusCode::RANGE_NOT_SATISFIABLE);
    assert_eq!(reply.content_range(), Some("bytes */0"));

    let reply = endpoint.serve("empty.bin", None).await.unwrap();
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.content_length(), Some(0));
}

#[tokio::test]
async fn missing_file_and_directory_are_not_found() {
    let (dir, endpoint, _content) = fixture();
    std::fs::create_dir(dir.path().join("folder")).unwrap();

    assert!(matches!(
        endpoint.serve("nope.bin", None).await,
        Err(ServeError::NotFound)
    ));
    assert!(matches!(
        endpoint.serve("folder", Some("bytes=0-1")).await,
        Err(ServeError::NotFound)
    ));
}

#[tokio::test]
async fn traversal_identifiers_are_rejected() {
    let root = TempDir::new().unwrap();
    let served = root.path().join("served");
    std::fs::create_dir(&served).unwrap();
    write_fixture(root.path(), "secret.txt", b"secret");
    let endpoint = RangeEndpoint::new(&served);

    for file_id in ["../secret.txt", "..", ".", "", "a/b", "/etc/passwd", "..\\secret.txt"] {
        let result = endpoint.serve(file_id, None).await;
        assert!(
            matches!(result, Err(ServeError::InvalidFileId(_))),
            "{:?} 应被拒绝",
            file_id
        );
    }
}

#[cfg(unix)]
#[tokio::test]
async fn symlink_escaping_root_is_rejected() {
    let root = TempDir::new().unwrap();
    let served = root.path().join("served");
    std::fs::create_dir(&served).unwrap();
    let secret = write_fixture(root.path(), "secret.txt", b"secret");
    std::os::unix::fs::symlink(&secret, served.join("link.txt")).unwrap();
    let endpoint = RangeEndpoint::new(&served);

    assert!(matches!(
        endpoint.serve("link.txt", None).await,
        Err(ServeError::InvalidFileId(_))
    ));
}

#[tokio::test]
async fn serves_ranges_over_http() {
    let dir = TempDir::new().unwrap();
    let content = random_bytes(SIZE);
    write_fixture(dir.path(), "movie.bin", &content);
    let base_url = spawn_range_server(dir.path()).await;
    let client = local_client();

    let response = client
        .get(format!("{}/movie.bin", base_url))
        .header(header::RANGE.as_str(), "bytes=10240-20479")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 206);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_RANGE.as_str())
            .and_then(|v| v.to_str().ok()),
        Some("bytes 10240-20479/25600")
    );
    let body = response.bytes().await.unwrap();
    assert_eq!(&body[..], &content[10240..20480]);

    let response = client
        .get(format!("{}/movie.bin", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.bytes().await.unwrap().len(), SIZE);
}

#[tokio::test]
async fn http_errors_use_plain_text_bodies() {
    let dir = TempDir::new().unwrap();
    let base_url = spawn_range_server(dir.path()).await;
    let client = local_client();

    let response = client
        .get(format!("{}/missing.bin", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(response.text().await.unwrap(), "File not found");

    // 编码后的 `../` 会原样到达端点，由端点拦截
    let response = client
        .get(format!("{}/..%2Fsecret.txt", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}
