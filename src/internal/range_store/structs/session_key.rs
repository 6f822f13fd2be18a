use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use sha2::{Digest, Sha256};
use url::Url;

/// 路径段里必须转义的字符
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// 下载会话标识：同一个 `(url, file_name)` 对应同一个会话。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub url: String,
    pub file_name: String,
}

impl SessionKey {
    pub fn new(url: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            file_name: file_name.into(),
        }
    }

    /// 由下载服务根地址和文件标识拼出会话：`<base_url>/<转义后的 file_id>`。
    pub fn for_file(
        base_url: &str,
        file_id: &str,
    ) -> Result<Self, url::ParseError> {
        let base = format_base_url(base_url)?;
        let segment = utf8_percent_encode(file_id, PATH_SEGMENT).to_string();
        // `./` 前缀避免 `a:b` 这类标识被当成绝对地址
        let url = base.join(&format!("./{}", segment))?;
        Ok(Self::new(url.to_string(), file_id))
    }

    /// 会话在存储中的命名空间：`sha256(url + "\n" + file_name)` 的十六进制。
    pub fn namespace(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.url.as_bytes());
        hasher.update(b"\n");
        hasher.update(self.file_name.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

/// 保证根地址以 `/` 结尾，否则 `join` 会吃掉最后一段路径。
fn format_base_url(url: &str) -> Result<Url, url::ParseError> {
    let mut base_url = Url::parse(url)?;
    if !base_url.path().ends_with('/') {
        let new_path = format!("{}/", base_url.path());
        base_url.set_path(&new_path);
    }
    Ok(base_url)
}
