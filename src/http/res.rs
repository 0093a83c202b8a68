use chrono::Utc;
use serde::Serialize;
use tracing::trace;

use crate::http::{protocol::header, sink::Sink};

/// 删除 cookie 时把过期时间设为当前时间之前的秒数
pub const COOKIE_DELETE_MARGIN: i64 = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub value: String,
    /// Unix 时间戳，0 表示会话 cookie
    pub expiry: i64,
}

/// 出站响应的内存构建器。
///
/// 所有 setter 都只修改内存状态，只有 `send` 才会把内容交给宿主。
/// 头和 cookie 按首次写入的顺序保存，同名后写覆盖。
/// `send` 之后再修改或重复 `send` 由调用方负责。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    code: u16,
    headers: Vec<(String, String)>,
    cookies: Vec<(String, Cookie)>,
    body: String,
}

impl Default for Response {
    fn default() -> Self {
        Self {
            code: 200,
            headers: Vec::new(),
            cookies: Vec::new(),
            body: String::new(),
        }
    }
}

/// `same` 决定名字是否相同：header 忽略大小写，cookie 区分大小写。
fn upsert<V>(entries: &mut Vec<(String, V)>, name: &str, value: V, same: fn(&str, &str) -> bool) {
    match entries.iter_mut().find(|(k, _)| same(k, name)) {
        Some((_, slot)) => *slot = value,
        None => entries.push((name.to_string(), value)),
    }
}

fn same_header(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

fn same_cookie(a: &str, b: &str) -> bool {
    a == b
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    /// 不校验范围
    pub fn code(&mut self, code: u16) -> &mut Self {
        self.code = code;
        self
    }

    /// 同名 header（忽略大小写）原位替换值，保留首次写入时的名字。
    pub fn header(&mut self, name: &str, value: &str) -> &mut Self {
        upsert(&mut self.headers, name, value.to_string(), same_header);
        self
    }

    /// 只设置 `Location`，状态码需要调用方另行设置。
    pub fn redirect(&mut self, url: &str) -> &mut Self {
        self.header(header::LOCATION, url)
    }

    /// `ttl` 为距现在的秒数，0 表示会话 cookie。
    /// 空值表示删除：过期时间强制设为过去，忽略 `ttl`。
    pub fn cookie(&mut self, name: &str, value: &str, ttl: i64) -> &mut Self {
        let now = Utc::now().timestamp();
        let expiry = if value.is_empty() {
            now - COOKIE_DELETE_MARGIN
        } else if ttl == 0 {
            0
        } else {
            now.saturating_add(ttl)
        };
        upsert(
            &mut self.cookies,
            name,
            Cookie {
                value: value.to_string(),
                expiry,
            },
            same_cookie,
        );
        self
    }

    pub fn remove_cookie(&mut self, name: &str) -> &mut Self {
        self.cookie(name, "", 0)
    }

    /// 追加，不会替换已有内容
    pub fn body(&mut self, value: &str) -> &mut Self {
        self.body.push_str(value);
        self
    }

    pub fn body_json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<&mut Self, serde_json::Error> {
        let encoded = serde_json::to_string(value)?;
        Ok(self.body(&encoded))
    }

    pub fn status(&self) -> u16 {
        self.code
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| same_header(k, name))
            .map(|(_, v)| v.as_str())
    }

    pub fn cookies(&self) -> &[(String, Cookie)] {
        &self.cookies
    }

    pub fn get_cookie(&self, name: &str) -> Option<&Cookie> {
        self.cookies.iter().find(|(k, _)| same_cookie(k, name)).map(|(_, c)| c)
    }

    pub fn body_text(&self) -> &str {
        &self.body
    }

    /// 按 状态码 -> 头 -> cookie -> 消息体 的顺序写入宿主。
    ///
    /// 大多数传输层在消息体发出后不允许再修改头，顺序不可调换。
    pub fn send<S: Sink + ?Sized>(&self, sink: &mut S) -> anyhow::Result<()> {
        trace!(
            status = self.code,
            headers = self.headers.len(),
            cookies = self.cookies.len(),
            body_len = self.body.len(),
            "sending response"
        );
        sink.set_status(self.code)?;
        for (name, value) in &self.headers {
            sink.set_header(name, value)?;
        }
        for (name, cookie) in &self.cookies {
            sink.set_cookie(name, &cookie.value, cookie.expiry)?;
        }
        sink.write_body(self.body.as_bytes())?;
        Ok(())
    }
}
