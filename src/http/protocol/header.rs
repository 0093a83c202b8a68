pub const CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_LENGTH: &str = "Content-Length";
pub const COOKIE: &str = "Cookie";
pub const LOCATION: &str = "Location";
pub const SET_COOKIE: &str = "Set-Cookie";

/// 将任意格式的头名称转换为 `Title-Case-With-Hyphens`。
///
/// `content-type`、`CONTENT_TYPE` 和 `Content Type` 都会得到 `Content-Type`。
pub fn normalize(name: &str) -> String {
    name.trim()
        .split(['-', '_', ' '])
        .filter(|seg| !seg.is_empty())
        .map(|seg| {
            let lower = seg.to_ascii_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// CGI 环境变量到头名称：`HTTP_USER_AGENT` -> `User-Agent`。
///
/// `CONTENT_TYPE` 与 `CONTENT_LENGTH` 在 CGI 中没有 `HTTP_` 前缀，单独处理。
pub fn from_cgi_key(key: &str) -> Option<String> {
    if let Some(rest) = key.strip_prefix("HTTP_") {
        if rest.is_empty() {
            return None;
        }
        return Some(normalize(rest));
    }
    match key {
        "CONTENT_TYPE" => Some(CONTENT_TYPE.to_string()),
        "CONTENT_LENGTH" => Some(CONTENT_LENGTH.to_string()),
        _ => None,
    }
}
