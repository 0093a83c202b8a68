use std::collections::HashMap;

use crate::http::protocol::header;

/// 宿主环境提供的请求快照，`Request::new` 只读取一次。
///
/// `uri` 可以带查询串，`Request` 会自行拆分出路径。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    pub method: String,
    pub uri: String,
    pub headers: Vec<(String, String)>,
    pub cookies: HashMap<String, String>,
    pub body: String,
    pub remote_addr: Option<String>,
}

impl Environment {
    pub fn new(method: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            uri: uri.into(),
            ..Default::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_remote_addr(mut self, addr: impl Into<String>) -> Self {
        self.remote_addr = Some(addr.into());
        self
    }

    /// 从 CGI 风格的环境变量构造快照。
    ///
    /// 识别 `REQUEST_METHOD`、`REQUEST_URI`、`QUERY_STRING`、`REMOTE_ADDR`、
    /// `CONTENT_TYPE`、`CONTENT_LENGTH` 以及所有 `HTTP_*` 变量。
    /// `HTTP_COOKIE` 同时作为 `Cookie` 头保留，由 `Request` 解析。
    /// 请求体不在环境变量中，需要再调用 `with_body`。
    pub fn from_cgi<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut env = Environment::default();
        let mut query = None;

        for (key, value) in vars {
            let key = key.as_ref();
            let value = value.into();
            match key {
                "REQUEST_METHOD" => env.method = value,
                "REQUEST_URI" => env.uri = value,
                "QUERY_STRING" => query = Some(value),
                "REMOTE_ADDR" => env.remote_addr = Some(value),
                _ => {
                    if let Some(name) = header::from_cgi_key(key) {
                        env.headers.push((name, value));
                    }
                }
            }
        }

        // 部分网关的 REQUEST_URI 不带查询串
        if let Some(query) = query
            && !query.is_empty()
            && !env.uri.contains('?')
        {
            env.uri = format!("{}?{}", env.uri, query);
        }

        env
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cgi_maps_headers() {
        let env = Environment::from_cgi([
            ("REQUEST_METHOD", "GET"),
            ("REQUEST_URI", "/script"),
            ("QUERY_STRING", "a=1"),
            ("HTTP_CONTENT_TYPE", "text/html"),
            ("SERVER_NAME", "ignored"),
        ]);

        assert_eq!(env.method, "GET");
        assert_eq!(env.uri, "/script?a=1");
        assert_eq!(env.headers, vec![("Content-Type".to_string(), "text/html".to_string())]);
    }

    #[test]
    fn test_from_cgi_keeps_uri_query() {
        let env = Environment::from_cgi([
            ("REQUEST_URI", "/script?b=2"),
            ("QUERY_STRING", "b=2"),
        ]);
        assert_eq!(env.uri, "/script?b=2");
    }
}
