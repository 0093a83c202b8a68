use std::collections::HashMap;

use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;

use crate::http::{
    env::Environment,
    error::ParseError,
    params,
    protocol::{header, method::HttpMethod},
};

/// 入站请求的只读快照。
///
/// 构造时从 `Environment` 读取一次全部信息，之后不再访问宿主环境。
/// 表单参数在第一次调用 `param`/`params` 时解析并缓存。
#[derive(Debug, Clone)]
pub struct Request {
    method: String,
    path: String,
    headers: HashMap<String, String>,
    cookies: HashMap<String, String>,
    input: String,
    remote_addr: Option<String>,
    params: OnceCell<HashMap<String, String>>,
}

impl Request {
    pub fn new(env: Environment) -> Self {
        let Environment {
            method,
            uri,
            headers: raw_headers,
            cookies: explicit_cookies,
            body,
            remote_addr,
        } = env;

        let (path, query) = match uri.split_once('?') {
            Some((path, query)) => (path.to_string(), query.to_string()),
            None => (uri, String::new()),
        };

        let headers: HashMap<String, String> = raw_headers
            .into_iter()
            .map(|(name, value)| (header::normalize(&name), value))
            .collect();

        // Cookie 头先解析，显式提供的 cookie 优先
        let mut cookies = headers
            .get(header::COOKIE)
            .map(|s| params::parse_cookies(s))
            .unwrap_or_default();
        cookies.extend(explicit_cookies);

        let input = if HttpMethod::from_str(&method) == Some(HttpMethod::GET) {
            query
        } else {
            body
        };

        Self {
            method,
            path,
            headers,
            cookies,
            input,
            remote_addr,
            params: OnceCell::new(),
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// 不含查询串的 URI 路径
    pub fn path(&self) -> &str {
        &self.path
    }

    /// 头名称大小写不敏感：`content-type` 与 `Content-Type` 等价。
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&header::normalize(name)).map(String::as_str)
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn cookies(&self) -> &HashMap<String, String> {
        &self.cookies
    }

    /// GET 请求为查询串，其余方法为原始请求体。
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn ip(&self) -> Option<&str> {
        self.remote_addr.as_deref()
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params().get(name).map(String::as_str)
    }

    pub fn params(&self) -> &HashMap<String, String> {
        self.params.get_or_init(|| params::parse_pairs(&self.input))
    }

    pub fn param_json(&self) -> Result<serde_json::Value, ParseError> {
        self.param_json_as()
    }

    pub fn param_json_as<T: DeserializeOwned>(&self) -> Result<T, ParseError> {
        Ok(serde_json::from_str(&self.input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_parsed_once() {
        let req = Request::new(Environment::new("GET", "/search?q=rust"));
        assert!(req.params.get().is_none());

        let first = req.params() as *const _;
        let second = req.params() as *const _;
        assert_eq!(first, second);
        assert_eq!(req.param("q"), Some("rust"));
    }

    #[test]
    fn test_post_input_is_body() {
        let req = Request::new(Environment::new("POST", "/tasks?ignored=1").with_body("title=x"));
        assert_eq!(req.input(), "title=x");
        assert_eq!(req.param("ignored"), None);
        assert_eq!(req.path(), "/tasks");
    }
}
