use thiserror::Error;

/// `Router::run` 找不到任何匹配路由时返回。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no matching route for {method} {path}")]
pub struct RoutingError {
    pub method: String,
    pub path: String,
}

/// 请求输入不是合法的 JSON。
#[derive(Debug, Error)]
#[error("invalid JSON input: {0}")]
pub struct ParseError(#[from] pub serde_json::Error);
