use std::{collections::HashMap, sync::Arc};

use regex::Regex;
use tracing::{debug, warn};

use crate::http::{
    error::RoutingError,
    protocol::method::HttpMethod,
    req::Request,
    res::Response,
    types::Handler,
};

pub use regex::Error as PatternError;

/// 一条路由：编译后的模式与处理器
struct Route<T> {
    pattern: Regex,
    handler: Arc<dyn Handler<T>>,
}

impl<T> Route<T> {
    /// 模式只锚定开头，所以匹配的是路径前缀。
    fn compile(pattern: &str, handler: Arc<dyn Handler<T>>) -> Result<Self, PatternError> {
        Ok(Self {
            pattern: Regex::new(&format!("^(?:{})", pattern))?,
            handler,
        })
    }

    fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// 捕获组（不含整体匹配），未参与匹配的可选组为空字符串。
    fn captures(&self, path: &str) -> Option<Vec<String>> {
        let caps = self.pattern.captures(path)?;
        Some(
            caps.iter()
                .skip(1)
                .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect(),
        )
    }
}

/// 按注册顺序线性匹配的正则路由表。
///
/// 先扫描请求方法对应的序列，未命中再扫描 `ALL` 序列，第一个匹配者胜出。
/// 注册需要 `&mut self`，分发只需要 `&self`，所以注册完成后可以放进 `Arc`
/// 在多个线程间共享。路由器从不调用 `Response::send`。
pub struct Router<T = ()> {
    routes: HashMap<HttpMethod, Vec<Route<T>>>,
    all: Vec<Route<T>>,
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self {
            routes: HashMap::new(),
            all: Vec::new(),
        }
    }
}

impl<T> Router<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入路由，`method` 为 `None` 时进入 `ALL` 序列。
    pub fn insert<H>(
        &mut self,
        method: Option<HttpMethod>,
        pattern: &str,
        handler: H,
    ) -> Result<&mut Self, PatternError>
    where
        H: Handler<T> + 'static,
    {
        let route = Route::compile(pattern, Arc::new(handler))?;
        match method {
            Some(method) => self.routes.entry(method).or_default().push(route),
            None => self.all.push(route),
        }
        Ok(self)
    }

    pub fn route<H>(&mut self, method: HttpMethod, pattern: &str, handler: H) -> Result<&mut Self, PatternError>
    where
        H: Handler<T> + 'static,
    {
        self.insert(Some(method), pattern, handler)
    }

    pub fn get<H>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, PatternError>
    where
        H: Handler<T> + 'static,
    {
        self.route(HttpMethod::GET, pattern, handler)
    }

    pub fn post<H>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, PatternError>
    where
        H: Handler<T> + 'static,
    {
        self.route(HttpMethod::POST, pattern, handler)
    }

    pub fn put<H>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, PatternError>
    where
        H: Handler<T> + 'static,
    {
        self.route(HttpMethod::PUT, pattern, handler)
    }

    pub fn delete<H>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, PatternError>
    where
        H: Handler<T> + 'static,
    {
        self.route(HttpMethod::DELETE, pattern, handler)
    }

    pub fn all<H>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, PatternError>
    where
        H: Handler<T> + 'static,
    {
        self.insert(None, pattern, handler)
    }

    /// 分发请求并返回处理器的结果。
    ///
    /// 没有任何路由匹配时返回 `RoutingError`（可通过 `downcast_ref` 取出），
    /// 此时不会调用处理器，也不会修改响应。
    pub fn run(&self, req: &Request, res: &mut Response) -> anyhow::Result<T> {
        let method = HttpMethod::from_str(req.method());

        if let Some(routes) = method.and_then(|m| self.routes.get(&m))
            && let Some(result) = Self::dispatch(routes, req, res)
        {
            return result;
        }

        if !self.all.is_empty() {
            debug!(method = req.method(), path = req.path(), "falling back to ALL routes");
            if let Some(result) = Self::dispatch(&self.all, req, res) {
                return result;
            }
        }

        warn!(method = req.method(), path = req.path(), "no matching route");
        Err(RoutingError {
            method: req.method().to_string(),
            path: req.path().to_string(),
        }
        .into())
    }

    fn dispatch(routes: &[Route<T>], req: &Request, res: &mut Response) -> Option<anyhow::Result<T>> {
        for route in routes {
            if let Some(params) = route.captures(req.path()) {
                debug!(
                    method = req.method(),
                    path = req.path(),
                    pattern = route.pattern(),
                    captured = params.len(),
                    "route matched"
                );
                return Some(route.handler.call(req, res, &params));
            }
        }
        None
    }
}
