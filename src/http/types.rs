use std::sync::Arc;

use crate::http::{req::Request, res::Response};

/// 路由处理器：接收请求、可变响应和按顺序捕获的路径片段。
///
/// 普通函数和闭包自动实现；绑定到对象的处理器用 `bound` 或 `fresh` 构造。
pub trait Handler<T>: Send + Sync {
    fn call(&self, req: &Request, res: &mut Response, params: &[String]) -> anyhow::Result<T>;
}

impl<T, F> Handler<T> for F
where
    F: Fn(&Request, &mut Response, &[String]) -> anyhow::Result<T> + Send + Sync,
{
    fn call(&self, req: &Request, res: &mut Response, params: &[String]) -> anyhow::Result<T> {
        self(req, res, params)
    }
}

/// 绑定到共享对象上的方法，每次分发都使用同一个实例。
pub struct Bound<C, M> {
    context: Arc<C>,
    method: M,
}

impl<T, C, M> Handler<T> for Bound<C, M>
where
    C: Send + Sync,
    M: Fn(&C, &Request, &mut Response, &[String]) -> anyhow::Result<T> + Send + Sync,
{
    fn call(&self, req: &Request, res: &mut Response, params: &[String]) -> anyhow::Result<T> {
        (self.method)(&self.context, req, res, params)
    }
}

/// 每次分发都先用工厂创建新实例，再调用其方法。
pub struct Fresh<F, M> {
    factory: F,
    method: M,
}

impl<T, C, F, M> Handler<T> for Fresh<F, M>
where
    F: Fn() -> C + Send + Sync,
    M: Fn(&mut C, &Request, &mut Response, &[String]) -> anyhow::Result<T> + Send + Sync,
{
    fn call(&self, req: &Request, res: &mut Response, params: &[String]) -> anyhow::Result<T> {
        let mut instance = (self.factory)();
        (self.method)(&mut instance, req, res, params)
    }
}

pub fn bound<C, M>(context: Arc<C>, method: M) -> Bound<C, M> {
    Bound { context, method }
}

pub fn fresh<F, M>(factory: F, method: M) -> Fresh<F, M> {
    Fresh { factory, method }
}
