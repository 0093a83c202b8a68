//! 基于正则表达式的 HTTP 请求分发器。
//!
//! 调用方从宿主环境构造 [`http::env::Environment`]，再得到只读的
//! [`http::req::Request`] 和空的 [`http::res::Response`]，交给
//! [`http::router::Router::run`] 分发。路由器只负责匹配和调用处理器，
//! 最终通过 [`http::res::Response::send`] 写入宿主由调用方完成。

pub mod http;
