// -----------------------------
// 通用方法宏生成器（内部使用）
// -----------------------------
#[macro_export]
macro_rules! make_method_macro {
    ($method:expr, $pattern:expr, $handler:expr) => {
        ($method, $pattern, $handler)
    };
}

// -----------------------------
// HTTP 方法宏
// -----------------------------
#[macro_export]
macro_rules! get {
    ($pattern:expr, $handler:expr) => {
        $crate::make_method_macro!(
            Some($crate::http::protocol::method::HttpMethod::GET),
            $pattern,
            $handler
        )
    };
}

#[macro_export]
macro_rules! post {
    ($pattern:expr, $handler:expr) => {
        $crate::make_method_macro!(
            Some($crate::http::protocol::method::HttpMethod::POST),
            $pattern,
            $handler
        )
    };
}

#[macro_export]
macro_rules! put {
    ($pattern:expr, $handler:expr) => {
        $crate::make_method_macro!(
            Some($crate::http::protocol::method::HttpMethod::PUT),
            $pattern,
            $handler
        )
    };
}

#[macro_export]
macro_rules! delete {
    ($pattern:expr, $handler:expr) => {
        $crate::make_method_macro!(
            Some($crate::http::protocol::method::HttpMethod::DELETE),
            $pattern,
            $handler
        )
    };
}

// -----------------------------
// 全局 all! 宏：进入 ALL 序列
// -----------------------------
#[macro_export]
macro_rules! all {
    ($pattern:expr, $handler:expr) => {
        $crate::make_method_macro!(None, $pattern, $handler)
    };
}

// -----------------------------
// route! 宏：按书写顺序注册，返回 Result<(), PatternError>
// -----------------------------
#[macro_export]
macro_rules! route {
    ($router:expr, $($entry:expr),+ $(,)?) => {
        (|| -> ::std::result::Result<(), $crate::http::router::PatternError> {
            $(
                let (method, pattern, handler) = $entry;
                $router.insert(method, pattern, handler)?;
            )+
            Ok(())
        })()
    };
}
