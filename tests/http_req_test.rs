#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use regex_router::http::{env::Environment, error::ParseError, req::Request};
    use serde::Deserialize;

    fn cgi_request() -> Request {
        let env = Environment::from_cgi([
            ("REQUEST_METHOD", "GET"),
            ("REQUEST_URI", "/script.php"),
            ("REMOTE_ADDR", "127.0.0.1"),
            ("HTTP_CONTENT_TYPE", "text/html"),
            ("QUERY_STRING", "param1=123&param2=test"),
        ])
        .with_cookie("var", "test");
        Request::new(env)
    }

    #[test]
    fn test_method_and_path() {
        let req = cgi_request();
        assert_eq!(req.method(), "GET");
        assert_eq!(req.path(), "/script.php");
    }

    #[test]
    fn test_ip() {
        assert_eq!(cgi_request().ip(), Some("127.0.0.1"));
        assert_eq!(Request::new(Environment::new("GET", "/")).ip(), None);
    }

    #[test]
    fn test_header() {
        let req = cgi_request();
        assert_eq!(req.header("Content-Type"), Some("text/html"));
        assert_eq!(req.header("content-type"), Some("text/html"));
        assert_eq!(req.header("test"), None);

        let expected: HashMap<String, String> =
            [("Content-Type".to_string(), "text/html".to_string())].into();
        assert_eq!(req.headers(), &expected);
    }

    #[test]
    fn test_headers_are_normalized() {
        let req = Request::new(
            Environment::new("GET", "/")
                .with_header("x-request-id", "abc")
                .with_header("USER_AGENT", "curl"),
        );
        assert_eq!(req.headers().get("X-Request-Id").map(String::as_str), Some("abc"));
        assert_eq!(req.header("User-Agent"), Some("curl"));
    }

    #[test]
    fn test_cookie() {
        let req = cgi_request();
        assert_eq!(req.cookie("var"), Some("test"));
        assert_eq!(req.cookie("test"), None);

        let expected: HashMap<String, String> = [("var".to_string(), "test".to_string())].into();
        assert_eq!(req.cookies(), &expected);
    }

    #[test]
    fn test_cookie_header_is_parsed() {
        let req = Request::new(Environment::from_cgi([
            ("REQUEST_METHOD", "GET"),
            ("REQUEST_URI", "/"),
            ("HTTP_COOKIE", "user=alice; session=123"),
        ]));
        assert_eq!(req.cookie("user"), Some("alice"));
        assert_eq!(req.cookie("session"), Some("123"));
    }

    #[test]
    fn test_explicit_cookie_overrides_header() {
        let req = Request::new(
            Environment::new("GET", "/")
                .with_header("Cookie", "user=alice")
                .with_cookie("user", "bob"),
        );
        assert_eq!(req.cookie("user"), Some("bob"));
    }

    #[test]
    fn test_input() {
        assert_eq!(cgi_request().input(), "param1=123&param2=test");
    }

    #[test]
    fn test_param() {
        let req = cgi_request();
        assert_eq!(req.param("param1"), Some("123"));
        assert_eq!(req.param("param2"), Some("test"));
        assert_eq!(req.param("missing"), None);
    }

    #[test]
    fn test_params_idempotent() {
        let req = cgi_request();
        let first = req.params().clone();
        let second = req.params().clone();

        let expected: HashMap<String, String> = [
            ("param1".to_string(), "123".to_string()),
            ("param2".to_string(), "test".to_string()),
        ]
        .into();
        assert_eq!(first, expected);
        assert_eq!(first, second);
    }

    #[test]
    fn test_params_decode_form_encoding() {
        let req = Request::new(
            Environment::new("POST", "/form").with_body("name=G%26M&city=New+York&flag"),
        );
        assert_eq!(req.param("name"), Some("G&M"));
        assert_eq!(req.param("city"), Some("New York"));
        assert_eq!(req.param("flag"), Some(""));
    }

    #[test]
    fn test_param_json() {
        let req = Request::new(
            Environment::new("POST", "/tasks").with_body(r#"{"title":"write docs","done":false}"#),
        );
        let value = req.param_json().unwrap();
        assert_eq!(value["title"], "write docs");
        assert_eq!(value["done"], false);
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct NewTask {
        title: String,
    }

    #[test]
    fn test_param_json_as() {
        let req = Request::new(Environment::new("PUT", "/tasks/1").with_body(r#"{"title":"x"}"#));
        let task: NewTask = req.param_json_as().unwrap();
        assert_eq!(task, NewTask { title: "x".to_string() });
    }

    #[test]
    fn test_param_json_invalid() {
        let req = Request::new(Environment::new("POST", "/tasks").with_body("title=x"));
        let err: ParseError = req.param_json().unwrap_err();
        assert!(err.to_string().starts_with("invalid JSON input"));
        // 其他访问器不受影响
        assert_eq!(req.param("title"), Some("x"));
    }
}
