use std::collections::HashMap;

/// 解析 `application/x-www-form-urlencoded` 字符串。
///
/// 同名参数后者覆盖前者；没有 `=` 的键得到空字符串。
pub fn parse_pairs(pairs: &str) -> HashMap<String, String> {
    form_urlencoded::parse(pairs.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// 解析 `Cookie` 头：`user=alice; session=123`
pub fn parse_cookies(header_value: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for pair in header_value.split(';') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        if let Some((k, v)) = pair.split_once('=') {
            map.insert(k.trim().to_string(), v.trim().to_string());
        }
    }
    map
}
