use std::io::Write;

use chrono::DateTime;

use crate::http::protocol::{header, status};

/// 宿主传输层的输出能力，由 `Response::send` 按固定顺序调用。
pub trait Sink {
    fn set_status(&mut self, code: u16) -> anyhow::Result<()>;
    fn set_header(&mut self, name: &str, value: &str) -> anyhow::Result<()>;
    /// `expiry` 为 Unix 时间戳，0 表示会话 cookie
    fn set_cookie(&mut self, name: &str, value: &str, expiry: i64) -> anyhow::Result<()>;
    fn write_body(&mut self, body: &[u8]) -> anyhow::Result<()>;
}

/// 把响应渲染为 HTTP/1.1 报文写入任意 `Write`。
///
/// 写消息体前自动补上 `Content-Length`。
pub struct WireSink<W> {
    writer: W,
}

impl<W: Write> WireSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// IMF-fixdate，例如 `Sun, 06 Nov 1994 08:49:37 GMT`
fn http_date(timestamp: i64) -> Option<String> {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%a, %d %b %Y %H:%M:%S GMT").to_string())
}

impl<W: Write> Sink for WireSink<W> {
    fn set_status(&mut self, code: u16) -> anyhow::Result<()> {
        write!(self.writer, "HTTP/1.1 {} {}\r\n", code, status::reason_phrase(code))?;
        Ok(())
    }

    fn set_header(&mut self, name: &str, value: &str) -> anyhow::Result<()> {
        write!(self.writer, "{}: {}\r\n", name, value)?;
        Ok(())
    }

    fn set_cookie(&mut self, name: &str, value: &str, expiry: i64) -> anyhow::Result<()> {
        let encoded: String = form_urlencoded::byte_serialize(value.as_bytes()).collect();
        write!(self.writer, "{}: {}={}", header::SET_COOKIE, name, encoded)?;
        if expiry != 0
            && let Some(date) = http_date(expiry)
        {
            write!(self.writer, "; Expires={}", date)?;
        }
        self.writer.write_all(b"\r\n")?;
        Ok(())
    }

    fn write_body(&mut self, body: &[u8]) -> anyhow::Result<()> {
        write!(self.writer, "{}: {}\r\n\r\n", header::CONTENT_LENGTH, body.len())?;
        self.writer.write_all(body)?;
        self.writer.flush()?;
        Ok(())
    }
}
