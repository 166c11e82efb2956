use core::fmt::{self, Write};

use embassy_net::tcp::{Error as TcpError, TcpSocket};

/// Status codes this server answers with.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Status {
    Ok,
    NotFound,
}

impl Status {
    fn line(self) -> &'static str {
        match self {
            Status::Ok => "200 OK",
            Status::NotFound => "404 Not Found",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum ContentType {
    Json,
    TextHtml,
    TextPlain,
}

impl ContentType {
    fn as_str(self) -> &'static str {
        match self {
            ContentType::Json => "application/json",
            ContentType::TextHtml => "text/html",
            ContentType::TextPlain => "text/plain",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum TextEncoding {
    Utf8,
}

pub(super) trait TargetWriter {
    fn write_to(&self, writer: &mut impl Write) -> fmt::Result;
}

/// Body description: type, optional charset and length.
pub(crate) struct ContentHeaders {
    content_type: ContentType,
    content_length: usize,
    text_encoding: Option<TextEncoding>,
}

impl ContentHeaders {
    pub(crate) const fn new(content_type: ContentType) -> Self {
        Self {
            content_type,
            content_length: 0,
            text_encoding: None,
        }
    }

    #[must_use]
    pub(crate) const fn with_length(mut self, length: usize) -> Self {
        self.content_length = length;
        self
    }

    #[must_use]
    pub(crate) const fn with_text_encoding(mut self, text_encoding: TextEncoding) -> Self {
        self.text_encoding = Some(text_encoding);
        self
    }
}

impl TargetWriter for ContentHeaders {
    fn write_to(&self, writer: &mut impl Write) -> fmt::Result {
        write!(writer, "Content-Type: {}", self.content_type.as_str())?;
        if let Some(TextEncoding::Utf8) = self.text_encoding {
            writer.write_str("; charset=utf-8")?;
        }
        write!(writer, "\r\nContent-Length: {}\r\n", self.content_length)
    }
}

/// Status line plus headers. Every response closes the connection.
pub(crate) struct ResponseHeaders {
    status: Status,
    content: ContentHeaders,
}

impl ResponseHeaders {
    pub(crate) const fn new(status: Status, content: ContentHeaders) -> Self {
        Self { status, content }
    }
}

impl TargetWriter for ResponseHeaders {
    fn write_to(&self, writer: &mut impl Write) -> fmt::Result {
        write!(writer, "HTTP/1.1 {}\r\n", self.status.line())?;
        self.content.write_to(writer)?;
        writer.write_str("Connection: close\r\n\r\n")
    }
}

/// Read the start line and headers from the socket.
///
/// Returns the number of bytes read. Reading stops at the blank line ending
/// the headers, when the peer stops sending, or when `buf` is full.
pub(super) async fn read_heading(
    buf: &mut [u8],
    socket: &mut TcpSocket<'_>,
) -> Result<usize, TcpError> {
    let mut header_len = 0;
    while header_len < buf.len() {
        let n = socket.read(&mut buf[header_len..]).await?;
        if n == 0 {
            break;
        }
        header_len += n;
        if let Some(pos) = buf[..header_len].windows(4).position(|w| w == b"\r\n\r\n") {
            return Ok(pos + 4);
        }
    }

    Ok(header_len)
}
