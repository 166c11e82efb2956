use embassy_net::tcp::TcpSocket;
use embedded_io_async::Write as _;
use heapless::Vec;
use ledbtn_core::{Method, Request};

use super::{
    Error,
    HttpResult,
    headers::{
        ContentHeaders,
        ContentType,
        ResponseHeaders,
        Status,
        TargetWriter as _,
        read_heading,
    },
};

const HEADER_BUFFER_SIZE: usize = 512;
const STREAM_CHUNK_SIZE: usize = 1024;

/// HTTP connection context
///
/// Requests carry no body: only the request line is kept.
pub(crate) struct HttpConnection<'a> {
    request: Request,
    socket: TcpSocket<'a>,
    header_buf: Vec<u8, HEADER_BUFFER_SIZE>,
}

impl<'a> HttpConnection<'a> {
    /// Read the request heading from a freshly accepted socket.
    pub(crate) async fn from_socket(mut socket: TcpSocket<'a>) -> Result<Self, Error> {
        let mut header_buf = Vec::<u8, HEADER_BUFFER_SIZE>::new();
        header_buf
            .resize_default(HEADER_BUFFER_SIZE)
            .map_err(|()| Error::Overflow)?;
        let header_len = read_heading(header_buf.as_mut_slice(), &mut socket).await?;
        let request = Request::parse(&header_buf[..header_len]).ok_or(Error::Parse)?;

        Ok(Self {
            request,
            socket,
            header_buf,
        })
    }

    /// Request method and path, without the query string
    pub(crate) fn route(&self) -> (Method, &'_ str) {
        (self.request.method, self.request.path())
    }

    /// Raw query string, if the target has a usable one
    pub(crate) fn query(&self) -> Option<&'_ str> {
        self.request.query()
    }

    async fn write_headers(&mut self, headers: &ResponseHeaders) -> HttpResult {
        self.header_buf.clear();
        headers.write_to(&mut self.header_buf)?;
        self.socket.write_all(self.header_buf.as_slice()).await?;
        Ok(())
    }

    /// Write a complete response: headers, then the body in chunks
    pub(crate) async fn respond(
        &mut self,
        status: Status,
        content: ContentHeaders,
        body: &[u8],
    ) -> HttpResult {
        let headers = ResponseHeaders::new(status, content.with_length(body.len()));
        self.write_headers(&headers).await?;
        for chunk in body.chunks(STREAM_CHUNK_SIZE) {
            self.socket.write_all(chunk).await?;
        }
        self.socket.flush().await?;
        Ok(())
    }

    /// Write a `200 OK` with a pre-rendered JSON document
    pub(crate) async fn write_json(&mut self, body: &[u8]) -> HttpResult {
        self.respond(Status::Ok, ContentHeaders::new(ContentType::Json), body)
            .await
    }

    /// Gracefully close the connection once the response is out
    pub(crate) async fn close(mut self) -> HttpResult {
        self.socket.close();
        self.socket.flush().await?;
        Ok(())
    }
}
