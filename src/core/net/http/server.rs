use embassy_net::{Stack, tcp::TcpSocket};
use log::debug;

use super::{HttpResult, connection::HttpConnection};
use crate::config::HTTP;

pub(crate) trait HttpHandler {
    async fn handle_request(&self, conn: &mut HttpConnection<'_>) -> HttpResult;
}

/// Accept loop serving one connection at a time on its own socket.
///
/// Run several of these on the same port to serve clients in parallel.
pub(crate) struct HttpServer<'a, T: HttpHandler> {
    handler: &'a T,
}

impl<'a, T: HttpHandler> HttpServer<'a, T> {
    pub(crate) fn new(handler: &'a T) -> Self {
        Self { handler }
    }

    pub(crate) async fn listen_and_serve(
        &self,
        stack: Stack<'static>,
        port: u16,
        rx_buffer: &mut [u8],
        tx_buffer: &mut [u8],
    ) -> HttpResult {
        loop {
            let mut socket = TcpSocket::new(stack, rx_buffer, tx_buffer);
            socket.set_timeout(Some(HTTP.socket_timeout));

            if let Err(e) = socket.accept(port).await {
                debug!("http_server: accept error: {:?}", e);
                continue;
            }

            if let Err(e) = self.handle_connection(socket).await {
                debug!("http_server: connection error: {:?}", e);
            }
        }
    }

    async fn handle_connection(&self, socket: TcpSocket<'_>) -> HttpResult {
        let mut conn = HttpConnection::from_socket(socket).await?;
        self.handler.handle_request(&mut conn).await?;
        conn.close().await
    }
}
