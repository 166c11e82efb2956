//! HTTP listener task
//!
//! Each spawned instance owns one socket and its buffers; spawn
//! [`HTTP_LISTENERS`] of them to accept that many clients at once.

use embassy_net::Stack;
use log::error;

use crate::config::{HTTP, HTTP_LISTENERS};
use crate::controllers::IoHttpController;
use crate::core::net::http::HttpServer;

const RX_BUFFER_SIZE: usize = 4096;
const TX_BUFFER_SIZE: usize = 4096;

#[embassy_executor::task(pool_size = HTTP_LISTENERS)]
pub async fn http_server_task(
    stack: Stack<'static>,
    handler: &'static IoHttpController,
) {
    let server = HttpServer::new(handler);
    let mut rx_buffer = [0u8; RX_BUFFER_SIZE];
    let mut tx_buffer = [0u8; TX_BUFFER_SIZE];

    if let Err(e) = server
        .listen_and_serve(stack, HTTP.port, &mut rx_buffer, &mut tx_buffer)
        .await
    {
        error!("http_server: listener stopped: {:?}", e);
    }
}
