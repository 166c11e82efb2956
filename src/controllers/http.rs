use ledbtn_core::Method;

use crate::{
    core::net::http::{
        ContentHeaders,
        ContentType,
        HttpConnection,
        HttpHandler,
        HttpResult,
        Status,
        TextEncoding,
    },
    infrastructure::types::IoServiceImpl,
};

/// Routes the panel endpoints to the I/O service.
///
/// The four panel endpoints always answer `200`; anything else is a `404`.
pub struct IoHttpController {
    service: &'static IoServiceImpl,
}

impl IoHttpController {
    pub fn new(service: &'static IoServiceImpl) -> Self {
        Self { service }
    }
}

impl HttpHandler for IoHttpController {
    async fn handle_request(&self, conn: &mut HttpConnection<'_>) -> HttpResult {
        match conn.route() {
            (Method::Get, "/") => {
                let content = ContentHeaders::new(ContentType::TextHtml)
                    .with_text_encoding(TextEncoding::Utf8);
                conn.respond(Status::Ok, content, self.service.serve_page())
                    .await
            }
            (Method::Get, "/state") => {
                let state = self.service.read_state();
                conn.write_json(&state).await
            }
            (Method::Get, "/set") => {
                let state = self.service.set_output(conn.query());
                conn.write_json(&state).await
            }
            (Method::Get, "/all") => {
                let state = self.service.set_all_outputs(conn.query());
                conn.write_json(&state).await
            }
            _ => {
                let content = ContentHeaders::new(ContentType::TextPlain);
                conn.respond(Status::NotFound, content, b"Not Found").await
            }
        }
    }
}
