mod http_server;

pub use http_server::http_server_task;
