mod http;

pub use http::IoHttpController;
