pub mod request_headers;

pub use request_headers::RequestHeaders;
