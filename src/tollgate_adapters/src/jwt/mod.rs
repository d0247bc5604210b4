pub mod decoder;

pub use decoder::{JwtDecoder, decode_token, process_request_token};
