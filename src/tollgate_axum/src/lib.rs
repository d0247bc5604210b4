pub mod adapters;
pub mod middleware;
pub mod rejection;

pub use adapters::AxumRequest;
pub use middleware::{apply, require_token};
pub use rejection::TokenRejection;
