pub mod payload;
pub mod token_error;
