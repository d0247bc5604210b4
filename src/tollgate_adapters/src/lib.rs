pub mod config;
pub mod http;
pub mod jwt;
pub mod telemetry;
