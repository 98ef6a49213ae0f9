pub mod handlers;
pub mod server_api;
