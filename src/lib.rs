pub mod config;
pub mod routers;
pub mod server;
