pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routing;
pub mod server;
pub mod tenant;
