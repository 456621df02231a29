//! # HTTP Server Module
//!
//! A JSON surface over the selector and binding for remote pickers.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/keys/:token` - Token decoding
//! - `/selectors/items` - Item picker candidates
//! - `/factories/:id/items` - Items linked to a factory

pub mod config;
pub mod selector_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use selector_routes::SelectorState;
pub use server::HttpServer;
