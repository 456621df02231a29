//! # HTTP Server
//!
//! Combines the health and selector routers behind one CORS layer.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::catalog::{Catalog, CatalogResult};
use crate::config::SelectorConfig;
use crate::observability::{Event, Logger};

use super::config::HttpServerConfig;
use super::selector_routes::{health_routes, selector_routes, SelectorState};

/// HTTP server for the picker API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over `catalog` using `config.http` for binding
    pub fn new(config: SelectorConfig, catalog: Catalog) -> CatalogResult<Self> {
        let http = config.http.clone();
        let state = Arc::new(SelectorState::new(config, catalog)?);
        let router = Self::build_router(&http, state);
        Ok(Self {
            config: http,
            router,
        })
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, state: Arc<SelectorState>) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .merge(selector_routes(state))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> io::Result<()> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid socket address '{}': {}", self.config.socket_addr(), e),
            )
        })?;

        let addr_str = addr.to_string();
        Logger::info(Event::ServerStart, &[("addr", addr_str.as_str())]);

        let listener = TcpListener::bind(addr).await?;
        Logger::info(Event::Serving, &[("addr", addr_str.as_str())]);
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}
