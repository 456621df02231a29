//! Configuration
//!
//! A single JSON file, every field optional:
//!
//! ```json
//! {
//!   "key_encoding": "separated",
//!   "match_mode": "substring",
//!   "context_fallback": "highest_priority",
//!   "max_candidates": 50,
//!   "request_timeout_ms": 2000,
//!   "log_level": "info",
//!   "http": { "host": "127.0.0.1", "port": 7410, "cors_origins": [] }
//! }
//! ```

mod errors;
mod selector_config;

pub use errors::{ConfigError, ConfigResult};
pub use selector_config::SelectorConfig;
