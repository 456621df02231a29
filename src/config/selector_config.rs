//! SelectorConfig - file-backed settings for codec, search and resolution

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::context::RequestContext;
use crate::http_server::HttpServerConfig;
use crate::key::{KeyCodec, KeyEncoding};
use crate::observability::{Event, Logger, Severity};
use crate::relation::ContextFallback;
use crate::selector::MatchMode;

use super::errors::{ConfigError, ConfigResult};

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Token layout shared by selectors and bindings (default: separated)
    #[serde(default)]
    pub key_encoding: KeyEncoding,

    /// Search term comparison (default: substring)
    #[serde(default)]
    pub match_mode: MatchMode,

    /// Contextual resolution fallback (default: highest_priority)
    #[serde(default)]
    pub context_fallback: ContextFallback,

    /// Candidate list cap; unlimited when absent
    #[serde(default)]
    pub max_candidates: Option<usize>,

    /// Per-request deadline; none when absent
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,

    /// Minimum logged severity (default: info)
    #[serde(default = "default_log_level")]
    pub log_level: Severity,

    #[serde(default)]
    pub http: HttpServerConfig,
}

fn default_log_level() -> Severity {
    Severity::Info
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            key_encoding: KeyEncoding::default(),
            match_mode: MatchMode::default(),
            context_fallback: ContextFallback::default(),
            max_candidates: None,
            request_timeout_ms: None,
            log_level: default_log_level(),
            http: HttpServerConfig::default(),
        }
    }
}

impl SelectorConfig {
    /// Load and validate configuration from a file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&content)?;

        let path_str = path.display().to_string();
        Logger::info(
            Event::ConfigLoaded,
            &[
                ("path", path_str.as_str()),
                ("key_encoding", config.key_encoding.as_str()),
                ("context_fallback", config.context_fallback.as_str()),
            ],
        );
        Ok(config)
    }

    /// Load from an optional path, falling back to defaults
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: SelectorConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_candidates == Some(0) {
            return Err(ConfigError::Invalid("max_candidates must be > 0".into()));
        }
        if self.request_timeout_ms == Some(0) {
            return Err(ConfigError::Invalid("request_timeout_ms must be > 0".into()));
        }
        if self.http.host.trim().is_empty() {
            return Err(ConfigError::Invalid("http.host must not be empty".into()));
        }
        Ok(())
    }

    /// Codec built from `key_encoding`
    pub fn codec(&self) -> KeyCodec {
        KeyCodec::new(self.key_encoding)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    /// Fresh request context carrying the configured deadline
    pub fn request_context(&self) -> RequestContext {
        RequestContext::with_optional_timeout(self.request_timeout())
    }

    /// Applies `log_level` to the process-wide logger
    pub fn apply_logging(&self) {
        Logger::set_min_severity(self.log_level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = SelectorConfig::from_json("{}").unwrap();
        assert_eq!(config, SelectorConfig::default());
        assert_eq!(config.codec(), KeyCodec::default());
        assert_eq!(config.log_level, Severity::Info);
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_all_fields_parse() {
        let config = SelectorConfig::from_json(
            r#"{
                "key_encoding": "length_prefixed",
                "match_mode": "prefix",
                "context_fallback": "exclude",
                "max_candidates": 5,
                "request_timeout_ms": 250,
                "log_level": "warn",
                "http": { "port": 9000 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.key_encoding, KeyEncoding::LengthPrefixed);
        assert_eq!(config.match_mode, MatchMode::Prefix);
        assert_eq!(config.context_fallback, ContextFallback::Exclude);
        assert_eq!(config.max_candidates, Some(5));
        assert_eq!(config.request_timeout(), Some(Duration::from_millis(250)));
        assert_eq!(config.log_level, Severity::Warn);
        assert_eq!(config.http.port, 9000);
        assert_eq!(config.http.host, HttpServerConfig::default().host);
    }

    #[test]
    fn test_zero_limits_rejected() {
        let err = SelectorConfig::from_json(r#"{"max_candidates": 0}"#).unwrap_err();
        assert_eq!(err.code(), "VSEL_CONFIG_INVALID");

        let err = SelectorConfig::from_json(r#"{"request_timeout_ms": 0}"#).unwrap_err();
        assert_eq!(err.code(), "VSEL_CONFIG_INVALID");
    }

    #[test]
    fn test_unknown_encoding_rejected() {
        let err = SelectorConfig::from_json(r#"{"key_encoding": "dashes"}"#).unwrap_err();
        assert_eq!(err.code(), "VSEL_CONFIG_PARSE");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"context_fallback": "default_version"}}"#).unwrap();

        let config = SelectorConfig::load(file.path()).unwrap();
        assert_eq!(config.context_fallback, ContextFallback::DefaultVersion);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SelectorConfig::load(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.code(), "VSEL_CONFIG_READ");
    }

    #[test]
    fn test_request_context_carries_deadline() {
        let config = SelectorConfig::from_json(r#"{"request_timeout_ms": 60000}"#).unwrap();
        let ctx = config.request_context();
        assert!(ctx.check().is_ok());
    }
}
