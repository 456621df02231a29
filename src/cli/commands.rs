//! CLI command implementations
//!
//! Each command loads configuration (defaults when `--config` is absent),
//! applies the configured log level and returns the JSON payload that
//! `run_command` writes to stdout.

use std::path::Path;

use serde_json::{json, Value};

use crate::catalog::Catalog;
use crate::config::SelectorConfig;
use crate::http_server::HttpServer;
use crate::key::{CompositeKey, EntityId};
use crate::selector::SelectorCandidate;
use crate::version::VersionName;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.config.as_deref(), cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(config_path: Option<&Path>, cmd: Command) -> CliResult<()> {
    let config = SelectorConfig::load_or_default(config_path)?;
    config.apply_logging();

    match cmd {
        Command::Encode { id, version } => write_response(encode(&config, id, &version)?),
        Command::Decode { token } => write_response(decode(&config, &token)?),
        Command::Selections {
            catalog,
            factory,
            factory_version,
            context,
        } => write_response(selections(
            &config,
            &catalog,
            factory,
            &factory_version,
            context.as_deref(),
        )?),
        Command::Candidates {
            catalog,
            term,
            scope,
        } => write_response(candidates(
            &config,
            &catalog,
            term.as_deref(),
            scope.as_deref(),
        )?),
        Command::Serve { catalog, port } => serve(config, &catalog, port),
    }
}

/// Encode an (id, version) pair
pub fn encode(config: &SelectorConfig, id: u64, version: &str) -> CliResult<Value> {
    let key = CompositeKey::new(EntityId::new(id), VersionName::new(version)?);
    let token = config.codec().encode(&key);
    Ok(json!({
        "token": token,
        "id": key.id(),
        "version": key.version(),
    }))
}

/// Decode a token into its (id, version) pair
pub fn decode(config: &SelectorConfig, token: &str) -> CliResult<Value> {
    let key = config.codec().decode(token)?;
    Ok(json!({
        "token": token,
        "id": key.id(),
        "version": key.version(),
    }))
}

/// Items linked to one factory version
///
/// Without `context` every linked version is listed, as an editor sees
/// them. With `context` each child appears once, resolved for that version.
pub fn selections(
    config: &SelectorConfig,
    catalog_path: &Path,
    factory: u64,
    factory_version: &str,
    context: Option<&str>,
) -> CliResult<Value> {
    let catalog = Catalog::load(catalog_path)?;
    let binding = catalog.items_binding(config)?;
    let factory_version = VersionName::new(factory_version)?;
    let parent = catalog.factory(EntityId::new(factory), &factory_version)?;
    let ctx = config.request_context();

    let rows = match context {
        Some(context) => {
            let context = VersionName::new(context)?;
            binding.selections_in_context(parent, &context, &ctx)?
        }
        None => binding.current_selections(parent, &ctx)?,
    };

    Ok(json!({
        "factory": parent.name,
        "relation": binding.relation(),
        "selections": candidate_pairs(&rows),
    }))
}

/// Item picker candidates
pub fn candidates(
    config: &SelectorConfig,
    catalog_path: &Path,
    term: Option<&str>,
    scope: Option<&str>,
) -> CliResult<Value> {
    let catalog = Catalog::load(catalog_path)?;
    let binding = catalog.items_binding(config)?;
    let rows = binding.candidate_list(term, scope, &config.request_context())?;

    Ok(json!({
        "selector": binding.selector().name(),
        "candidates": candidate_pairs(&rows),
    }))
}

/// Serve the picker API until the process is stopped
pub fn serve(mut config: SelectorConfig, catalog_path: &Path, port: Option<u16>) -> CliResult<()> {
    let catalog = Catalog::load(catalog_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }
    let server = HttpServer::new(config, catalog)?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Pickers consume `[token, label]` pairs
fn candidate_pairs(rows: &[SelectorCandidate]) -> Vec<[&str; 2]> {
    rows.iter()
        .map(|c| {
            let (token, label) = c.as_pair();
            [token, label]
        })
        .collect()
}
