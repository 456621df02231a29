//! Selector HTTP Routes
//!
//! Read-only picker endpoints over the demo catalog:
//!
//! - `GET /health`
//! - `GET /keys/:token` - decode a composite key token
//! - `GET /selectors/items?keyword=&scope=` - picker candidates
//! - `GET /selectors/items/index?keyword=&scope=` - index columns per candidate
//! - `GET /factories/:id/items?version=&context=` - current selections

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::binding::BindingError;
use crate::catalog::{Catalog, CatalogError, CatalogResult, ItemBinding};
use crate::config::SelectorConfig;
use crate::key::{EntityId, MalformedTokenError};
use crate::relation::RelationResolutionError;
use crate::repository::RepositoryError;
use crate::selector::{SearchError, SelectorCandidate};
use crate::version::{VersionError, VersionName};

// ==================
// Shared State
// ==================

/// Catalog and binding shared across handlers
pub struct SelectorState {
    pub config: SelectorConfig,
    pub catalog: Catalog,
    pub binding: ItemBinding,
}

impl SelectorState {
    pub fn new(config: SelectorConfig, catalog: Catalog) -> CatalogResult<Self> {
        let binding = catalog.items_binding(&config)?;
        Ok(Self {
            config,
            catalog,
            binding,
        })
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct KeyResponse {
    pub token: String,
    pub id: EntityId,
    pub version: VersionName,
}

#[derive(Debug, Default, Deserialize)]
pub struct CandidateQuery {
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CandidatesResponse {
    pub selector: String,
    pub candidates: Vec<SelectorCandidate>,
}

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub selector: String,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SelectionsQuery {
    /// Factory version; the default version when absent
    #[serde(default)]
    pub version: Option<String>,
    /// Browse as this version instead of listing every linked version
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SelectionsResponse {
    pub factory: String,
    pub relation: &'static str,
    pub selections: Vec<SelectorCandidate>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, code: &'static str, error: impl ToString) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            code,
        }),
    )
}

// ==================
// Routes
// ==================

/// Health check route
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

/// Create selector routes
pub fn selector_routes(state: Arc<SelectorState>) -> Router {
    Router::new()
        .route("/keys/:token", get(decode_key_handler))
        .route("/selectors/items", get(candidates_handler))
        .route("/selectors/items/index", get(index_handler))
        .route("/factories/:id/items", get(selections_handler))
        .with_state(state)
}

// ==================
// Error Mapping
// ==================

fn repository_status(e: &RepositoryError) -> StatusCode {
    match e {
        RepositoryError::Timeout | RepositoryError::DeadlineExceeded => {
            StatusCode::GATEWAY_TIMEOUT
        }
        RepositoryError::Unavailable(_) | RepositoryError::Cancelled => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        RepositoryError::UnknownRelation(_) | RepositoryError::DuplicateRow(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn binding_status(e: &BindingError) -> StatusCode {
    match e {
        BindingError::Token(_) => StatusCode::BAD_REQUEST,
        BindingError::Candidates(SearchError::UnknownScope { .. }) => StatusCode::BAD_REQUEST,
        BindingError::Candidates(SearchError::Repository { source, .. }) => {
            repository_status(source)
        }
        BindingError::Selections(RelationResolutionError::UnknownRelation { .. }) => {
            StatusCode::BAD_REQUEST
        }
        BindingError::Selections(RelationResolutionError::Repository { source, .. }) => {
            repository_status(source)
        }
        BindingError::Selections(_) | BindingError::UnboundRelation(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<BindingError> for (StatusCode, Json<ErrorResponse>) {
    fn from(e: BindingError) -> Self {
        api_error(binding_status(&e), e.code(), &e)
    }
}

fn malformed(e: MalformedTokenError) -> ApiError {
    api_error(StatusCode::BAD_REQUEST, e.code(), &e)
}

fn invalid_version(e: VersionError) -> ApiError {
    api_error(StatusCode::BAD_REQUEST, e.code(), &e)
}

fn factory_id(raw: &str) -> Result<EntityId, ApiError> {
    raw.parse::<u64>().map(EntityId::new).map_err(|_| {
        api_error(
            StatusCode::BAD_REQUEST,
            "VSEL_INVALID_FACTORY_ID",
            format!("invalid factory id '{}'", raw),
        )
    })
}

fn catalog_error(e: CatalogError) -> ApiError {
    let status = match &e {
        CatalogError::UnknownFactory { .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    api_error(status, e.code(), &e)
}

// ==================
// Handlers
// ==================

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

async fn decode_key_handler(
    State(state): State<Arc<SelectorState>>,
    Path(token): Path<String>,
) -> Result<Json<KeyResponse>, ApiError> {
    let key = state
        .binding
        .selector()
        .decode(&token)
        .map_err(malformed)?;
    let (id, version) = key.into_parts();

    Ok(Json(KeyResponse { token, id, version }))
}

async fn candidates_handler(
    State(state): State<Arc<SelectorState>>,
    Query(query): Query<CandidateQuery>,
) -> Result<Json<CandidatesResponse>, ApiError> {
    let ctx = state.config.request_context();
    let candidates = state.binding.candidate_list(
        query.keyword.as_deref(),
        query.scope.as_deref(),
        &ctx,
    )?;

    Ok(Json(CandidatesResponse {
        selector: state.binding.selector().name().to_string(),
        candidates,
    }))
}

async fn index_handler(
    State(state): State<Arc<SelectorState>>,
    Query(query): Query<CandidateQuery>,
) -> Result<Json<IndexResponse>, ApiError> {
    let selector = state.binding.selector();
    let ctx = state.config.request_context();
    let rows = selector
        .search_rows(query.keyword.as_deref(), query.scope.as_deref(), &ctx)
        .map_err(BindingError::from)?;

    let rows = rows
        .iter()
        .map(|row| {
            selector
                .index_row(row)
                .into_iter()
                .map(|(_, value)| value)
                .collect()
        })
        .collect();

    Ok(Json(IndexResponse {
        selector: selector.name().to_string(),
        columns: selector.index_attr_names(),
        rows,
    }))
}

async fn selections_handler(
    State(state): State<Arc<SelectorState>>,
    Path(id): Path<String>,
    Query(query): Query<SelectionsQuery>,
) -> Result<Json<SelectionsResponse>, ApiError> {
    let id = factory_id(&id)?;
    let version = VersionName::new(query.version.unwrap_or_default()).map_err(invalid_version)?;
    let factory = state
        .catalog
        .factory(id, &version)
        .map_err(catalog_error)?;
    let ctx = state.config.request_context();

    let selections = match query.context {
        Some(context) => {
            let context = VersionName::new(context).map_err(invalid_version)?;
            state.binding.selections_in_context(factory, &context, &ctx)?
        }
        None => state.binding.current_selections(factory, &ctx)?,
    };

    Ok(Json(SelectionsResponse {
        factory: factory.name.clone(),
        relation: state.binding.relation(),
        selections,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_id_must_be_numeric() {
        assert_eq!(factory_id("12").unwrap(), EntityId::new(12));

        let (status, Json(body)) = factory_id("abc").unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "VSEL_INVALID_FACTORY_ID");
    }

    #[test]
    fn test_timeouts_map_to_gateway_timeout() {
        let e = BindingError::Candidates(SearchError::Repository {
            resource: "ItemSelector".into(),
            source: RepositoryError::DeadlineExceeded,
        });
        assert_eq!(binding_status(&e), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn test_unavailable_maps_to_service_unavailable() {
        let e = BindingError::Selections(RelationResolutionError::Repository {
            relation: "items".into(),
            source: RepositoryError::Unavailable("down".into()),
        });
        assert_eq!(binding_status(&e), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_inconsistent_store_is_internal_error() {
        let e = BindingError::Selections(RelationResolutionError::DanglingLink {
            relation: "items".into(),
            child: EntityId::new(3),
        });
        assert_eq!(binding_status(&e), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_unknown_scope_is_bad_request() {
        let e = BindingError::Candidates(SearchError::UnknownScope {
            resource: "ItemSelector".into(),
            scope: "archived".into(),
        });
        assert_eq!(binding_status(&e), StatusCode::BAD_REQUEST);
    }
}
