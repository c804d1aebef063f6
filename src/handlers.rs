use crate::client::PublicityClient;
use crate::config::Config;
use crate::errors::AppError;
use crate::models::{NormalizedResult, SearchRequest};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration (credentials, default requester).
    pub config: Config,
    /// Client for the AADE publicity service.
    pub client: PublicityClient,
}

/// Query parameters accepted by [`get_company`].
#[derive(Debug, Default, Deserialize)]
pub struct CompanyQueryParams {
    /// Overrides `AADE_CALLED_BY` for this lookup.
    pub called_by: Option<String>,
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "aade-publicity",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// GET /api/v1/companies/:afm
///
/// Runs one publicity lookup with the configured credentials. AADE business
/// errors come back as 200 with `has_errors = true`.
pub async fn get_company(
    State(state): State<Arc<AppState>>,
    Path(afm): Path<String>,
    Query(params): Query<CompanyQueryParams>,
) -> Result<Json<NormalizedResult>, AppError> {
    tracing::info!("GET /api/v1/companies/{} - params: {:?}", afm, params);

    let mut search = SearchRequest::new(afm, state.config.credentials());
    search.requester_id = params
        .called_by
        .filter(|id| !id.trim().is_empty())
        .or_else(|| state.config.aade_called_by.clone());

    let result = state.client.search(&search).await?;
    Ok(Json(result))
}
