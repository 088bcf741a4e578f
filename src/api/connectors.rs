//! Connector REST endpoints.
//!
//! Thin adapter over the registry's dispatch surface: parameter extraction,
//! status-code mapping, and credential persistence. All contract validation
//! happens in the registry.

use crate::credentials::CredentialStore;
use crate::error::HubError;
use crate::registry::Registry;
use crate::types::{ActionParams, ActionResult, ActionSpec, AuthField, Credentials, TriggerSpec};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Shared application state for the connector API
#[derive(Clone)]
pub struct ConnectorAppState {
    pub registry: Arc<Registry>,
    pub credential_store: Option<Arc<CredentialStore>>,
}

/// Connector summary (for the list endpoint)
#[derive(Serialize)]
pub struct ConnectorSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub brand_color: String,
    pub icon_url: String,
    pub configured: bool,
}

/// Full connector detail (for the single-connector endpoint)
#[derive(Serialize)]
pub struct ConnectorDetail {
    pub id: String,
    pub name: String,
    pub description: String,
    pub version: String,
    pub category: String,
    pub brand_color: String,
    pub website: String,
    pub icon_url: String,
    pub actions: Vec<ActionSpec>,
    pub auth_fields: Vec<AuthField>,
    pub triggers: Vec<TriggerSpec>,
    pub configured: bool,
}

#[derive(Serialize)]
pub struct ListConnectorsResponse {
    pub connectors: Vec<ConnectorSummary>,
}

#[derive(Serialize)]
pub struct ValidateAuthResponse {
    pub valid: bool,
}

#[derive(Serialize)]
pub struct CredentialsMutationResponse {
    pub success: bool,
}

/// Request body for POST /api/connectors/:id/actions/:action_id
#[derive(Deserialize, Default)]
pub struct ExecuteActionRequest {
    #[serde(default)]
    pub params: ActionParams,
    /// Inline credentials; stored credentials are used when absent.
    pub auth: Option<Credentials>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Create the connector API router
pub fn create_connector_router(state: ConnectorAppState) -> Router {
    Router::new()
        .route("/api/connectors", get(list_connectors))
        .route("/api/connectors/:id", get(get_connector))
        .route("/api/connectors/:id/validate", post(validate_auth))
        .route("/api/connectors/:id/credentials", post(store_credentials))
        .route("/api/connectors/:id/credentials", delete(delete_credentials))
        .route(
            "/api/connectors/:id/actions/:action_id",
            post(execute_action),
        )
        .with_state(Arc::new(state))
}

/// GET /api/connectors - List all registered connectors
async fn list_connectors(
    State(state): State<Arc<ConnectorAppState>>,
) -> Result<Json<ListConnectorsResponse>, AppError> {
    let configured = configured_ids(&state);

    let connectors = state
        .registry
        .list()
        .into_iter()
        .filter_map(|descriptor| {
            let connector = state.registry.get(&descriptor.id)?;
            Some(ConnectorSummary {
                configured: configured.contains(&descriptor.id),
                icon_url: connector.icon_url(),
                id: descriptor.id,
                name: descriptor.name,
                description: descriptor.description,
                category: descriptor.category,
                brand_color: descriptor.brand_color,
            })
        })
        .collect();

    Ok(Json(ListConnectorsResponse { connectors }))
}

/// GET /api/connectors/:id - Full metadata for one connector
async fn get_connector(
    State(state): State<Arc<ConnectorAppState>>,
    Path(id): Path<String>,
) -> Result<Json<ConnectorDetail>, AppError> {
    let connector = state
        .registry
        .get(&id)
        .ok_or(HubError::ConnectorNotFound(id))?;
    let descriptor = connector.descriptor();

    Ok(Json(ConnectorDetail {
        configured: configured_ids(&state).contains(&descriptor.id),
        icon_url: connector.icon_url(),
        actions: connector.actions(),
        auth_fields: connector.auth_fields(),
        triggers: connector.triggers(),
        id: descriptor.id,
        name: descriptor.name,
        description: descriptor.description,
        version: descriptor.version,
        category: descriptor.category,
        brand_color: descriptor.brand_color,
        website: descriptor.website,
    }))
}

/// POST /api/connectors/:id/validate - Check credentials against the service
async fn validate_auth(
    State(state): State<Arc<ConnectorAppState>>,
    Path(id): Path<String>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<ValidateAuthResponse>, AppError> {
    debug!(connector = %id, "Validating credentials");
    let valid = state.registry.dispatch_validate_auth(&id, &credentials).await?;
    Ok(Json(ValidateAuthResponse { valid }))
}

/// POST /api/connectors/:id/credentials - Validate, then store encrypted
///
/// Credentials that fail validation are rejected before anything is written.
async fn store_credentials(
    State(state): State<Arc<ConnectorAppState>>,
    Path(id): Path<String>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<CredentialsMutationResponse>, AppError> {
    let store = require_store(&state)?;

    let valid = state.registry.dispatch_validate_auth(&id, &credentials).await?;
    if !valid {
        return Err(AppError::BadRequest(
            "Credential validation failed".to_string(),
        ));
    }

    store.store(&id, &credentials).map_err(|e| {
        warn!(connector = %id, error = %e, "Failed to store credentials");
        AppError::Internal("Failed to store credentials".to_string())
    })?;

    info!(connector = %id, "Credentials stored");
    Ok(Json(CredentialsMutationResponse { success: true }))
}

/// DELETE /api/connectors/:id/credentials - Remove stored credentials
async fn delete_credentials(
    State(state): State<Arc<ConnectorAppState>>,
    Path(id): Path<String>,
) -> Result<Json<CredentialsMutationResponse>, AppError> {
    let store = require_store(&state)?;

    // 404 for unknown connector ids, even before touching the store
    if state.registry.get(&id).is_none() {
        return Err(HubError::ConnectorNotFound(id).into());
    }

    let deleted = store.delete(&id).map_err(|e| {
        warn!(connector = %id, error = %e, "Failed to delete credentials");
        AppError::Internal("Failed to delete credentials".to_string())
    })?;

    if !deleted {
        return Err(AppError::NotFound(format!(
            "No credentials stored for connector '{}'",
            id
        )));
    }

    info!(connector = %id, "Credentials deleted");
    Ok(Json(CredentialsMutationResponse { success: true }))
}

/// POST /api/connectors/:id/actions/:action_id - Execute a connector action
///
/// Uses inline `auth` from the body when supplied, otherwise falls back to
/// stored credentials for the connector.
async fn execute_action(
    State(state): State<Arc<ConnectorAppState>>,
    Path((id, action_id)): Path<(String, String)>,
    Json(body): Json<ExecuteActionRequest>,
) -> Result<Json<ActionResult>, AppError> {
    let auth = match body.auth {
        Some(auth) => auth,
        None => stored_credentials(&state, &id),
    };

    let result = state
        .registry
        .dispatch_execute_action(&id, &action_id, &body.params, &auth)
        .await?;
    Ok(Json(result))
}

fn require_store(state: &ConnectorAppState) -> Result<&Arc<CredentialStore>, AppError> {
    state.credential_store.as_ref().ok_or_else(|| {
        AppError::Internal("Credential storage not available".to_string())
    })
}

fn configured_ids(state: &ConnectorAppState) -> Vec<String> {
    match &state.credential_store {
        Some(store) => store.list().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to list stored credentials");
            vec![]
        }),
        None => vec![],
    }
}

fn stored_credentials(state: &ConnectorAppState, connector_id: &str) -> Credentials {
    let Some(store) = &state.credential_store else {
        return Credentials::new();
    };
    match store.get(connector_id) {
        Ok(Some(credentials)) => credentials,
        Ok(None) => Credentials::new(),
        Err(e) => {
            warn!(connector = %connector_id, error = %e, "Failed to load stored credentials");
            Credentials::new()
        }
    }
}

/// Application error types, mapped to HTTP status codes
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    BadGateway(String),
    Internal(String),
}

impl From<HubError> for AppError {
    fn from(e: HubError) -> Self {
        match e {
            HubError::ConnectorNotFound(_) => AppError::NotFound(e.to_string()),
            HubError::UnknownAction { .. } | HubError::MissingParameters { .. } => {
                AppError::BadRequest(e.to_string())
            }
            HubError::DuplicateConnector(_) => AppError::Conflict(e.to_string()),
            HubError::Transport(_) => AppError::BadGateway(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}
