//! Request handlers.

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{info, warn};

use wired_core::{DynModification, Modification};
use wired_device::assets::restore_backpack_assets;
use wired_device::SubmitStatus;

use crate::models::{ModSummary, StatusResponse};
use crate::state::ServerState;

fn success() -> Response {
    Json(StatusResponse::success()).into_response()
}

fn error(message: impl Into<String>) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(StatusResponse::error(message)),
    )
        .into_response()
}

fn content_type(headers: &HeaderMap) -> String {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// `GET /api/mods`: list registered mods.
pub async fn list_mods(State(state): State<ServerState>) -> Json<Vec<ModSummary>> {
    let mut summaries = Vec::with_capacity(state.registry.len());
    for handle in state.registry.all() {
        let m = handle.read().await;
        summaries.push(ModSummary {
            name: m.name().to_string(),
            description: m.description().to_string(),
            accepts: m.accepts().to_string(),
            restart_required: m.restart_required(),
            default: m.default_json(),
        });
    }
    Json(summaries)
}

/// `GET /api/mods/:name/current`: current materialized settings.
pub async fn current(State(state): State<ServerState>, Path(name): Path<String>) -> Response {
    let handle = match state.registry.find(&name) {
        Ok(handle) => handle,
        Err(err) => return error(err.to_string()),
    };
    let m = handle.read().await;
    let body = m.current().await;
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, m.accepts().to_string())],
        body,
    )
        .into_response()
}

/// `POST /api/mods/:name/save`: persist a new configuration.
pub async fn save(
    State(state): State<ServerState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    payload: String,
) -> Response {
    invoke(state, name, headers, payload, Invocation::Save).await
}

/// `POST /api/mods/:name/do`: apply an action.
pub async fn apply(
    State(state): State<ServerState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    payload: String,
) -> Response {
    invoke(state, name, headers, payload, Invocation::Apply).await
}

enum Invocation {
    Save,
    Apply,
}

async fn invoke(
    state: ServerState,
    name: String,
    headers: HeaderMap,
    payload: String,
    invocation: Invocation,
) -> Response {
    let handle = match state.registry.find(&name) {
        Ok(handle) => handle,
        Err(err) => return error(err.to_string()),
    };
    let content_type = content_type(&headers);

    let result = {
        let m = handle.read().await;
        match invocation {
            Invocation::Save => m.save(&content_type, &payload).await,
            Invocation::Apply => m.apply(&content_type, &payload).await,
        }
    };
    if let Err(err) = result {
        return error(err.to_string());
    }

    restart_if_required(&state, &handle).await;
    success()
}

/// Restart the platform when the invoked mod mandates it.
async fn restart_if_required(state: &ServerState, handle: &DynModification) {
    let (name, restart) = {
        let m = handle.read().await;
        (m.name().to_string(), m.restart_required())
    };
    if !restart {
        return;
    }
    info!(mod_name = %name, "mod requires restart, cycling platform services");
    if state.lifecycle.restart().await == SubmitStatus::Unconfirmed {
        warn!(mod_name = %name, "platform restart submitted but not confirmed");
    }
}

/// `POST /api/restart`: cycle the platform with no mutation.
pub async fn restart(State(state): State<ServerState>) -> Response {
    if state.lifecycle.restart().await == SubmitStatus::Unconfirmed {
        warn!("platform restart submitted but not confirmed");
    }
    success()
}

/// `POST /api/restore-backpack`: restore factory backpack assets.
pub async fn restore_backpack(State(state): State<ServerState>) -> Response {
    match restore_backpack_assets(&state.lifecycle, &state.root).await {
        Ok(()) => success(),
        Err(err) => error(err.to_string()),
    }
}
