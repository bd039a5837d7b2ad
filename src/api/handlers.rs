//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{debug, error, info};

use crate::{
    celestial::{format_orbital_period, BODIES, COMETS, SPACECRAFT},
    state::{AppState, SceneFrame},
};
use super::responses::{
    BodiesResponse, BodyInfo, DisplayModeResponse, HealthResponse, PointerRequest,
    StatusResponse, TimerActionResponse, ViewportRequest, ViewportResponse,
};

fn internal_error(context: &str, e: String) -> StatusCode {
    error!("{}: {}", context, e);
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Handle POST /toggle - Start, resume or pause the countdown
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerActionResponse>, StatusCode> {
    let (timer, entry) = state.toggle()
        .map_err(|e| internal_error("Failed to toggle timer", e))?;
    info!("Toggle endpoint called - timer is now {:?}", timer.status);
    Ok(Json(TimerActionResponse::new(&timer, entry)))
}

/// Handle POST /reset - Return the countdown to idle
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerActionResponse>, StatusCode> {
    let (timer, entry) = state.reset()
        .map_err(|e| internal_error("Failed to reset timer", e))?;
    info!("Reset endpoint called");
    Ok(Json(TimerActionResponse::new(&timer, entry)))
}

/// Handle GET /status - Timer, log and display mode
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = state.get_timer_state()
        .map_err(|e| internal_error("Failed to get timer state", e))?;
    let log = state.get_log()
        .map_err(|e| internal_error("Failed to get status log", e))?;
    let display_mode = state.get_display_mode()
        .map_err(|e| internal_error("Failed to get display mode", e))?;

    Ok(Json(StatusResponse {
        status: timer.status,
        seconds_remaining: timer.seconds_remaining,
        duration_seconds: timer.duration_seconds,
        display_time: timer.display_time(),
        display_mode,
        log,
        uptime: state.get_uptime(),
    }))
}

/// Handle GET /scene - Current frame of the celestial backdrop
pub async fn scene_handler(State(state): State<Arc<AppState>>) -> Result<Json<SceneFrame>, StatusCode> {
    state.scene_frame()
        .map(Json)
        .map_err(|e| internal_error("Failed to read scene clock", e))
}

/// Handle POST /viewport - Container resize
pub async fn viewport_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ViewportRequest>,
) -> Result<Json<ViewportResponse>, StatusCode> {
    let viewport = state.resize_viewport(request.width, request.height)
        .map_err(|e| internal_error("Failed to resize viewport", e))?;
    Ok(Json(ViewportResponse { viewport }))
}

/// Handle POST /pointer - Parallax input
pub async fn pointer_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PointerRequest>,
) -> Result<StatusCode, StatusCode> {
    debug!("Pointer at ({:.3}, {:.3})", request.x, request.y);
    state.set_pointer(request.x, request.y)
        .map_err(|e| internal_error("Failed to set pointer", e))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handle POST /display-mode - Toggle light/dark
pub async fn display_mode_handler(State(state): State<Arc<AppState>>) -> Result<Json<DisplayModeResponse>, StatusCode> {
    let display_mode = state.toggle_display_mode()
        .map_err(|e| internal_error("Failed to toggle display mode", e))?;
    Ok(Json(DisplayModeResponse { display_mode }))
}

/// Handle GET /bodies - Static reference table
pub async fn bodies_handler() -> Json<BodiesResponse> {
    Json(BodiesResponse {
        bodies: BODIES
            .iter()
            .map(|body| BodyInfo {
                body: *body,
                period_display: format_orbital_period(body.orbital_period_hours),
            })
            .collect(),
        comets: COMETS.to_vec(),
        spacecraft: SPACECRAFT,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
