//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::info;

use crate::{
    error::AppResult,
    state::{AppState, ContactForm},
};
use super::responses::{
    view_label, ContactResponse, EventPageResponse, EventViewResponse, EventsResponse,
    HealthResponse, HomeViewResponse, StatusResponse, ViewResponse,
};

/// Handle GET /events - List event cards
pub async fn events_handler(State(state): State<Arc<AppState>>) -> Json<EventsResponse> {
    Json(EventsResponse {
        events: state.catalog.list().to_vec(),
    })
}

/// Handle GET /events/:slug - Event details and gallery
pub async fn event_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> AppResult<Json<EventPageResponse>> {
    let event = state.catalog.get(&slug)?.clone();
    Ok(Json(EventPageResponse {
        photos: event.photos(),
        event,
    }))
}

/// Handle POST /views/home - Open the landing page
pub async fn open_home_handler(
    State(state): State<Arc<AppState>>,
) -> AppResult<(StatusCode, Json<HomeViewResponse>)> {
    let (view, featured) = state.open_home_view()?;
    Ok((
        StatusCode::CREATED,
        Json(HomeViewResponse {
            label: view_label(&view),
            view,
            featured,
            events: state.catalog.list().to_vec(),
        }),
    ))
}

/// Handle POST /views/events/:slug - Open an event detail page
pub async fn open_event_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> AppResult<(StatusCode, Json<EventViewResponse>)> {
    let (view, event) = state.open_event_view(&slug)?;
    Ok((
        StatusCode::CREATED,
        Json(EventViewResponse {
            label: view_label(&view),
            view,
            photos: event.photos(),
            event,
        }),
    ))
}

/// Handle GET /views/:id - Current countdown of an open view
pub async fn view_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> AppResult<Json<ViewResponse>> {
    Ok(Json(ViewResponse::new(state.view(id)?)))
}

/// Handle DELETE /views/:id - Close a view and stop its countdown
pub async fn close_view_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> AppResult<Json<ViewResponse>> {
    let view = state.close_view(id).await?;
    Ok(Json(ViewResponse::new(view)))
}

/// Handle POST /contact - Accept a contact message
pub async fn contact_handler(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ContactForm>,
) -> AppResult<Json<ContactResponse>> {
    state.submit_contact(form)?;
    info!("Contact endpoint called - message accepted");
    Ok(Json(ContactResponse::sent()))
}

/// Handle GET /status - Return current service status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> AppResult<Json<StatusResponse>> {
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        open_views: state.open_view_count()?,
        active_timers: state.timers.active(),
        contact_messages: state.contact_count()?,
        expiry_days: state.expiry_days,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
