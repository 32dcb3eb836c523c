//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    countdown::CountdownSnapshot,
    state::{Event, Photo, ViewKind, ViewSummary, CONTACT_ACK},
};

/// Event cards for the landing page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsResponse {
    pub events: Vec<Event>,
}

/// Event details with its gallery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventPageResponse {
    pub event: Event,
    pub photos: Vec<Photo>,
}

/// Response for a freshly opened landing page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeViewResponse {
    pub view: ViewSummary,
    /// Hero label, e.g. "Time remaining: 7d 0h 33m"
    pub label: String,
    pub featured: CountdownSnapshot,
    pub events: Vec<Event>,
}

/// Response for a freshly opened event detail page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventViewResponse {
    pub view: ViewSummary,
    pub label: String,
    pub event: Event,
    pub photos: Vec<Photo>,
}

/// Current countdown of an open view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewResponse {
    pub view: ViewSummary,
    pub label: String,
}

impl ViewResponse {
    pub fn new(view: ViewSummary) -> Self {
        Self {
            label: view_label(&view),
            view,
        }
    }
}

/// Display text for a view's countdown
pub fn view_label(view: &ViewSummary) -> String {
    match view.kind {
        ViewKind::Home => format!("Time remaining: {}", view.countdown.remaining),
        ViewKind::EventDetail { .. } => format!(
            "{} remaining to download these photos",
            view.countdown.remaining
        ),
    }
}

/// Contact form acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ContactResponse {
    pub fn sent() -> Self {
        Self {
            status: "sent".to_string(),
            message: CONTACT_ACK.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Service status with live timer accounting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub open_views: usize,
    pub active_timers: usize,
    pub contact_messages: usize,
    pub expiry_days: u64,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
