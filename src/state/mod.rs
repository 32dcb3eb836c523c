//! State management module
//!
//! This module contains the event catalog, open views and the application
//! state that owns them.

pub mod app_state;
pub mod contact;
pub mod events;
pub mod view_state;

// Re-export main types
pub use app_state::AppState;
pub use contact::{ContactForm, CONTACT_ACK};
pub use events::{Event, EventCatalog, Photo};
pub use view_state::{View, ViewKind, ViewSummary};
