//! PixFlow - Event photo expiry countdowns
//!
//! Visitors of the PixFlow site see how long an event's photos remain
//! available. This library computes those countdowns and ties each running
//! countdown to the lifetime of the page view that displays it.

pub mod api;
pub mod config;
pub mod countdown;
pub mod error;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use countdown::{Clock, CountdownSnapshot, CountdownState, ManualClock, SystemClock};
pub use error::AppError;
pub use state::AppState;
pub use tasks::{start_countdown, CountdownHandle, TimerRegistry};
pub use utils::signals::shutdown_signal;
