//! Background tasks module
//!
//! This module contains the countdown tickers that run alongside the HTTP
//! server, one per open view.

pub mod countdown_ticker;
pub mod registry;

// Re-export main types
pub use countdown_ticker::{start_countdown, CountdownHandle};
pub use registry::TimerRegistry;
