//! Countdown computation
//!
//! Pure time-remaining decomposition and the clocks it is sampled from.
//! Scheduling lives in [`crate::tasks::countdown_ticker`].

pub mod clock;
pub mod remaining;

pub use clock::{Clock, ManualClock, SystemClock};
pub use remaining::{CountdownSnapshot, CountdownState, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE};
