//! Open views and the countdown each one owns

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{countdown::CountdownSnapshot, tasks::CountdownHandle};

/// Which page a view renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum ViewKind {
    /// Landing page with the hero countdown
    Home,
    /// Event detail page counting down to photo expiry
    EventDetail { slug: String },
}

/// A page a visitor has open. Holds the only handle to its countdown.
#[derive(Debug)]
pub struct View {
    pub id: u64,
    pub kind: ViewKind,
    pub opened_at: DateTime<Utc>,
    pub countdown: CountdownHandle,
}

impl View {
    pub fn summary(&self) -> ViewSummary {
        ViewSummary {
            id: self.id,
            kind: self.kind.clone(),
            opened_at: self.opened_at,
            countdown: self.countdown.current(),
        }
    }
}

/// Serializable state of an open view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewSummary {
    pub id: u64,
    pub kind: ViewKind,
    pub opened_at: DateTime<Utc>,
    pub countdown: CountdownSnapshot,
}
