//! Main application state management

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use tracing::{debug, info};

use super::{ContactForm, Event, EventCatalog, View, ViewKind, ViewSummary};
use crate::{
    countdown::{Clock, CountdownSnapshot, SystemClock, MS_PER_DAY, MS_PER_MINUTE},
    error::{AppError, AppResult},
    tasks::{start_countdown, TimerRegistry},
};

/// Hero countdown on the landing page runs to now + 7d 33m
pub const HERO_OFFSET_MS: i64 = 7 * MS_PER_DAY + 33 * MS_PER_MINUTE;
/// Secondary landing page event runs to now + 12d 12m
pub const FEATURED_OFFSET_MS: i64 = 12 * MS_PER_DAY + 12 * MS_PER_MINUTE;

/// Main application state that owns the catalog and every open view
#[derive(Debug)]
pub struct AppState {
    pub catalog: EventCatalog,
    pub clock: Arc<dyn Clock>,
    pub timers: TimerRegistry,
    /// Countdown configuration
    pub expiry_days: u64,
    pub tick: Duration,
    /// Open views keyed by id
    views: Mutex<HashMap<u64, View>>,
    next_view_id: AtomicU64,
    /// Accepted contact messages, kept in memory only
    contact_messages: Mutex<Vec<ContactForm>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create a new AppState backed by the system clock and the demo catalog
    pub fn new(port: u16, host: String, expiry_days: u64, tick: Duration) -> Self {
        Self {
            catalog: EventCatalog::demo(),
            clock: Arc::new(SystemClock),
            timers: TimerRegistry::new(),
            expiry_days,
            tick,
            views: Mutex::new(HashMap::new()),
            next_view_id: AtomicU64::new(1),
            contact_messages: Mutex::new(Vec::new()),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Replace the clock countdowns are sampled from
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Photo expiry window in milliseconds, saturating at `i64::MAX`
    pub fn expiry_ms(&self) -> i64 {
        i64::try_from(self.expiry_days)
            .unwrap_or(i64::MAX)
            .saturating_mul(MS_PER_DAY)
    }

    /// Current time of the injected clock
    fn clock_time(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.clock.now_ms()).unwrap_or_else(Utc::now)
    }

    fn record_action(&self, action: String) {
        let now = self.clock_time();
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action);
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(now);
        }
    }

    /// Register a view and start its countdown toward `target_ms`
    fn open_view(&self, kind: ViewKind, target_ms: i64) -> AppResult<ViewSummary> {
        let mut views = self.views.lock()?;

        let id = self.next_view_id.fetch_add(1, Ordering::SeqCst);
        let view = View {
            id,
            kind,
            opened_at: self.clock_time(),
            countdown: start_countdown(target_ms, Arc::clone(&self.clock), self.tick, &self.timers),
        };
        let summary = view.summary();
        views.insert(id, view);
        drop(views);

        info!("Opened view {} ({:?}), {} remaining", id, summary.kind, summary.countdown.remaining);
        self.record_action(format!("open-view-{}", id));
        Ok(summary)
    }

    /// Open the landing page: hero countdown plus a static sample for the
    /// secondary event taken at the same instant
    pub fn open_home_view(&self) -> AppResult<(ViewSummary, CountdownSnapshot)> {
        let now = self.clock.now_ms();
        let featured = CountdownSnapshot::sample(now.saturating_add(FEATURED_OFFSET_MS), now);
        let summary = self.open_view(ViewKind::Home, now.saturating_add(HERO_OFFSET_MS))?;
        Ok((summary, featured))
    }

    /// Open an event detail page counting down to its photo expiry
    pub fn open_event_view(&self, slug: &str) -> AppResult<(ViewSummary, Event)> {
        let event = self.catalog.get(slug)?.clone();
        let target_ms = self.clock.now_ms().saturating_add(self.expiry_ms());
        let summary = self.open_view(
            ViewKind::EventDetail {
                slug: event.slug.clone(),
            },
            target_ms,
        )?;
        Ok((summary, event))
    }

    /// Current state of an open view
    pub fn view(&self, id: u64) -> AppResult<ViewSummary> {
        self.views
            .lock()?
            .get(&id)
            .map(View::summary)
            .ok_or(AppError::ViewNotFound(id))
    }

    fn take_view(&self, id: u64) -> AppResult<View> {
        self.views.lock()?.remove(&id).ok_or(AppError::ViewNotFound(id))
    }

    fn take_all_views(&self) -> AppResult<Vec<View>> {
        Ok(self.views.lock()?.drain().map(|(_, view)| view).collect())
    }

    /// Close a view and wait for its countdown to stop
    pub async fn close_view(&self, id: u64) -> AppResult<ViewSummary> {
        let view = self.take_view(id)?;
        let summary = view.summary();
        view.countdown.dispose().await;

        info!("Closed view {}", id);
        self.record_action(format!("close-view-{}", id));
        Ok(summary)
    }

    /// Close every open view, returning how many were closed
    pub async fn close_all_views(&self) -> AppResult<usize> {
        let views = self.take_all_views()?;
        let count = views.len();
        join_all(views.into_iter().map(|view| view.countdown.dispose())).await;

        info!("Closed {} open views", count);
        Ok(count)
    }

    pub fn open_view_count(&self) -> AppResult<usize> {
        Ok(self.views.lock()?.len())
    }

    /// Validate and accept a contact message
    pub fn submit_contact(&self, form: ContactForm) -> AppResult<ContactForm> {
        let form = form.validate()?;
        debug!("Contact message from {} <{}>", form.name, form.email);

        self.contact_messages.lock()?.push(form.clone());
        info!("Accepted contact message from {}", form.email);
        self.record_action("contact".to_string());
        Ok(form)
    }

    pub fn contact_count(&self) -> AppResult<usize> {
        Ok(self.contact_messages.lock()?.len())
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
