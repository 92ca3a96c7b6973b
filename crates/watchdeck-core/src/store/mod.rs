// ── Client state store ──
//
// Independently addressable slices shared by every dashboard consumer.
// Each slice is snapshot-atomic; cross-slice consistency is not a goal.

mod slice;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use watchdeck_api::types::{DashboardStats, Device, SslCheck, UptimeCheck};

pub use slice::{Slice, SliceState};

/// The shared client state store: one slice per domain plus dashboard
/// stats and app-level UI state.
pub struct Store {
    devices: Slice<Device>,
    ssl: Slice<SslCheck>,
    uptime: Slice<UptimeCheck>,
    dashboard: DashboardSlice,
    app: AppSlice,
}

impl Store {
    pub fn new() -> Self {
        Self {
            devices: Slice::new(),
            ssl: Slice::new(),
            uptime: Slice::new(),
            dashboard: DashboardSlice::new(),
            app: AppSlice::new(),
        }
    }

    pub fn devices(&self) -> &Slice<Device> {
        &self.devices
    }

    pub fn ssl(&self) -> &Slice<SslCheck> {
        &self.ssl
    }

    pub fn uptime(&self) -> &Slice<UptimeCheck> {
        &self.uptime
    }

    pub fn dashboard(&self) -> &DashboardSlice {
        &self.dashboard
    }

    pub fn app(&self) -> &AppSlice {
        &self.app
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

// ── Dashboard slice ──────────────────────────────────────────────────

/// Snapshot of the dashboard stats card.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub stats: Option<Arc<DashboardStats>>,
    pub loading: bool,
    pub error: Option<String>,
    /// Set automatically whenever stats are replaced.
    pub last_updated: Option<DateTime<Utc>>,
}

/// Single-record slice for the aggregate dashboard stats.
pub struct DashboardSlice {
    state: watch::Sender<DashboardState>,
}

impl DashboardSlice {
    pub fn new() -> Self {
        let (state, _) = watch::channel(DashboardState::default());
        Self { state }
    }

    pub fn snapshot(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.subscribe()
    }

    /// Replace the stats record, stamping `last_updated`.
    pub fn set_stats(&self, stats: DashboardStats) {
        self.state.send_modify(|s| {
            s.stats = Some(Arc::new(stats));
            s.last_updated = Some(Utc::now());
        });
    }

    pub fn set_loading(&self, loading: bool) {
        self.state.send_modify(|s| s.loading = loading);
    }

    pub fn set_error(&self, error: Option<String>) {
        self.state.send_modify(|s| s.error = error);
    }

    pub fn clear(&self) {
        self.state.send_modify(|s| *s = DashboardState::default());
    }
}

impl Default for DashboardSlice {
    fn default() -> Self {
        Self::new()
    }
}

// ── App slice ────────────────────────────────────────────────────────

/// App-level UI state shared across views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub active_view: String,
    pub auto_refresh: bool,
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            active_view: "dashboard".into(),
            auto_refresh: true,
            status_message: None,
        }
    }
}

pub struct AppSlice {
    state: watch::Sender<AppState>,
}

impl AppSlice {
    pub fn new() -> Self {
        let (state, _) = watch::channel(AppState::default());
        Self { state }
    }

    pub fn snapshot(&self) -> AppState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }

    pub fn set_active_view(&self, view: impl Into<String>) {
        let view = view.into();
        self.state.send_modify(|s| s.active_view = view);
    }

    pub fn set_auto_refresh(&self, enabled: bool) {
        self.state.send_modify(|s| s.auto_refresh = enabled);
    }

    pub fn set_status_message(&self, message: Option<String>) {
        self.state.send_modify(|s| s.status_message = message);
    }

    pub fn clear(&self) {
        self.state.send_modify(|s| *s = AppState::default());
    }
}

impl Default for AppSlice {
    fn default() -> Self {
        Self::new()
    }
}
