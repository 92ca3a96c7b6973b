// watchdeck-core: shared client state and polling sessions over watchdeck-api.

pub mod poll;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use poll::{Phase, PollHandle, PollState, spawn_poller};
pub use store::{
    AppSlice, AppState, DashboardSlice, DashboardState, Slice, SliceState, Store,
};
