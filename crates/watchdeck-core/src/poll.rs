// ── Polling sessions ──
//
// One session per widget: fetch on mount, refetch on a timer, manual
// refresh, pause/resume, retarget, and deterministic teardown. All session
// state lives in a single task; fetches run as spawned sub-tasks reporting
// back through a channel, tagged with the generation and sequence they were
// issued under, so commits are serialized, a result from a superseded
// generation is identifiable and discarded, and a drained result releases
// the in-flight slot only for the fetch that produced it.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use watchdeck_api::Error;

/// Lifecycle phase of a polling session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Error,
}

/// Observable state of a polling session.
///
/// A failed fetch records `error` and moves to [`Phase::Error`] but leaves
/// the previous `data` untouched, so consumers keep rendering stale data
/// alongside the error.
#[derive(Debug)]
pub struct PollState<T> {
    pub phase: Phase,
    pub data: Option<Arc<T>>,
    pub error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
    pub auto_refresh: bool,
}

impl<T> Clone for PollState<T> {
    fn clone(&self) -> Self {
        Self {
            phase: self.phase,
            data: self.data.clone(),
            error: self.error.clone(),
            last_updated: self.last_updated,
            auto_refresh: self.auto_refresh,
        }
    }
}

impl<T> Default for PollState<T> {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            data: None,
            error: None,
            last_updated: None,
            auto_refresh: true,
        }
    }
}

enum Command<K> {
    Refresh,
    SetAutoRefresh(bool),
    Retarget(K),
}

/// Handle to a running polling session.
///
/// Dropping the handle cancels the session: the timer is torn down and any
/// in-flight fetch is aborted, so no state is ever written after teardown.
pub struct PollHandle<T, K> {
    cmd_tx: mpsc::UnboundedSender<Command<K>>,
    state_rx: watch::Receiver<PollState<T>>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl<T, K> PollHandle<T, K> {
    /// Request an immediate fetch. Skipped when a fetch for the current
    /// target is already in flight.
    pub fn refresh(&self) {
        let _ = self.cmd_tx.send(Command::Refresh);
    }

    /// Enable or disable the interval timer. Disabling tears the timer
    /// down; re-enabling arms a fresh interval but does not trigger an
    /// immediate fetch by itself.
    pub fn set_auto_refresh(&self, enabled: bool) {
        let _ = self.cmd_tx.send(Command::SetAutoRefresh(enabled));
    }

    /// Point the session at a new target identity. The previous cycle is
    /// cancelled (its in-flight result, if any, is discarded) and a fresh
    /// fetch/timer cycle starts immediately.
    pub fn retarget(&self, target: K) {
        let _ = self.cmd_tx.send(Command::Retarget(target));
    }

    /// Current session state.
    pub fn state(&self) -> PollState<T> {
        self.state_rx.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<PollState<T>> {
        self.state_rx.clone()
    }

    /// Tear the session down and wait for the task to finish.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        let _ = (&mut self.task).await;
    }
}

impl<T, K> Drop for PollHandle<T, K> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Spawn a polling session for `target`.
///
/// Fetches immediately, then re-fetches every `period` while auto-refresh
/// is enabled. `fetch` is called with the current target; its failures are
/// absorbed here -- this is the sole recovery boundary, converting errors
/// into a displayed message while leaving retry available.
pub fn spawn_poller<T, K, F, Fut>(target: K, period: Duration, fetch: F) -> PollHandle<T, K>
where
    T: Send + Sync + 'static,
    K: Clone + Send + 'static,
    F: Fn(K) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, Error>> + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(PollState::default());
    let cancel = CancellationToken::new();

    let task = tokio::spawn(poll_task(
        target,
        period,
        Arc::new(fetch),
        state_tx,
        cmd_rx,
        cancel.clone(),
    ));

    PollHandle {
        cmd_tx,
        state_rx,
        cancel,
        task,
    }
}

#[allow(clippy::too_many_lines)]
async fn poll_task<T, K, F, Fut>(
    mut target: K,
    period: Duration,
    fetch: Arc<F>,
    state: watch::Sender<PollState<T>>,
    mut cmd_rx: mpsc::UnboundedReceiver<Command<K>>,
    cancel: CancellationToken,
) where
    T: Send + Sync + 'static,
    K: Clone + Send + 'static,
    F: Fn(K) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, Error>> + Send + 'static,
{
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<(u64, u64, Result<T, Error>)>();

    let mut generation: u64 = 0;
    let mut next_seq: u64 = 1;
    let mut auto_refresh = true;
    let mut timer = Some(make_timer(period));

    // Mount: immediate fetch.
    let mut in_flight: Option<(u64, JoinHandle<()>)> = Some((
        next_seq,
        start_fetch(&fetch, target.clone(), generation, next_seq, &done_tx, &state),
    ));

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Some(cmd) = cmd_rx.recv() => match cmd {
                Command::Refresh => {
                    if in_flight.as_ref().is_some_and(|(_, h)| !h.is_finished()) {
                        debug!("refresh requested while a fetch is in flight; skipping");
                    } else {
                        next_seq += 1;
                        in_flight = Some((
                            next_seq,
                            start_fetch(&fetch, target.clone(), generation, next_seq, &done_tx, &state),
                        ));
                    }
                }
                Command::SetAutoRefresh(enabled) => {
                    auto_refresh = enabled;
                    state.send_modify(|s| s.auto_refresh = enabled);
                    // Re-enabling arms a fresh interval; no immediate fetch.
                    timer = enabled.then(|| make_timer(period));
                }
                Command::Retarget(new_target) => {
                    target = new_target;
                    generation += 1;
                    if let Some((_, handle)) = in_flight.take() {
                        handle.abort();
                    }
                    if auto_refresh {
                        timer = Some(make_timer(period));
                    }
                    next_seq += 1;
                    in_flight = Some((
                        next_seq,
                        start_fetch(&fetch, target.clone(), generation, next_seq, &done_tx, &state),
                    ));
                }
            },

            Some((issued, seq, result)) = done_rx.recv() => {
                if issued != generation {
                    debug!(issued, generation, "discarding result from superseded generation");
                } else {
                    // A finished fetch may already have been superseded by a
                    // newer one; only the matching fetch releases the slot.
                    if in_flight.as_ref().is_some_and(|(s, _)| *s == seq) {
                        in_flight = None;
                    }
                    commit(&state, result);
                }
            }

            () = next_tick(timer.as_mut()), if auto_refresh => {
                if in_flight.as_ref().is_some_and(|(_, h)| !h.is_finished()) {
                    debug!("timer tick while a fetch is in flight; skipping");
                } else {
                    next_seq += 1;
                    in_flight = Some((
                        next_seq,
                        start_fetch(&fetch, target.clone(), generation, next_seq, &done_tx, &state),
                    ));
                }
            }
        }
    }

    // Teardown: abort any in-flight fetch so nothing resolves after us.
    if let Some((_, handle)) = in_flight.take() {
        handle.abort();
    }
    debug!("polling session shut down");
}

/// Spawn one fetch for `target`, tagged with the generation and sequence it
/// was issued under, and mark the session Loading.
fn start_fetch<T, K, F, Fut>(
    fetch: &Arc<F>,
    target: K,
    generation: u64,
    seq: u64,
    done_tx: &mpsc::UnboundedSender<(u64, u64, Result<T, Error>)>,
    state: &watch::Sender<PollState<T>>,
) -> JoinHandle<()>
where
    T: Send + Sync + 'static,
    K: Send + 'static,
    F: Fn(K) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, Error>> + Send + 'static,
{
    state.send_modify(|s| s.phase = Phase::Loading);

    let fetch = Arc::clone(fetch);
    let done_tx = done_tx.clone();
    tokio::spawn(async move {
        let result = fetch(target).await;
        let _ = done_tx.send((generation, seq, result));
    })
}

fn commit<T>(state: &watch::Sender<PollState<T>>, result: Result<T, Error>) {
    match result {
        Ok(data) => state.send_modify(|s| {
            s.phase = Phase::Ready;
            s.data = Some(Arc::new(data));
            s.error = None;
            s.last_updated = Some(Utc::now());
        }),
        Err(e) => {
            warn!(error = %e, "poll fetch failed");
            state.send_modify(|s| {
                s.phase = Phase::Error;
                s.error = Some(e.to_string());
                // Prior data stays visible.
            });
        }
    }
}

/// Interval whose first tick fires one full period from now.
fn make_timer(period: Duration) -> Interval {
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

async fn next_tick(timer: Option<&mut Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending().await,
    }
}
