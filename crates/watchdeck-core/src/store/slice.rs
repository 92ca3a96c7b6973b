// ── Generic store slice ──
//
// One named region of the shared client state store. Snapshot state lives
// behind a `watch` channel: every mutation happens inside a single
// `send_modify`/`send_if_modified`, so readers only ever observe complete
// snapshots and subscribers are notified per committed change.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tracing::warn;

use watchdeck_api::types::Entity;

/// Snapshot of one slice: the record collection plus status fields.
///
/// `error` and `records` are mutually informative, not mutually exclusive:
/// stale records stay visible alongside the error from a failed refresh.
#[derive(Debug)]
pub struct SliceState<T> {
    pub records: Vec<Arc<T>>,
    pub selected: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Clone for SliceState<T> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
            selected: self.selected.clone(),
            loading: self.loading,
            error: self.error.clone(),
        }
    }
}

impl<T> Default for SliceState<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            selected: None,
            loading: false,
            error: None,
        }
    }
}

impl<T: Entity> SliceState<T> {
    /// Look up a record by its server-assigned id.
    pub fn get(&self, id: &str) -> Option<&Arc<T>> {
        self.records.iter().find(|r| r.id() == id)
    }
}

/// A shared, mutable collection of one record type.
///
/// Mutators never fail: unknown ids and unmergeable patches are silent
/// no-ops. Id uniqueness is assumed, not enforced -- `add` with a duplicate
/// id is a caller error the slice tolerates.
pub struct Slice<T> {
    state: watch::Sender<SliceState<T>>,
}

impl<T> Slice<T>
where
    T: Entity + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    pub fn new() -> Self {
        let (state, _) = watch::channel(SliceState::default());
        Self { state }
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Current snapshot (cheap: `Arc` clones of the records).
    pub fn snapshot(&self) -> SliceState<T> {
        self.state.borrow().clone()
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<SliceState<T>> {
        self.state.subscribe()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().records.is_empty()
    }

    // ── Collection mutators ──────────────────────────────────────────

    /// Overwrite the collection wholesale.
    pub fn replace(&self, records: Vec<T>) {
        self.state.send_modify(|s| {
            s.records = records.into_iter().map(Arc::new).collect();
        });
    }

    /// Append one record.
    pub fn add(&self, record: T) {
        self.state.send_modify(|s| s.records.push(Arc::new(record)));
    }

    /// Shallow-merge the top-level fields of `patch` into the record with
    /// the given id. No-op when the id is unknown or the patch is not a
    /// JSON object.
    pub fn update(&self, id: &str, patch: &serde_json::Value) {
        let Some(fields) = patch.as_object() else {
            return;
        };

        self.state.send_if_modified(|s| {
            let Some(slot) = s.records.iter_mut().find(|r| r.id() == id) else {
                return false;
            };
            match merge_record(slot.as_ref(), fields) {
                Some(merged) => {
                    *slot = Arc::new(merged);
                    true
                }
                None => {
                    warn!(id, "discarding patch that does not merge into a valid record");
                    false
                }
            }
        });
    }

    /// Remove the record with the given id. Clears the selection when the
    /// removed record was selected; removing a non-selected record leaves
    /// the selection untouched.
    pub fn remove(&self, id: &str) {
        self.state.send_if_modified(|s| {
            let before = s.records.len();
            s.records.retain(|r| r.id() != id);
            if s.records.len() == before {
                return false;
            }
            if s.selected.as_deref() == Some(id) {
                s.selected = None;
            }
            true
        });
    }

    // ── Selection & status ───────────────────────────────────────────

    pub fn select(&self, id: Option<String>) {
        self.state.send_modify(|s| s.selected = id);
    }

    pub fn set_loading(&self, loading: bool) {
        self.state.send_modify(|s| s.loading = loading);
    }

    pub fn set_error(&self, error: Option<String>) {
        self.state.send_modify(|s| s.error = error);
    }

    /// Reset the slice to its empty initial shape.
    pub fn clear(&self) {
        self.state.send_modify(|s| *s = SliceState::default());
    }
}

impl<T> Default for Slice<T>
where
    T: Entity + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize the record, overwrite the patched top-level keys, and decode
/// back. `None` when the merged object no longer decodes as `T`.
fn merge_record<T>(record: &T, fields: &serde_json::Map<String, serde_json::Value>) -> Option<T>
where
    T: Serialize + DeserializeOwned,
{
    let mut value = serde_json::to_value(record).ok()?;
    let object = value.as_object_mut()?;
    for (key, val) in fields {
        object.insert(key.clone(), val.clone());
    }
    serde_json::from_value(value).ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use watchdeck_api::types::UptimeCheck;

    fn check(id: &str, name: &str) -> UptimeCheck {
        UptimeCheck {
            id: id.into(),
            name: name.into(),
            url: format!("https://{name}.example.com"),
            interval_seconds: Some(60),
            is_up: Some(true),
            paused: false,
            last_checked: None,
            response_time_ms: None,
            uptime_percent: None,
        }
    }

    #[test]
    fn replace_overwrites_wholesale() {
        let slice: Slice<UptimeCheck> = Slice::new();
        slice.add(check("1", "old"));

        slice.replace(vec![check("2", "a"), check("3", "b")]);

        let snap = slice.snapshot();
        assert_eq!(snap.records.len(), 2);
        assert!(snap.get("1").is_none());
        assert!(snap.get("2").is_some());
    }

    #[test]
    fn add_appends_in_order() {
        let slice: Slice<UptimeCheck> = Slice::new();
        slice.add(check("1", "a"));
        slice.add(check("2", "b"));

        let snap = slice.snapshot();
        assert_eq!(snap.records[0].id, "1");
        assert_eq!(snap.records[1].id, "2");
    }

    #[test]
    fn update_folds_patches_in_call_order() {
        let slice: Slice<UptimeCheck> = Slice::new();
        slice.add(check("1", "api"));

        slice.update("1", &json!({"name": "api-v2", "is_up": false}));
        slice.update("1", &json!({"name": "api-v3"}));

        let snap = slice.snapshot();
        let record = snap.get("1").unwrap();
        // Last patch wins per key; untouched fields survive.
        assert_eq!(record.name, "api-v3");
        assert_eq!(record.is_up, Some(false));
        assert_eq!(record.url, "https://api.example.com");
    }

    #[test]
    fn update_unknown_id_is_a_noop() {
        let slice: Slice<UptimeCheck> = Slice::new();
        slice.add(check("1", "a"));
        let before = slice.snapshot();

        slice.update("nope", &json!({"name": "ghost"}));

        let after = slice.snapshot();
        assert_eq!(before.records[0].name, after.records[0].name);
        assert_eq!(after.records.len(), 1);
    }

    #[test]
    fn update_with_non_object_patch_is_a_noop() {
        let slice: Slice<UptimeCheck> = Slice::new();
        slice.add(check("1", "a"));

        slice.update("1", &json!("not an object"));

        assert_eq!(slice.snapshot().get("1").unwrap().name, "a");
    }

    #[test]
    fn update_with_unmergeable_patch_is_a_noop() {
        let slice: Slice<UptimeCheck> = Slice::new();
        slice.add(check("1", "a"));

        // `url` must be a string; the merged object no longer decodes.
        slice.update("1", &json!({"url": 42}));

        assert_eq!(slice.snapshot().get("1").unwrap().url, "https://a.example.com");
    }

    #[test]
    fn remove_selected_record_clears_selection() {
        let slice: Slice<UptimeCheck> = Slice::new();
        slice.add(check("1", "a"));
        slice.add(check("2", "b"));
        slice.select(Some("1".into()));

        slice.remove("1");

        let snap = slice.snapshot();
        assert_eq!(snap.selected, None);
        assert_eq!(snap.records.len(), 1);
    }

    #[test]
    fn remove_other_record_keeps_selection() {
        let slice: Slice<UptimeCheck> = Slice::new();
        slice.add(check("1", "a"));
        slice.add(check("2", "b"));
        slice.select(Some("1".into()));

        slice.remove("2");

        assert_eq!(slice.snapshot().selected.as_deref(), Some("1"));
    }

    #[test]
    fn remove_unknown_id_is_a_noop() {
        let slice: Slice<UptimeCheck> = Slice::new();
        slice.add(check("1", "a"));

        slice.remove("nope");

        assert_eq!(slice.len(), 1);
    }

    #[test]
    fn error_and_stale_records_coexist() {
        let slice: Slice<UptimeCheck> = Slice::new();
        slice.replace(vec![check("1", "a")]);

        slice.set_error(Some("refresh failed".into()));

        let snap = slice.snapshot();
        assert_eq!(snap.error.as_deref(), Some("refresh failed"));
        assert_eq!(snap.records.len(), 1);
    }

    #[test]
    fn clear_resets_to_initial_shape() {
        let slice: Slice<UptimeCheck> = Slice::new();
        slice.replace(vec![check("1", "a")]);
        slice.select(Some("1".into()));
        slice.set_loading(true);
        slice.set_error(Some("boom".into()));

        slice.clear();

        let snap = slice.snapshot();
        assert!(snap.records.is_empty());
        assert_eq!(snap.selected, None);
        assert!(!snap.loading);
        assert_eq!(snap.error, None);
    }

    #[tokio::test]
    async fn subscribers_observe_committed_snapshots() {
        let slice: Slice<UptimeCheck> = Slice::new();
        let mut rx = slice.subscribe();

        slice.replace(vec![check("1", "a")]);

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().records.len(), 1);
    }
}
