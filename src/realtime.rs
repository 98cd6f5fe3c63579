use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use serde::Serialize;
use serde_json::Value;

/// Schema name carried on every event, mirroring the payloads emitted by
/// database change feeds.
pub const SCHEMA: &str = "public";

type Listener = Arc<dyn Fn(&ChangeEvent) + Send + Sync + 'static>;

/// Kind of row change that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// Notification published after a successful write.
///
/// `new` carries the row after the change and `old` the row before it;
/// whichever side does not apply is `Null`.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub schema: &'static str,
    pub table: String,
    pub new: Value,
    pub old: Value,
}

impl ChangeEvent {
    pub fn insert<T: Serialize>(table: &str, row: &T) -> Self {
        Self {
            kind: ChangeKind::Insert,
            schema: SCHEMA,
            table: table.to_string(),
            new: to_row(row),
            old: Value::Null,
        }
    }

    pub fn update<T: Serialize>(table: &str, row: &T) -> Self {
        Self {
            kind: ChangeKind::Update,
            schema: SCHEMA,
            table: table.to_string(),
            new: to_row(row),
            old: Value::Null,
        }
    }

    pub fn delete<T: Serialize>(table: &str, row: &T) -> Self {
        Self {
            kind: ChangeKind::Delete,
            schema: SCHEMA,
            table: table.to_string(),
            new: Value::Null,
            old: to_row(row),
        }
    }
}

fn to_row<T: Serialize>(row: &T) -> Value {
    serde_json::to_value(row).unwrap_or(Value::Null)
}

#[derive(Default)]
struct BrokerState {
    next_id: u64,
    listeners: HashMap<String, Vec<(u64, Listener)>>,
}

/// In-process publish/subscribe hub for table change notifications.
///
/// Cheap to clone; all clones share the same listener table.
#[derive(Clone, Default)]
pub struct ChangeBroker {
    state: Arc<Mutex<BrokerState>>,
}

impl ChangeBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for changes on one table. Dropping the returned
    /// handle removes the listener.
    pub fn subscribe<F>(&self, table: &str, listener: F) -> Subscription
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        let mut state = self.state.lock().unwrap_or_else(|p| p.into_inner());
        state.next_id += 1;
        let id = state.next_id;
        state
            .listeners
            .entry(table.to_string())
            .or_default()
            .push((id, Arc::new(listener)));

        Subscription {
            table: table.to_string(),
            id,
            state: Arc::downgrade(&self.state),
        }
    }

    /// Deliver an event to every listener on its table, synchronously on
    /// the caller's thread.
    pub fn publish(&self, event: ChangeEvent) {
        // Listeners are cloned out so a callback can subscribe or drop a
        // subscription without deadlocking.
        let listeners: Vec<Listener> = {
            let state = self.state.lock().unwrap_or_else(|p| p.into_inner());
            state
                .listeners
                .get(&event.table)
                .map(|entries| entries.iter().map(|(_, l)| Arc::clone(l)).collect())
                .unwrap_or_default()
        };

        for listener in listeners {
            listener(&event);
        }
    }
}

/// Handle tying a listener's lifetime to its owner.
pub struct Subscription {
    table: String,
    id: u64,
    state: Weak<Mutex<BrokerState>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            let mut state = state.lock().unwrap_or_else(|p| p.into_inner());
            if let Some(entries) = state.listeners.get_mut(&self.table) {
                entries.retain(|(id, _)| *id != self.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn publish_reaches_table_listeners_only() {
        let broker = ChangeBroker::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let hits_clone = Arc::clone(&hits);
        let _products = broker.subscribe("products", move |_| {
            hits_clone.fetch_add(1, Ordering::SeqCst);
        });
        let _posts = broker.subscribe("blog_posts", |_| {
            panic!("listener on another table must not fire");
        });

        broker.publish(ChangeEvent::insert("products", &serde_json::json!({"id": 1})));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dropping_subscription_removes_listener() {
        let broker = ChangeBroker::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let hits_clone = Arc::clone(&hits);
        let sub = broker.subscribe("products", move |_| {
            hits_clone.fetch_add(1, Ordering::SeqCst);
        });

        broker.publish(ChangeEvent::update("products", &serde_json::json!({"id": 1})));
        drop(sub);
        broker.publish(ChangeEvent::update("products", &serde_json::json!({"id": 1})));

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn delete_events_carry_the_old_row() {
        let event = ChangeEvent::delete("products", &serde_json::json!({"id": 9, "name": "Oil"}));
        assert_eq!(event.kind, ChangeKind::Delete);
        assert!(event.new.is_null());
        assert_eq!(event.old["name"], "Oil");
    }
}
