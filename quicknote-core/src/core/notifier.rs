//! Zero-payload refresh broadcasts to open windows.
//!
//! Observers are told *that* the store changed, never *what* changed; each
//! one re-lists the notes itself. A window opened after a broadcast simply
//! loads the current state on its own first render.

use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard};

/// Callback run on every refresh broadcast.
pub type RefreshCallback = Arc<dyn Fn() + Send + Sync>;

/// Publish/subscribe hub keyed by surface id (window label).
#[derive(Default)]
pub struct ChangeNotifier {
    observers: Mutex<BTreeMap<String, RefreshCallback>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for `surface_id`, replacing any earlier subscription
    /// under the same id.
    pub fn subscribe<F>(&self, surface_id: impl Into<String>, callback: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        let surface_id = surface_id.into();
        log::debug!("Surface '{surface_id}' subscribed to refresh events");
        self.lock().insert(surface_id, Arc::new(callback));
    }

    /// Removes the subscription for `surface_id`. Returns whether one existed.
    pub fn unsubscribe(&self, surface_id: &str) -> bool {
        let removed = self.lock().remove(surface_id).is_some();
        if removed {
            log::debug!("Surface '{surface_id}' unsubscribed from refresh events");
        }
        removed
    }

    /// Invokes every current subscriber once, in surface-id order.
    ///
    /// Callbacks run after the internal lock is released, so an observer may
    /// subscribe or unsubscribe from inside its own callback. A panicking
    /// callback is logged and skipped; the remaining observers are still
    /// notified. Returns the number of callbacks that completed.
    pub fn broadcast(&self) -> usize {
        let callbacks: Vec<(String, RefreshCallback)> = self
            .lock()
            .iter()
            .map(|(id, callback)| (id.clone(), Arc::clone(callback)))
            .collect();
        log::debug!("Broadcasting refresh to {} surface(s)", callbacks.len());

        let mut delivered = 0;
        for (surface_id, callback) in &callbacks {
            match panic::catch_unwind(AssertUnwindSafe(|| callback())) {
                Ok(()) => delivered += 1,
                Err(_) => log::error!("Refresh callback for surface '{surface_id}' panicked"),
            }
        }
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    pub fn is_subscribed(&self, surface_id: &str) -> bool {
        self.lock().contains_key(surface_id)
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, RefreshCallback>> {
        // A panicking observer must not take the whole notifier down with it.
        self.observers.lock().unwrap_or_else(|e| e.into_inner())
    }
}
