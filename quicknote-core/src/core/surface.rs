//! Registry of the application's UI surfaces.
//!
//! QuickNote has exactly two windows, the composer and the history list. Each
//! may exist at most once; the registry hands out the live instance, keeps the
//! first of two concurrently built ones, and forgets it when the window closes.
//!
//! Handles are built outside the registry so that no lock is held while a
//! window is being created.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A logical UI surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    /// The small always-on-top capture window.
    Composer,
    /// The searchable list of every note.
    History,
}

impl Surface {
    pub const ALL: [Surface; 2] = [Surface::Composer, Surface::History];

    /// Stable label, used as the window label and the notifier subscription id.
    pub fn label(self) -> &'static str {
        match self {
            Surface::Composer => "composer",
            Surface::History => "history",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps each [`Surface`] to at most one live handle of type `H`.
///
/// Handles are typically cheap-to-clone window references.
#[derive(Debug)]
pub struct SurfaceRegistry<H> {
    live: HashMap<Surface, H>,
}

impl<H> Default for SurfaceRegistry<H> {
    fn default() -> Self {
        Self {
            live: HashMap::new(),
        }
    }
}

impl<H: Clone> SurfaceRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, surface: Surface) -> Option<&H> {
        self.live.get(&surface)
    }

    pub fn contains(&self, surface: Surface) -> bool {
        self.live.contains_key(&surface)
    }

    /// Registers a handle built outside the registry. An already live handle
    /// wins: it is returned with `false` and `handle` is not stored.
    pub fn register(&mut self, surface: Surface, handle: H) -> (H, bool) {
        match self.live.entry(surface) {
            Entry::Occupied(live) => (live.get().clone(), false),
            Entry::Vacant(slot) => {
                log::debug!("Registered surface '{surface}'");
                (slot.insert(handle).clone(), true)
            }
        }
    }

    /// Forgets the handle for `surface`, e.g. after its window was destroyed.
    pub fn remove(&mut self, surface: Surface) -> Option<H> {
        let removed = self.live.remove(&surface);
        if removed.is_some() {
            log::debug!("Released surface '{surface}'");
        }
        removed
    }

    /// All live handles, composer first.
    pub fn handles(&self) -> Vec<H> {
        Surface::ALL
            .into_iter()
            .filter_map(|s| self.live.get(&s).cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip() {
        for surface in Surface::ALL {
            assert_eq!(Surface::from_label(surface.label()), Some(surface));
        }
        assert_eq!(Surface::from_label("settings"), None);
        assert_eq!(serde_json::to_string(&Surface::History).unwrap(), r#""history""#);
    }

    #[test]
    fn test_remove_allows_recreation() {
        let mut registry = SurfaceRegistry::new();
        registry.register(Surface::History, 1);
        assert!(registry.contains(Surface::History));
        assert_eq!(registry.remove(Surface::History), Some(1));
        assert_eq!(registry.remove(Surface::History), None);
        assert!(registry.is_empty());

        assert_eq!(registry.register(Surface::History, 2), (2, true));
    }

    #[test]
    fn test_register_keeps_first_handle() {
        let mut registry = SurfaceRegistry::new();
        assert_eq!(registry.register(Surface::History, "first"), ("first", true));
        assert_eq!(registry.register(Surface::History, "second"), ("first", false));
        assert_eq!(registry.get(Surface::History), Some(&"first"));

        registry.remove(Surface::History);
        assert_eq!(registry.register(Surface::History, "third"), ("third", true));
    }

    #[test]
    fn test_handles_in_surface_order() {
        let mut registry = SurfaceRegistry::new();
        registry.register(Surface::History, "h");
        registry.register(Surface::Composer, "c");
        assert_eq!(registry.handles(), vec!["c", "h"]);
        assert!(!registry.is_empty());
    }
}
