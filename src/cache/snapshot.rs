//! Single-value cache with TTL (Time To Live) support.
//!
//! Holds one value (the whole directory listing, in practice) and reports it
//! as stale once the TTL has elapsed or after an explicit invalidation.

use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    stored_at: Instant,
}

#[derive(Debug)]
struct Slot<V> {
    entry: Option<Entry<V>>,
    /// Bumped by every invalidation or in-place edit.
    generation: u64,
}

/// A thread-safe single-slot cache with time-based expiration.
///
/// Cloning is cheap and clones share the same slot.
///
/// Loaders that read the source of truth outside the lock should take
/// [`generation`](Self::generation) first and publish with
/// [`store_if_generation`](Self::store_if_generation), so a value read before
/// an invalidation is never stored after it.
#[derive(Clone)]
pub struct TimedSnapshot<V: Clone> {
    slot: Arc<RwLock<Slot<V>>>,
    ttl: Duration,
}

impl<V: Clone> TimedSnapshot<V> {
    /// Create an empty snapshot whose values live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Slot {
                entry: None,
                generation: 0,
            })),
            ttl,
        }
    }

    /// Current generation; changes whenever the held value is invalidated
    /// or edited.
    pub fn generation(&self) -> u64 {
        self.slot.read().map_or(0, |slot| slot.generation)
    }

    /// Store `value` and restart its TTL, but only if no invalidation or edit
    /// happened since `generation` was read. Returns whether it was stored.
    pub fn store_if_generation(&self, generation: u64, value: V) -> bool {
        let Ok(mut slot) = self.slot.write() else {
            return false;
        };
        if slot.generation != generation {
            return false;
        }
        slot.entry = Some(Entry {
            value,
            stored_at: Instant::now(),
        });
        true
    }

    /// Get the held value if one exists and hasn't expired.
    pub fn get(&self) -> Option<V> {
        let slot = self.slot.read().ok()?;
        let value = slot
            .entry
            .as_ref()
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.value.clone());
        value
    }

    /// Edit the held value in place without restarting its TTL.
    ///
    /// The generation advances even when there is nothing fresh to edit, so
    /// an in-flight load started before the edit is not published.
    /// Returns `false` when there was nothing fresh to edit.
    pub fn update<F>(&self, edit: F) -> bool
    where
        F: FnOnce(&mut V),
    {
        let Ok(mut slot) = self.slot.write() else {
            return false;
        };
        slot.generation = slot.generation.wrapping_add(1);
        match slot.entry.as_mut() {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                edit(&mut entry.value);
                true
            }
            _ => false,
        }
    }

    /// Drop the held value.
    pub fn invalidate(&self) {
        if let Ok(mut slot) = self.slot.write() {
            slot.entry = None;
            slot.generation = slot.generation.wrapping_add(1);
        }
    }
}

impl<V: Clone> std::fmt::Debug for TimedSnapshot<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fresh = self.get().is_some();
        f.debug_struct("TimedSnapshot")
            .field("ttl", &self.ttl)
            .field("fresh", &fresh)
            .finish()
    }
}
