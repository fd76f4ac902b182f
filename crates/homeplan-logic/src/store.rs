//! Bounded, keyed retention lists.
//!
//! Generated and imported plans (and shared creations) are kept as an
//! ordered list capped at a fixed size: re-adding a key moves it to the
//! newest slot, and the oldest entry is evicted once the cap is exceeded.
//! Lists round-trip through JSON text; storage itself is the caller's job.

use crate::error::PlanError;
use crate::model::FloorPlanPreset;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Number of generated/imported plans retained.
pub const CUSTOM_PLAN_CAPACITY: usize = 5;

/// Something with a stable string key.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for FloorPlanPreset {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Ordered list, oldest first, holding at most `capacity` unique keys.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedList<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T: Keyed> BoundedList<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
        }
    }

    /// Add `item` as the newest entry, replacing any entry with the same
    /// key. Returns entries evicted to respect the cap.
    pub fn push(&mut self, item: T) -> Vec<T> {
        self.items.retain(|existing| existing.key() != item.key());
        self.items.push(item);
        let excess = self.items.len().saturating_sub(self.capacity);
        self.items.drain(..excess).collect()
    }

    pub fn remove(&mut self, key: &str) -> Option<T> {
        let index = self.items.iter().position(|i| i.key() == key)?;
        Some(self.items.remove(index))
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.items.iter().find(|i| i.key() == key)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T: Keyed + Serialize> BoundedList<T> {
    pub fn to_json(&self) -> Result<String, PlanError> {
        Ok(serde_json::to_string(&self.items)?)
    }
}

impl<T: Keyed + DeserializeOwned> BoundedList<T> {
    /// Restore a persisted list. Unreadable input yields an empty list;
    /// an over-long list keeps its newest `capacity` entries.
    pub fn from_json(json: &str, capacity: usize) -> Self {
        let mut list = Self::new(capacity);
        match serde_json::from_str::<Vec<T>>(json) {
            Ok(items) => {
                for item in items {
                    list.push(item);
                }
            }
            Err(e) => log::warn!("discarding unreadable persisted list: {}", e),
        }
        list
    }
}

impl BoundedList<FloorPlanPreset> {
    /// Empty store for generated and imported plans.
    pub fn custom_plans() -> Self {
        Self::new(CUSTOM_PLAN_CAPACITY)
    }
}

/// Generated and imported plans, newest last.
pub type CustomPlanStore = BoundedList<FloorPlanPreset>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator;

    fn plan(id: &str) -> FloorPlanPreset {
        let mut p = generator::generate(1).unwrap();
        p.id = id.into();
        p
    }

    #[test]
    fn test_oldest_evicted_first() {
        let mut store = CustomPlanStore::custom_plans();
        for i in 0..5 {
            assert!(store.push(plan(&format!("p{}", i))).is_empty());
        }
        let evicted = store.push(plan("p5"));
        assert_eq!(evicted.len(), 1);
        assert_eq!(evicted[0].id, "p0");
        let ids: Vec<&str> = store.items().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3", "p4", "p5"]);
    }

    #[test]
    fn test_same_id_replaces_and_moves_to_newest() {
        let mut store = CustomPlanStore::custom_plans();
        store.push(plan("a"));
        store.push(plan("b"));
        let mut renamed = plan("a");
        renamed.name = "Renamed".into();
        store.push(renamed);
        assert_eq!(store.len(), 2);
        assert_eq!(store.items()[1].name, "Renamed");
    }

    #[test]
    fn test_remove() {
        let mut store = CustomPlanStore::custom_plans();
        store.push(plan("a"));
        assert!(store.remove("a").is_some());
        assert!(store.remove("a").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_json_round_trip_preserves_plans() {
        let mut store = CustomPlanStore::custom_plans();
        store.push(generator::generate(21).unwrap());
        store.push(crate::presets::mansion().unwrap());
        let json = store.to_json().unwrap();
        let restored = CustomPlanStore::from_json(&json, CUSTOM_PLAN_CAPACITY);
        assert_eq!(restored, store);
    }

    #[test]
    fn test_corrupt_json_gives_empty_store() {
        let restored = CustomPlanStore::from_json("[{\"id\":", CUSTOM_PLAN_CAPACITY);
        assert!(restored.is_empty());
        assert_eq!(restored.capacity(), CUSTOM_PLAN_CAPACITY);
    }
}
