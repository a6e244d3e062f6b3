//! Best score persistence
//!
//! A single integer stored as plain text, read once at startup and written
//! once per game over.

use crate::platform::KeyValueStore;

/// The best score seen on this device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestScore(pub u64);

impl BestScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "bbash_high";

    /// Load from storage; missing or unparseable values read as 0
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let value = store
            .get(Self::STORAGE_KEY)
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .unwrap_or(0);
        log::info!("Best score: {}", value);
        Self(value)
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        store.set(Self::STORAGE_KEY, &self.0.to_string());
        log::info!("Best score saved ({})", self.0);
    }

    /// Raise to `score` if higher; returns whether it changed
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.0 {
            self.0 = score;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_missing_or_garbage_is_zero() {
        let mut store = MemoryStore::new();
        assert_eq!(BestScore::load(&store), BestScore(0));
        store.set(BestScore::STORAGE_KEY, "not a number");
        assert_eq!(BestScore::load(&store), BestScore(0));
        store.set(BestScore::STORAGE_KEY, "-5");
        assert_eq!(BestScore::load(&store), BestScore(0));
    }

    #[test]
    fn test_round_trip_through_store() {
        let mut store = MemoryStore::new();
        BestScore(4200).save(&mut store);
        assert_eq!(store.get("bbash_high").as_deref(), Some("4200"));
        assert_eq!(BestScore::load(&store), BestScore(4200));
    }

    #[test]
    fn test_record_keeps_max() {
        let mut best = BestScore(1000);
        assert!(!best.record(500));
        assert!(best.record(3000));
        assert_eq!(best.0, 3000);
    }
}
