//! Read access to the losses a training loop reports for one step.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use ahash::AHashMap;

/// A mapping from loss name to the value reported for the current step.
pub trait LossSnapshot {
    fn loss(&self, name: &str) -> Option<f64>;

    fn contains(&self, name: &str) -> bool {
        self.loss(name).is_some()
    }
}

impl<S: BuildHasher> LossSnapshot for HashMap<String, f64, S> {
    fn loss(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl LossSnapshot for AHashMap<String, f64> {
    fn loss(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl LossSnapshot for BTreeMap<String, f64> {
    fn loss(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl LossSnapshot for [(&str, f64)] {
    fn loss(&self, name: &str) -> Option<f64> {
        self.iter()
            .find(|(key, _)| *key == name)
            .map(|&(_, value)| value)
    }
}

impl<const N: usize> LossSnapshot for [(&str, f64); N] {
    fn loss(&self, name: &str) -> Option<f64> {
        self.as_slice().loss(name)
    }
}

impl LossSnapshot for Vec<(String, f64)> {
    fn loss(&self, name: &str) -> Option<f64> {
        self.iter()
            .find(|(key, _)| key == name)
            .map(|&(_, value)| value)
    }
}

impl<T: LossSnapshot + ?Sized> LossSnapshot for &T {
    fn loss(&self, name: &str) -> Option<f64> {
        (**self).loss(name)
    }
}

/// Something that can report its current losses, typically the model being trained.
pub trait LossSource {
    type Snapshot: LossSnapshot;

    fn current_losses(&self) -> Self::Snapshot;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_snapshots() {
        let mut std_map = HashMap::new();
        std_map.insert("train".to_string(), 0.5);
        assert_eq!(std_map.loss("train"), Some(0.5));
        assert_eq!(std_map.loss("val"), None);

        let mut ahash_map = AHashMap::new();
        ahash_map.insert("train".to_string(), 0.25);
        assert_eq!(ahash_map.loss("train"), Some(0.25));

        let mut btree_map = BTreeMap::new();
        btree_map.insert("val".to_string(), 1.5);
        assert!(btree_map.contains("val"));
        assert!(!btree_map.contains("train"));
    }

    #[test]
    fn test_pair_snapshots() {
        let pairs = [("train", 0.5), ("val", 0.75)];
        assert_eq!(pairs.loss("val"), Some(0.75));
        assert_eq!(pairs[..].loss("train"), Some(0.5));
        assert_eq!(pairs.loss("test"), None);

        let owned = vec![("train".to_string(), 2.0)];
        assert_eq!(owned.loss("train"), Some(2.0));
    }
}
