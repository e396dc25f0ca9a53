// File: crates/chart-core/src/join.rs
// Summary: Keyed reconciliation of an existing mark set against new data (enter/update/exit).

use std::collections::HashMap;
use std::hash::Hash;

/// Outcome of matching old keys against new keys.
///
/// Indices refer to positions in the `old` and `new` slices passed to
/// [`reconcile`]. `enter` and `update` are in new-data order, `exit` in
/// old-mark order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JoinPlan {
    /// New datum indices with no matching mark.
    pub enter: Vec<usize>,
    /// (old mark index, new datum index) pairs sharing a key.
    pub update: Vec<(usize, usize)>,
    /// Old mark indices whose key is gone.
    pub exit: Vec<usize>,
}

impl JoinPlan {
    pub fn is_noop(&self) -> bool {
        self.enter.is_empty() && self.exit.is_empty()
    }
}

/// Match marks to data by key. A key claims at most one mark: when a key
/// repeats among the old marks the later copies exit, and when it repeats
/// among the new data the later copies enter.
pub fn reconcile<K: Eq + Hash>(old: &[K], new: &[K]) -> JoinPlan {
    let mut by_key: HashMap<&K, usize> = HashMap::with_capacity(old.len());
    let mut plan = JoinPlan::default();
    // repeated old keys exit immediately; marking them claimed keeps the sweep from adding them twice
    let mut claimed = vec![false; old.len()];
    for (i, k) in old.iter().enumerate() {
        if by_key.contains_key(k) {
            plan.exit.push(i);
            claimed[i] = true;
        } else {
            by_key.insert(k, i);
        }
    }
    for (j, k) in new.iter().enumerate() {
        match by_key.remove(k) {
            Some(i) => {
                claimed[i] = true;
                plan.update.push((i, j));
            }
            None => plan.enter.push(j),
        }
    }
    for (i, &c) in claimed.iter().enumerate() {
        if !c {
            plan.exit.push(i);
        }
    }
    plan.exit.sort_unstable();
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_enter_update_exit() {
        let plan = reconcile(&["A", "B", "C"], &["C", "D", "A"]);
        assert_eq!(plan.update, vec![(2, 0), (0, 2)]);
        assert_eq!(plan.enter, vec![1]);
        assert_eq!(plan.exit, vec![1]);
        assert!(!plan.is_noop());
    }

    #[test]
    fn identical_keys_only_update() {
        let plan = reconcile(&[1, 2, 3], &[1, 2, 3]);
        assert_eq!(plan.update, vec![(0, 0), (1, 1), (2, 2)]);
        assert!(plan.is_noop());
    }

    #[test]
    fn empty_sides() {
        let plan = reconcile::<&str>(&[], &["x", "y"]);
        assert_eq!(plan.enter, vec![0, 1]);
        let plan = reconcile(&["x", "y"], &[]);
        assert_eq!(plan.exit, vec![0, 1]);
        assert!(plan.update.is_empty());
    }

    #[test]
    fn duplicate_keys_claim_once() {
        let plan = reconcile(&["a", "a", "b"], &["a", "a"]);
        assert_eq!(plan.update, vec![(0, 0)]);
        assert_eq!(plan.enter, vec![1]);
        assert_eq!(plan.exit, vec![1, 2]);
    }
}
