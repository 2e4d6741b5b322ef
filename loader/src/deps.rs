/// Tracks an externally supplied dependency key (a parent id, a search
/// term, a tuple of both) and reports when it changes.
///
/// The first observation only records the key; mounting a view is a
/// separate trigger from a dependency change and the two must not be
/// merged, or the initial load either fires twice or not at all.
#[derive(Debug, Clone, Default)]
pub struct DepTracker<K> {
    last: Option<K>,
}

impl<K: PartialEq> DepTracker<K> {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Records `key` and returns whether it differs from the previously
    /// observed one. Always false on the first observation.
    pub fn observe(&mut self, key: K) -> bool {
        let changed = match &self.last {
            None => false,
            Some(previous) => *previous != key,
        };
        self.last = Some(key);
        changed
    }

    /// Forgets the recorded key, so the next `observe` behaves like the
    /// first.
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn last(&self) -> Option<&K> {
        self.last.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_observation_never_signals() {
        let mut tracker = DepTracker::new();
        assert!(!tracker.observe(7u64));
    }

    #[test]
    fn equal_key_does_not_signal() {
        let mut tracker = DepTracker::new();
        tracker.observe("alpha");
        assert!(!tracker.observe("alpha"));
    }

    #[test]
    fn changed_key_signals_once_per_change() {
        let mut tracker = DepTracker::new();
        tracker.observe(1u64);
        assert!(tracker.observe(2));
        assert!(!tracker.observe(2));
        assert!(tracker.observe(1));
    }

    #[test]
    fn tuple_keys_compare_componentwise() {
        let mut tracker = DepTracker::new();
        tracker.observe((3u64, "query".to_string()));
        assert!(!tracker.observe((3, "query".to_string())));
        assert!(tracker.observe((3, "other".to_string())));
        assert!(tracker.observe((4, "other".to_string())));
    }

    #[test]
    fn unit_key_never_signals_after_mount() {
        let mut tracker = DepTracker::new();
        assert!(!tracker.observe(()));
        assert!(!tracker.observe(()));
        assert!(!tracker.observe(()));
    }

    #[test]
    fn reset_makes_next_observation_first_again() {
        let mut tracker = DepTracker::new();
        tracker.observe(1u64);
        tracker.reset();
        assert!(!tracker.observe(2));
    }
}
