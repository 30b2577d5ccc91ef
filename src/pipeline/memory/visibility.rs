//! Latched "ever seen" flags for tracked entities.

/// Per-entity visibility, OR-accumulated across ticks.
///
/// Once an entity has been observed its flag stays set for the rest of the
/// session. The mask grows to fit the longest observation seen so far.
#[derive(Debug, Clone, Default)]
pub struct CumulativeVisibility {
    seen: Vec<bool>,
}

impl CumulativeVisibility {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mask for a known number of entities, all unseen.
    #[must_use]
    pub fn with_len(len: usize) -> Self {
        Self {
            seen: vec![false; len],
        }
    }

    /// Folds the current tick's visibility flags into the mask.
    pub fn observe(&mut self, visible: &[bool]) {
        if visible.len() > self.seen.len() {
            self.seen.resize(visible.len(), false);
        }
        for (seen, &now) in self.seen.iter_mut().zip(visible) {
            *seen |= now;
        }
    }

    #[must_use]
    pub fn is_seen(&self, index: usize) -> bool {
        self.seen.get(index).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    #[must_use]
    pub fn seen_count(&self) -> usize {
        self.seen.iter().filter(|&&s| s).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_latch() {
        let mut mask = CumulativeVisibility::with_len(3);
        mask.observe(&[true, false, false]);
        mask.observe(&[false, false, true]);

        assert!(mask.is_seen(0));
        assert!(!mask.is_seen(1));
        assert!(mask.is_seen(2));
        assert_eq!(mask.seen_count(), 2);
    }

    #[test]
    fn test_mask_grows() {
        let mut mask = CumulativeVisibility::new();
        mask.observe(&[false, true]);
        assert_eq!(mask.len(), 2);
        mask.observe(&[]);
        assert!(mask.is_seen(1));
        assert!(!mask.is_seen(5));
    }
}
