//! Activity id interning.
//!
//! Maps string activity ids to dense indices assigned in input order, so the
//! passes run over plain vectors and tie-breaking by input position is free.

use rustc_hash::FxHashMap;

/// Dense activity index (position in the input list).
pub type ActivityIdx = usize;

/// Bidirectional mapping between activity ids and their input positions.
#[derive(Debug, Clone, Default)]
pub struct ActivityIndex {
    to_idx: FxHashMap<String, ActivityIdx>,
    from_idx: Vec<String>,
}

impl ActivityIndex {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_idx: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            from_idx: Vec::with_capacity(capacity),
        }
    }

    /// Register a new id at the next position.
    ///
    /// Returns `None` if the id is already registered; the index is left unchanged.
    pub fn insert(&mut self, id: &str) -> Option<ActivityIdx> {
        if self.to_idx.contains_key(id) {
            return None;
        }
        let idx = self.from_idx.len();
        self.from_idx.push(id.to_string());
        self.to_idx.insert(id.to_string(), idx);
        Some(idx)
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<ActivityIdx> {
        self.to_idx.get(id).copied()
    }

    #[inline]
    pub fn resolve(&self, idx: ActivityIdx) -> Option<&str> {
        self.from_idx.get(idx).map(|s| s.as_str())
    }

    /// Resolve a sequence of indices to owned ids, skipping unknown indices.
    pub fn resolve_all(&self, indices: &[ActivityIdx]) -> Vec<String> {
        indices
            .iter()
            .filter_map(|&idx| self.resolve(idx))
            .map(str::to_string)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.from_idx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.from_idx.is_empty()
    }
}
