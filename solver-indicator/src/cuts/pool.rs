//! Global pool of valid cuts.
//!
//! Cuts are stored under a canonical key (coefficients sorted by variable
//! and scaled by the largest magnitude), so the same IIS found from
//! different thresholds or in a different order is stored once.

use std::collections::HashMap;

use super::cut::{CutSource, LinearCut};
use crate::model::{Solution, VarId};

/// Resolution of the scaled coefficients in a pool key.
const KEY_RESOLUTION: f64 = 1e9;

/// Default number of cuts kept before removable ones are evicted.
pub const DEFAULT_CAPACITY: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CutKey {
    coefs: Vec<(VarId, i64)>,
    rhs: i64,
}

impl CutKey {
    fn of(cut: &LinearCut) -> Self {
        let scale = cut.coefs.iter().fold(0.0f64, |m, &(_, a)| m.max(a.abs()));
        let scale = if scale > 0.0 { scale } else { 1.0 };
        let quantize = |v: f64| (v / scale * KEY_RESOLUTION).round() as i64;

        let mut coefs: Vec<(VarId, i64)> = cut
            .coefs
            .iter()
            .map(|&(v, a)| (v, quantize(a)))
            .filter(|&(_, q)| q != 0)
            .collect();
        coefs.sort_unstable_by_key(|&(v, _)| v);
        Self {
            coefs,
            rhs: quantize(cut.rhs),
        }
    }
}

/// A cut stored in the pool.
#[derive(Debug, Clone)]
pub struct PoolEntry {
    /// The cut.
    pub cut: LinearCut,

    /// Pool ID, stable for the lifetime of the pool.
    pub id: usize,

    /// How often the cut was offered again after insertion.
    pub hits: usize,
}

/// Counters of the pool.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CutPoolStats {
    /// Cuts stored.
    pub added: usize,

    /// Offers rejected as already present.
    pub duplicates: usize,

    /// Removable cuts dropped to make room.
    pub evicted: usize,

    /// Cuts deleted explicitly.
    pub deleted: usize,

    /// Stored IIS cuts.
    pub iis: usize,

    /// Stored coupling rows.
    pub coupling: usize,
}

/// Cuts valid in the whole search tree.
#[derive(Debug)]
pub struct CutPool {
    entries: Vec<Option<PoolEntry>>,
    index: HashMap<CutKey, usize>,
    capacity: usize,
    n_live: usize,
    stats: CutPoolStats,
}

impl Default for CutPool {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl CutPool {
    /// Pool holding at most `capacity` cuts before evicting removable ones.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            capacity: capacity.max(1),
            n_live: 0,
            stats: CutPoolStats::default(),
        }
    }

    /// Store `cut`.
    ///
    /// Returns the pool ID and whether an identical cut was already stored
    /// (in which case its ID is returned and nothing is added).
    pub fn add(&mut self, cut: LinearCut) -> (usize, bool) {
        let key = CutKey::of(&cut);
        if let Some(&id) = self.index.get(&key) {
            if let Some(entry) = self.entries[id].as_mut() {
                entry.hits += 1;
            }
            self.stats.duplicates += 1;
            return (id, true);
        }

        if self.n_live >= self.capacity {
            self.evict_oldest_removable();
        }

        let id = self.entries.len();
        match cut.source {
            CutSource::Iis => self.stats.iis += 1,
            CutSource::Coupling => self.stats.coupling += 1,
        }
        self.entries.push(Some(PoolEntry { cut, id, hits: 0 }));
        self.index.insert(key, id);
        self.n_live += 1;
        self.stats.added += 1;
        (id, false)
    }

    fn evict_oldest_removable(&mut self) {
        let victim = self
            .entries
            .iter()
            .flatten()
            .find(|e| e.cut.removable)
            .map(|e| e.id);
        if let Some(id) = victim {
            self.remove(id);
            self.stats.evicted += 1;
            log::debug!("cut pool full, evicted cut {}", id);
        }
    }

    fn remove(&mut self, id: usize) -> bool {
        match self.entries.get_mut(id).and_then(Option::take) {
            Some(entry) => {
                self.index.remove(&CutKey::of(&entry.cut));
                self.n_live -= 1;
                true
            }
            None => false,
        }
    }

    /// Drop the cut with ID `id`.
    pub fn delete(&mut self, id: usize) {
        if self.remove(id) {
            self.stats.deleted += 1;
        }
    }

    /// Stored cut with ID `id`.
    pub fn get(&self, id: usize) -> Option<&PoolEntry> {
        self.entries.get(id).and_then(Option::as_ref)
    }

    /// Stored cuts in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PoolEntry> {
        self.entries.iter().flatten()
    }

    /// Stored cuts violated by more than `tol` at `sol`.
    pub fn violated<'a>(
        &'a self,
        sol: &'a Solution,
        tol: f64,
    ) -> impl Iterator<Item = &'a PoolEntry> + 'a {
        self.iter().filter(move |e| e.cut.is_violated(sol, tol))
    }

    /// Counters.
    pub fn stats(&self) -> &CutPoolStats {
        &self.stats
    }

    /// Number of stored cuts.
    pub fn len(&self) -> usize {
        self.n_live
    }

    /// No cut stored.
    pub fn is_empty(&self) -> bool {
        self.n_live == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iis_cut(vars: &[usize]) -> LinearCut {
        let coefs = vars.iter().map(|&v| (VarId(v), 1.0)).collect();
        LinearCut::new(coefs, vars.len() as f64 - 1.0, CutSource::Iis)
    }

    #[test]
    fn test_same_iis_stored_once() {
        let mut pool = CutPool::default();
        let (id1, dup1) = pool.add(iis_cut(&[0, 1, 2]));
        let (id2, dup2) = pool.add(iis_cut(&[2, 0, 1]));
        assert!(!dup1);
        assert!(dup2);
        assert_eq!(id1, id2);
        assert_eq!(pool.get(id1).unwrap().hits, 1);

        // a scaled copy has the same key
        let scaled = LinearCut::new(vec![(VarId(0), 2.0), (VarId(1), 2.0), (VarId(2), 2.0)], 4.0, CutSource::Iis);
        assert!(pool.add(scaled).1);

        let (id3, dup3) = pool.add(iis_cut(&[0, 1]));
        assert!(!dup3);
        assert_ne!(id1, id3);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.stats().duplicates, 2);
        assert_eq!(pool.stats().iis, 2);
    }

    #[test]
    fn test_delete_allows_readding() {
        let mut pool = CutPool::default();
        let (id, _) = pool.add(iis_cut(&[0, 1]));
        pool.delete(id);
        assert!(pool.is_empty());
        assert!(pool.get(id).is_none());
        assert_eq!(pool.stats().deleted, 1);

        let (id2, dup) = pool.add(iis_cut(&[0, 1]));
        assert!(!dup);
        assert_ne!(id, id2);
    }

    #[test]
    fn test_eviction_keeps_non_removable() {
        let mut pool = CutPool::with_capacity(2);
        let coupling = LinearCut::new(vec![(VarId(5), 1.0), (VarId(6), 10.0)], 10.0, CutSource::Coupling)
            .with_flags(false, false);
        let (keep, _) = pool.add(coupling);
        let (first, _) = pool.add(iis_cut(&[0, 1]));
        pool.add(iis_cut(&[1, 2]));

        assert_eq!(pool.len(), 2);
        assert_eq!(pool.stats().evicted, 1);
        assert!(pool.get(keep).is_some());
        assert!(pool.get(first).is_none());
    }

    #[test]
    fn test_violated_cuts() {
        let mut pool = CutPool::default();
        pool.add(iis_cut(&[0, 1]));
        pool.add(iis_cut(&[1, 2]));
        let mut sol = Solution::new(3);
        sol.set_value(VarId(0), 1.0);
        sol.set_value(VarId(1), 1.0);
        let violated: Vec<_> = pool.violated(&sol, 1e-6).collect();
        assert_eq!(violated.len(), 1);
        assert_eq!(violated[0].cut.coefs[0].0, VarId(0));
    }
}
