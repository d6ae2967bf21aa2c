//! Cuts, clauses and the global cut pool.

mod cut;
mod pool;

pub use cut::{Clause, CutSource, LinearCut};
pub use pool::{CutPool, CutPoolStats, PoolEntry, DEFAULT_CAPACITY};
