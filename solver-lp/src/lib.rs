//! # solver-lp
//!
//! A small LP backend abstraction and a dense bounded simplex solver.
//!
//! The [`LpInterface`] trait is what constraint handlers program against;
//! [`DenseSimplex`] is the bundled implementation, suited to auxiliary LPs
//! with up to a few hundred rows.
//!
//! ```ignore
//! use solver_lp::{DenseSimplex, LpColumn, LpInterface};
//!
//! let mut lp = DenseSimplex::default();
//! lp.add_rows(&[1.0], &[f64::INFINITY])?;
//! lp.add_cols(&[LpColumn::new(1.0, 0.0, 10.0).with_entry(0, 1.0)])?;
//! lp.solve_primal()?;
//! assert!(lp.is_optimal());
//! ```

#![warn(missing_docs)]

pub mod data;
pub mod error;
pub mod lpi;
pub mod settings;
pub mod simplex;

pub use data::{LpData, SparseCsc};
pub use error::{LpError, LpResult};
pub use lpi::{LpColumn, LpInterface, LpParam, SolQuality};
pub use settings::SimplexSettings;
pub use simplex::{DenseSimplex, SimplexStatus};
