//! IIS-cut separation on the alternative LP.
//!
//! All drivers fix a starting set of indicator columns through a
//! [`FixGuard`](crate::altlp::FixGuard), extend it to a cover of infeasible
//! subsystems and emit one cut per subsystem that the reference solution
//! violates. Column bounds are restored on every exit path.

mod cover;
mod debug;
mod enforce;
mod objective;
mod rounding;

pub use cover::{extend_to_cover, CoverOutcome, CoverParams, CoverSet};
pub use debug::lp_bounds_clean;
#[cfg(feature = "iis-check")]
pub use debug::iis_is_infeasible;
pub use enforce::{check_alt_lp_feasibility, enforce_cuts};
pub use objective::{set_alt_lp_obj, set_alt_lp_obj_zero, OBJ_EPSILON};
pub use rounding::separate_iis_rounding;
