//! Shared diff engine
//!
//! - `diff_algorithm`: Myers' greedy shortest-edit-script algorithm over any
//!   sequence of comparable units
//! - `change_run`: grouping of edits into change runs, plus the line and
//!   code-point entry points used by the comparison and alignment layers
//!
//! Lines and characters go through the same algorithm; only the unit differs.

pub mod change_run;
pub mod diff_algorithm;
