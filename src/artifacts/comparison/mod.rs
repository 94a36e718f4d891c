//! Comparison model
//!
//! The types a comparison run produces, plus the per-pair comparator:
//!
//! - `options`: inputs of a run (paths, render settings, limits)
//! - `error`: fatal input errors
//! - `file_path`: relative path keys shared by both trees
//! - `item`: one compared path, its status and line counts
//! - `result`: the aggregated result with totals

pub mod error;
pub mod file_path;
pub mod item;
pub mod options;
pub mod result;
