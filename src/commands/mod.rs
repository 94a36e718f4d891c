//! User-facing output built on top of a finished comparison
//!
//! - `report`: plain-text rendering in split or unified layout

pub mod report;
