//! Side-by-side row alignment
//!
//! - `aligned_row`: segment and row types consumed by renderers
//! - `row_aligner`: pairs removed/added runs into rows and adds
//!   character-level highlighting for modified pairs

pub mod aligned_row;
pub mod row_aligner;
