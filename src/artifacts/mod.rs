//! Comparison data structures and algorithms
//!
//! - `alignment`: Side-by-side rows and character-level highlighting
//! - `comparison`: Options, items, results and input errors
//! - `content`: Text / binary / oversized classification of file bytes
//! - `core`: Shared output utilities (pager wrapper)
//! - `diff`: Shared line and character diff engine (Myers' diff)

pub mod alignment;
pub mod comparison;
pub mod content;
pub mod core;
pub mod diff;
