//! Directory and file comparison core.
//!
//! A comparison starts from [`CompareOptions`] and ends in one
//! [`ComparisonResult`]: every item carries its status, its line counts and,
//! on demand, the side-by-side rows a renderer draws.

pub mod areas;
pub mod artifacts;
pub mod commands;

pub use areas::model_builder::{ModelBuilder, build};
pub use artifacts::alignment::aligned_row::{AlignedRow, LeftKind, RightKind, Segment, SegmentKind};
pub use artifacts::comparison::error::{InputError, Side};
pub use artifacts::comparison::item::{ComparisonItem, ItemStatus};
pub use artifacts::comparison::options::{CompareOptions, DisplayMode};
pub use artifacts::comparison::result::{ComparisonResult, ResultKind};
