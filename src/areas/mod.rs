//! Filesystem-facing components
//!
//! - `content_loader`: Reading and classifying a single file
//! - `model_builder`: Input validation and orchestration of a whole comparison
//! - `workspace`: Breadth-first listing of the files under one root

pub mod content_loader;
pub mod model_builder;
pub mod workspace;
