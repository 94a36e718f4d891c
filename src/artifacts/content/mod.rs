//! File content classification
//!
//! Decides whether raw bytes are shown as text, flagged as binary, or
//! skipped for exceeding the configured size limit.

pub mod loaded_content;
