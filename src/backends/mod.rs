//! Backends module - Filesystem traversal and external sinks
//!
//! Provides:
//! - search: Recursive word search with walkdir
//! - clipboard: Export of matched contents to the system clipboard

pub mod clipboard;
pub mod search;
