//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Search request, match and error model
//! - Filename glob filters
//! - Strict UTF-8 file reading
//! - Grouping of matches by extension
//! - Rendering functions for different output formats
//! - Path normalization utilities

pub mod file_reader;
pub mod filter;
pub mod group;
pub mod model;
pub mod paths;
pub mod render;
