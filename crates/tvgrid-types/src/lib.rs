//! Foundation types for tvgrid.
//!
//! This crate contains the platform-agnostic types shared by all tvgrid
//! crates: remote-control input, grid and launcher configuration, and the
//! error type.

pub mod config;
pub mod error;
pub mod input;
