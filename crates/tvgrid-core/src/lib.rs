//! tvgrid core: the slot-grid launcher model.
//!
//! Discovers launchable applications, binds grid positions to them, persists
//! the bindings, seeds defaults on first run and computes the directional
//! focus graph a four-button remote needs. Rendering is left to the caller;
//! this crate has no platform dependencies beyond the service traits.

// Re-exports from the foundation crates.
pub use tvgrid_platform as platform;
pub use tvgrid_prefs as prefs;
pub use tvgrid_types::config;
pub use tvgrid_types::error;
pub use tvgrid_types::input;

pub mod catalog;
pub mod focus;
pub mod grid;
pub mod home;
pub mod seeder;
pub mod slots;
pub mod worker;
