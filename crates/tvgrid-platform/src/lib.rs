//! Platform services consumed by the launcher core.
//!
//! The core only talks to the traits in [`services`]. The desktop build
//! backs them with a TOML manifest of installed applications and a process
//! launcher.

mod manifest;
mod process;
pub mod services;

pub use manifest::{AppManifest, ManifestApp, ManifestDirectory};
pub use process::ProcessLauncher;
pub use services::*;
