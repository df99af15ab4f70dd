//! Grid and launcher configuration.
//!
//! `GridConfig` and `DisplayFlags` are user settings persisted in the
//! preference store and read on every grid build. `LauncherConfig` is the
//! process-level TOML file naming where things live.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Smallest usable column count.
pub const MIN_COLUMNS: usize = 2;
/// Smallest usable row count.
pub const MIN_ROWS: usize = 1;
/// Largest column count a grid is built with.
pub const MAX_COLUMNS: usize = 16;
/// Largest row count a grid is built with.
pub const MAX_ROWS: usize = 16;

pub const DEFAULT_COLUMNS: usize = 5;
pub const DEFAULT_ROWS: usize = 3;
/// Default cell margin, in density-independent pixels.
pub const DEFAULT_MARGIN: u32 = 5;

/// Dimensions and presentation of the shortcut grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub rows: usize,
    pub columns: usize,
    /// Horizontal margin around each cell (dp).
    pub margin_x: u32,
    /// Vertical margin around each cell (dp).
    pub margin_y: u32,
    /// Whether application names are drawn under icons.
    pub show_names: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            margin_x: DEFAULT_MARGIN,
            margin_y: DEFAULT_MARGIN,
            show_names: true,
        }
    }
}

impl GridConfig {
    /// Return a copy with rows in `MIN_ROWS..=MAX_ROWS` and columns in
    /// `MIN_COLUMNS..=MAX_COLUMNS`.
    pub fn clamped(self) -> Self {
        Self {
            rows: self.rows.clamp(MIN_ROWS, MAX_ROWS),
            columns: self.columns.clamp(MIN_COLUMNS, MAX_COLUMNS),
            ..self
        }
    }

    /// Total number of slots (`rows * columns`, saturating).
    pub fn slot_count(&self) -> usize {
        self.rows.saturating_mul(self.columns)
    }
}

/// Status-area and behaviour toggles stored next to the grid settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplayFlags {
    pub show_date: bool,
    pub show_battery: bool,
    pub keep_screen_on: bool,
    /// Bound slots cannot be reassigned or cleared while set.
    pub icons_locked: bool,
}

/// Process-level launcher configuration (`tvgrid.toml`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LauncherConfig {
    /// Package identifier of the launcher itself; excluded from discovery.
    #[serde(default = "default_host_package")]
    pub host_package: String,
    /// JSON file holding slot bindings and settings.
    #[serde(default = "default_prefs_path")]
    pub prefs_path: PathBuf,
    /// TOML manifest describing the installed applications.
    #[serde(default = "default_manifest_path")]
    pub manifest_path: PathBuf,
    /// Overrides the built-in first-run candidate list when present.
    #[serde(default)]
    pub default_apps: Option<Vec<String>>,
}

fn default_host_package() -> String {
    "org.tvgrid.launcher".to_string()
}
fn default_prefs_path() -> PathBuf {
    PathBuf::from("tvgrid-prefs.json")
}
fn default_manifest_path() -> PathBuf {
    PathBuf::from("apps.toml")
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            host_package: default_host_package(),
            prefs_path: default_prefs_path(),
            manifest_path: default_manifest_path(),
            default_apps: None,
        }
    }
}

impl LauncherConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration file. Relative paths inside the file are
    /// resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&text)?;
        if let Some(base) = path.parent() {
            config.prefs_path = rebase(base, &config.prefs_path);
            config.manifest_path = rebase(base, &config.manifest_path);
        }
        log::debug!("Loaded launcher config from {}", path.display());
        Ok(config)
    }
}

fn rebase(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_defaults_match_five_by_three() {
        let g = GridConfig::default();
        assert_eq!(g.columns, 5);
        assert_eq!(g.rows, 3);
        assert_eq!(g.slot_count(), 15);
        assert!(g.show_names);
    }

    #[test]
    fn clamp_raises_small_dimensions() {
        let g = GridConfig {
            rows: 0,
            columns: 1,
            ..GridConfig::default()
        }
        .clamped();
        assert_eq!(g.rows, MIN_ROWS);
        assert_eq!(g.columns, MIN_COLUMNS);
    }

    #[test]
    fn clamp_keeps_valid_dimensions_and_margins() {
        let g = GridConfig {
            rows: 4,
            columns: 7,
            margin_x: 12,
            margin_y: 3,
            show_names: false,
        };
        assert_eq!(g.clamped(), g);
    }

    #[test]
    fn clamp_caps_large_dimensions() {
        let g = GridConfig {
            rows: usize::MAX,
            columns: 100_000,
            ..GridConfig::default()
        };
        assert_eq!(g.slot_count(), usize::MAX);
        let g = g.clamped();
        assert_eq!((g.rows, g.columns), (MAX_ROWS, MAX_COLUMNS));
        assert_eq!(g.slot_count(), MAX_ROWS * MAX_COLUMNS);
    }

    #[test]
    fn launcher_config_empty_uses_defaults() {
        let c = LauncherConfig::from_toml("").unwrap();
        assert_eq!(c, LauncherConfig::default());
    }

    #[test]
    fn launcher_config_parses_fields() {
        let c = LauncherConfig::from_toml(
            r#"
host_package = "com.example.home"
prefs_path = "/var/lib/home/prefs.json"
default_apps = ["com.example.a", "com.example.b"]
"#,
        )
        .unwrap();
        assert_eq!(c.host_package, "com.example.home");
        assert_eq!(c.prefs_path, PathBuf::from("/var/lib/home/prefs.json"));
        assert_eq!(c.manifest_path, PathBuf::from("apps.toml"));
        assert_eq!(
            c.default_apps.as_deref(),
            Some(&["com.example.a".to_string(), "com.example.b".to_string()][..])
        );
    }

    #[test]
    fn launcher_config_rejects_bad_toml() {
        assert!(LauncherConfig::from_toml("host_package = [").is_err());
    }

    #[test]
    fn load_rebases_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tvgrid.toml");
        std::fs::write(&path, "manifest_path = \"apps/installed.toml\"\n").unwrap();
        let c = LauncherConfig::load(&path).unwrap();
        assert_eq!(c.manifest_path, dir.path().join("apps/installed.toml"));
        assert_eq!(c.prefs_path, dir.path().join("tvgrid-prefs.json"));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = LauncherConfig::load(Path::new("/nonexistent/tvgrid.toml")).unwrap_err();
        assert!(matches!(err, crate::error::LauncherError::Io(_)));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn clamped_always_within_bounds(rows in any::<usize>(), columns in any::<usize>()) {
                let g = GridConfig { rows, columns, ..GridConfig::default() }.clamped();
                prop_assert!((MIN_ROWS..=MAX_ROWS).contains(&g.rows));
                prop_assert!((MIN_COLUMNS..=MAX_COLUMNS).contains(&g.columns));
                prop_assert_eq!(g.clamped(), g, "clamping must be idempotent");
            }
        }
    }
}
