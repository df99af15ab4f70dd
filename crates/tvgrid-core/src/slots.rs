//! Persisted slot bindings and launcher settings.
//!
//! Bindings live under `slot_<position>` keys. Nothing is validated at write
//! time; stale package ids are detected when the grid is built.

use crate::config::{
    DEFAULT_COLUMNS, DEFAULT_MARGIN, DEFAULT_ROWS, DisplayFlags, GridConfig, MAX_COLUMNS, MAX_ROWS,
};
use crate::error::Result;
use crate::prefs::PrefStore;

pub const KEY_FIRST_LAUNCH_DONE: &str = "first_launch_done";
pub const KEY_SHOW_NAMES: &str = "show_names";
pub const KEY_SHOW_DATE: &str = "show_date";
pub const KEY_SHOW_BATTERY: &str = "show_battery";
pub const KEY_KEEP_SCREEN_ON: &str = "keep_screen_on";
pub const KEY_ICONS_LOCKED: &str = "icons_locked";
/// Column count.
pub const KEY_GRID_X: &str = "grid_x";
/// Row count.
pub const KEY_GRID_Y: &str = "grid_y";
pub const KEY_MARGIN_X: &str = "margin_x";
pub const KEY_MARGIN_Y: &str = "margin_y";

/// Preference key for the binding at `position`.
pub fn slot_key(position: usize) -> String {
    format!("slot_{position}")
}

/// Slot bindings and settings on top of a [`PrefStore`].
#[derive(Debug)]
pub struct SlotStore<P> {
    prefs: P,
}

impl<P: PrefStore> SlotStore<P> {
    pub fn new(prefs: P) -> Self {
        Self { prefs }
    }

    pub fn prefs(&self) -> &P {
        &self.prefs
    }

    /// Package bound at `position`, if any.
    pub fn get(&self, position: usize) -> Option<String> {
        self.prefs
            .get_string(&slot_key(position))
            .filter(|p| !p.is_empty())
    }

    /// Bind `position` to `package_id`, or clear it with `None`.
    pub fn set(&mut self, position: usize, package_id: Option<&str>) -> Result<()> {
        let key = slot_key(position);
        match package_id.filter(|p| !p.is_empty()) {
            Some(p) => {
                log::debug!("Binding {key} -> {p}");
                self.prefs.put_string(&key, p)
            },
            None => {
                log::debug!("Clearing {key}");
                self.prefs.remove(&key)
            },
        }
    }

    pub fn first_launch_done(&self) -> bool {
        self.prefs.get_bool(KEY_FIRST_LAUNCH_DONE, false)
    }

    pub fn mark_first_launch_done(&mut self) -> Result<()> {
        self.prefs.put_bool(KEY_FIRST_LAUNCH_DONE, true)
    }

    /// Grid settings as stored, capped at the maximum dimensions.
    /// `SlotGrid::build` raises them to the minimums.
    pub fn grid_config(&self) -> GridConfig {
        GridConfig {
            rows: read_count(&self.prefs, KEY_GRID_Y, DEFAULT_ROWS, MAX_ROWS),
            columns: read_count(&self.prefs, KEY_GRID_X, DEFAULT_COLUMNS, MAX_COLUMNS),
            margin_x: read_margin(&self.prefs, KEY_MARGIN_X),
            margin_y: read_margin(&self.prefs, KEY_MARGIN_Y),
            show_names: self.prefs.get_bool(KEY_SHOW_NAMES, true),
        }
    }

    pub fn save_grid_config(&mut self, config: &GridConfig) -> Result<()> {
        self.prefs.put_int(KEY_GRID_Y, config.rows as i64)?;
        self.prefs.put_int(KEY_GRID_X, config.columns as i64)?;
        self.prefs.put_int(KEY_MARGIN_X, i64::from(config.margin_x))?;
        self.prefs.put_int(KEY_MARGIN_Y, i64::from(config.margin_y))?;
        self.prefs.put_bool(KEY_SHOW_NAMES, config.show_names)
    }

    pub fn display_flags(&self) -> DisplayFlags {
        DisplayFlags {
            show_date: self.prefs.get_bool(KEY_SHOW_DATE, false),
            show_battery: self.prefs.get_bool(KEY_SHOW_BATTERY, false),
            keep_screen_on: self.prefs.get_bool(KEY_KEEP_SCREEN_ON, false),
            icons_locked: self.prefs.get_bool(KEY_ICONS_LOCKED, false),
        }
    }

    pub fn save_display_flags(&mut self, flags: &DisplayFlags) -> Result<()> {
        self.prefs.put_bool(KEY_SHOW_DATE, flags.show_date)?;
        self.prefs.put_bool(KEY_SHOW_BATTERY, flags.show_battery)?;
        self.prefs.put_bool(KEY_KEEP_SCREEN_ON, flags.keep_screen_on)?;
        self.prefs.put_bool(KEY_ICONS_LOCKED, flags.icons_locked)
    }
}

// Negative counts become 0 and are then raised by the grid.
fn read_count<P: PrefStore>(prefs: &P, key: &str, default: usize, max: usize) -> usize {
    usize::try_from(prefs.get_int(key, default as i64))
        .unwrap_or(0)
        .min(max)
}

fn read_margin<P: PrefStore>(prefs: &P, key: &str) -> u32 {
    u32::try_from(prefs.get_int(key, i64::from(DEFAULT_MARGIN))).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryPrefs;

    fn store() -> SlotStore<MemoryPrefs> {
        SlotStore::new(MemoryPrefs::new())
    }

    #[test]
    fn slot_key_scheme() {
        assert_eq!(slot_key(0), "slot_0");
        assert_eq!(slot_key(14), "slot_14");
    }

    #[test]
    fn set_then_get() {
        let mut s = store();
        s.set(2, Some("com.android.chrome")).unwrap();
        assert_eq!(s.get(2).as_deref(), Some("com.android.chrome"));
        assert_eq!(
            s.prefs().get_string("slot_2").as_deref(),
            Some("com.android.chrome")
        );
    }

    #[test]
    fn clear_removes_key() {
        let mut s = store();
        s.set(2, Some("com.android.chrome")).unwrap();
        s.set(2, None).unwrap();
        assert_eq!(s.get(2), None);
        assert!(!s.prefs().contains("slot_2"));
    }

    #[test]
    fn empty_string_counts_as_clear() {
        let mut s = store();
        s.set(1, Some("com.a")).unwrap();
        s.set(1, Some("")).unwrap();
        assert_eq!(s.get(1), None);
    }

    #[test]
    fn no_validation_on_write() {
        let mut s = store();
        s.set(40, Some("not.installed.anywhere")).unwrap();
        assert_eq!(s.get(40).as_deref(), Some("not.installed.anywhere"));
    }

    #[test]
    fn first_launch_flag() {
        let mut s = store();
        assert!(!s.first_launch_done());
        s.mark_first_launch_done().unwrap();
        assert!(s.first_launch_done());
    }

    #[test]
    fn grid_config_defaults() {
        assert_eq!(store().grid_config(), GridConfig::default());
    }

    #[test]
    fn grid_config_roundtrip() {
        let mut s = store();
        let g = GridConfig {
            rows: 2,
            columns: 6,
            margin_x: 10,
            margin_y: 0,
            show_names: false,
        };
        s.save_grid_config(&g).unwrap();
        assert_eq!(s.grid_config(), g);
        assert_eq!(s.prefs().get_int(KEY_GRID_X, 0), 6);
        assert_eq!(s.prefs().get_int(KEY_GRID_Y, 0), 2);
    }

    #[test]
    fn negative_dimensions_read_as_zero() {
        let mut prefs = MemoryPrefs::new();
        prefs.put_int(KEY_GRID_X, -3).unwrap();
        prefs.put_int(KEY_MARGIN_Y, -1).unwrap();
        let g = SlotStore::new(prefs).grid_config();
        assert_eq!(g.columns, 0);
        assert_eq!(g.margin_y, 0);
        assert_eq!(g.clamped().columns, 2);
    }

    #[test]
    fn huge_dimensions_read_as_maximum() {
        let mut prefs = MemoryPrefs::new();
        prefs.put_int(KEY_GRID_X, i64::MAX).unwrap();
        prefs.put_int(KEY_GRID_Y, 1_000_000).unwrap();
        let g = SlotStore::new(prefs).grid_config();
        assert_eq!(g.columns, MAX_COLUMNS);
        assert_eq!(g.rows, MAX_ROWS);
    }

    #[test]
    fn display_flags_roundtrip() {
        let mut s = store();
        assert_eq!(s.display_flags(), DisplayFlags::default());
        let flags = DisplayFlags {
            show_date: true,
            show_battery: false,
            keep_screen_on: true,
            icons_locked: true,
        };
        s.save_display_flags(&flags).unwrap();
        assert_eq!(s.display_flags(), flags);
    }
}
