use tvgrid_core::config::{DisplayFlags, GridConfig, MAX_COLUMNS, MAX_ROWS};

/// Screens the desktop frontend can show on top of the home grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Home,
    /// Choosing an app for `position`.
    Picker { position: usize, show_delete: bool },
    /// Full application list; confirm launches.
    AppList,
    Settings,
}

/// Rows of the settings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsItem {
    Columns,
    Rows,
    ShowNames,
    ShowDate,
    ShowBattery,
    KeepScreenOn,
    IconsLocked,
}

pub const SETTINGS_ITEMS: [SettingsItem; 7] = [
    SettingsItem::Columns,
    SettingsItem::Rows,
    SettingsItem::ShowNames,
    SettingsItem::ShowDate,
    SettingsItem::ShowBattery,
    SettingsItem::KeepScreenOn,
    SettingsItem::IconsLocked,
];

impl SettingsItem {
    pub fn label(self) -> &'static str {
        match self {
            Self::Columns => "Columns",
            Self::Rows => "Rows",
            Self::ShowNames => "Show app names",
            Self::ShowDate => "Show date",
            Self::ShowBattery => "Show battery",
            Self::KeepScreenOn => "Keep screen on",
            Self::IconsLocked => "Lock home screen",
        }
    }

    /// Current value, formatted for display.
    pub fn value(self, grid: &GridConfig, flags: &DisplayFlags) -> String {
        let on_off = |b: bool| (if b { "on" } else { "off" }).to_string();
        match self {
            Self::Columns => grid.columns.to_string(),
            Self::Rows => grid.rows.to_string(),
            Self::ShowNames => on_off(grid.show_names),
            Self::ShowDate => on_off(flags.show_date),
            Self::ShowBattery => on_off(flags.show_battery),
            Self::KeepScreenOn => on_off(flags.keep_screen_on),
            Self::IconsLocked => on_off(flags.icons_locked),
        }
    }

    /// Step the setting by `delta` (+1 / -1). Toggles flip either way;
    /// counts stop at the grid maximum.
    pub fn adjust(self, grid: &mut GridConfig, flags: &mut DisplayFlags, delta: isize) {
        match self {
            Self::Columns => {
                grid.columns = grid.columns.saturating_add_signed(delta).min(MAX_COLUMNS)
            },
            Self::Rows => grid.rows = grid.rows.saturating_add_signed(delta).min(MAX_ROWS),
            Self::ShowNames => grid.show_names = !grid.show_names,
            Self::ShowDate => flags.show_date = !flags.show_date,
            Self::ShowBattery => flags.show_battery = !flags.show_battery,
            Self::KeepScreenOn => flags.keep_screen_on = !flags.keep_screen_on,
            Self::IconsLocked => flags.icons_locked = !flags.icons_locked,
        }
    }
}

/// Frontend state that lives outside the home screen controller.
#[derive(Debug)]
pub struct AppState {
    pub mode: Mode,
    /// Selected row in the picker, app list or settings screen.
    pub cursor: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            mode: Mode::Home,
            cursor: 0,
        }
    }

    pub fn enter(&mut self, mode: Mode) {
        self.mode = mode;
        self.cursor = 0;
    }

    /// Move the list cursor by `delta`, wrapping within `len` rows.
    pub fn step_cursor(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let len = len as isize;
        self.cursor = (self.cursor as isize + delta).rem_euclid(len) as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_wraps_both_ways() {
        let mut state = AppState::new();
        state.step_cursor(-1, 3);
        assert_eq!(state.cursor, 2);
        state.step_cursor(1, 3);
        assert_eq!(state.cursor, 0);
        state.step_cursor(1, 0);
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn enter_resets_cursor() {
        let mut state = AppState::new();
        state.cursor = 4;
        state.enter(Mode::Settings);
        assert_eq!(state.mode, Mode::Settings);
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn adjust_counts_and_toggles() {
        let mut grid = GridConfig::default();
        let mut flags = DisplayFlags::default();
        SettingsItem::Columns.adjust(&mut grid, &mut flags, 1);
        SettingsItem::Rows.adjust(&mut grid, &mut flags, -1);
        SettingsItem::IconsLocked.adjust(&mut grid, &mut flags, -1);
        assert_eq!((grid.columns, grid.rows), (6, 2));
        assert!(flags.icons_locked);
        assert_eq!(SettingsItem::IconsLocked.value(&grid, &flags), "on");
    }

    #[test]
    fn counts_do_not_underflow() {
        let mut grid = GridConfig {
            rows: 0,
            ..GridConfig::default()
        };
        let mut flags = DisplayFlags::default();
        SettingsItem::Rows.adjust(&mut grid, &mut flags, -1);
        assert_eq!(grid.rows, 0);
    }

    #[test]
    fn counts_stop_at_maximum() {
        let mut grid = GridConfig {
            columns: MAX_COLUMNS,
            rows: MAX_ROWS,
            ..GridConfig::default()
        };
        let mut flags = DisplayFlags::default();
        SettingsItem::Columns.adjust(&mut grid, &mut flags, 1);
        SettingsItem::Rows.adjust(&mut grid, &mut flags, 1);
        assert_eq!((grid.columns, grid.rows), (MAX_COLUMNS, MAX_ROWS));
        SettingsItem::Columns.adjust(&mut grid, &mut flags, -1);
        assert_eq!(grid.columns, MAX_COLUMNS - 1);
    }
}
