//! Plain-text rendering of the home grid and the overlay screens.

use std::fmt::Write as _;

use tvgrid_core::catalog::AppRecord;
use tvgrid_core::config::{DisplayFlags, GridConfig};
use tvgrid_core::focus::{FocusTarget, Peripheral};
use tvgrid_core::grid::{SlotGrid, SlotView};
use tvgrid_core::home::HomeScreen;
use tvgrid_core::platform::{AppDirectory, LaunchService};
use tvgrid_core::prefs::PrefStore;

use crate::app_state::{AppState, Mode, SETTINGS_ITEMS};

/// Characters per grid cell, excluding the focus brackets.
const CELL_WIDTH: usize = 12;

/// Render whatever the current mode shows.
pub fn render<D, P, L>(state: &AppState, home: &HomeScreen<D, P, L>) -> String
where
    D: AppDirectory + Send + Sync + ?Sized + 'static,
    P: PrefStore,
    L: LaunchService,
{
    match state.mode {
        Mode::Home => render_grid(home.grid(), home.focused(), home.flags()),
        Mode::Picker { position, .. } => {
            render_list(&format!("Pick app for slot {position}"), home.app_list(), state.cursor)
        },
        Mode::AppList => render_list("All apps", home.app_list(), state.cursor),
        Mode::Settings => render_settings(home.grid().config(), home.flags(), state.cursor),
    }
}

/// The grid with its two peripheral controls. The focused element is
/// bracketed.
pub fn render_grid(grid: &SlotGrid, focused: FocusTarget, flags: &DisplayFlags) -> String {
    let mut out = String::new();
    let lock = if flags.icons_locked { "  (locked)" } else { "" };
    let _ = writeln!(out, "{}{lock}", control(Peripheral::AllApps, focused));

    let show_names = grid.config().show_names;
    for row in grid.slots().chunks(grid.columns()) {
        let line: String = row
            .iter()
            .map(|slot| {
                let text = match slot.view() {
                    SlotView::App(record) if show_names => record.display_name.clone(),
                    SlotView::App(_) => "*".to_string(),
                    SlotView::Unresolved(package) => format!("{package}?"),
                    SlotView::AddPlaceholder => "+".to_string(),
                };
                cell(&text, focused == FocusTarget::Slot(slot.position))
            })
            .collect();
        let _ = writeln!(out, "{}", line.trim_end());
    }

    let _ = writeln!(out, "{}", control(Peripheral::Settings, focused));
    out
}

pub fn render_list(title: &str, apps: &[AppRecord], cursor: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {title} ==");
    if apps.is_empty() {
        let _ = writeln!(out, "  (loading)");
    }
    for (i, app) in apps.iter().enumerate() {
        let marker = if i == cursor { '>' } else { ' ' };
        let _ = writeln!(out, "{marker} {} ({})", app.display_name, app.package_id);
    }
    out
}

pub fn render_settings(grid: &GridConfig, flags: &DisplayFlags, cursor: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== Settings ==");
    for (i, item) in SETTINGS_ITEMS.iter().enumerate() {
        let marker = if i == cursor { '>' } else { ' ' };
        let _ = writeln!(out, "{marker} {:<18}{}", item.label(), item.value(grid, flags));
    }
    out
}

fn control(which: Peripheral, focused: FocusTarget) -> String {
    let label = match which {
        Peripheral::AllApps => "All apps",
        Peripheral::Settings => "Settings",
    };
    cell(label, focused == FocusTarget::Control(which))
}

fn cell(text: &str, focused: bool) -> String {
    let text = truncate(text, CELL_WIDTH);
    if focused {
        format!("[{text:<CELL_WIDTH$}]")
    } else {
        format!(" {text:<CELL_WIDTH$} ")
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('~');
    cut
}
