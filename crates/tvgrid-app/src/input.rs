//! Line-based remote input.
//!
//! Each stdin line is one key press. Home-screen keys go to
//! [`HomeScreen::handle_input`]; the picker, app list and settings screens
//! are handled here.

use tvgrid_core::home::{HomeAction, HomeScreen};
use tvgrid_core::input::Button;
use tvgrid_core::platform::{AppDirectory, LaunchService};
use tvgrid_core::prefs::PrefStore;

use crate::app_state::{AppState, Mode, SETTINGS_ITEMS};

/// One decoded remote key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteInput {
    Button(Button),
    Quit,
}

/// Result of handling a single input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
}

/// Decode one line. Unknown keys yield `None`.
pub fn parse_line(line: &str) -> Option<RemoteInput> {
    let button = match line.trim().to_ascii_lowercase().as_str() {
        "w" | "up" => Button::Up,
        "s" | "down" => Button::Down,
        "a" | "left" => Button::Left,
        "d" | "right" => Button::Right,
        "ok" | "enter" | "" => Button::Confirm,
        "m" | "menu" => Button::Menu,
        "b" | "back" => Button::Back,
        "q" | "quit" => return Some(RemoteInput::Quit),
        _ => return None,
    };
    Some(RemoteInput::Button(button))
}

/// Dispatch a key press according to the current mode.
pub fn handle_input<D, P, L>(
    input: RemoteInput,
    state: &mut AppState,
    home: &mut HomeScreen<D, P, L>,
) -> InputResult
where
    D: AppDirectory + Send + Sync + ?Sized + 'static,
    P: PrefStore,
    L: LaunchService,
{
    let button = match input {
        RemoteInput::Quit => return InputResult::Quit,
        RemoteInput::Button(b) => b,
    };
    match state.mode {
        Mode::Home => handle_home_input(button, state, home),
        Mode::Picker {
            position,
            show_delete,
        } => handle_picker_input(button, state, home, position, show_delete),
        Mode::AppList => handle_app_list_input(button, state, home),
        Mode::Settings => handle_settings_input(button, state, home),
    }
    InputResult::Continue
}

fn handle_home_input<D, P, L>(button: Button, state: &mut AppState, home: &mut HomeScreen<D, P, L>)
where
    D: AppDirectory + Send + Sync + ?Sized + 'static,
    P: PrefStore,
    L: LaunchService,
{
    match home.handle_input(button) {
        HomeAction::PickApp {
            position,
            show_delete,
        } => {
            home.request_app_list();
            state.enter(Mode::Picker {
                position,
                show_delete,
            });
        },
        HomeAction::OpenAppList => state.enter(Mode::AppList),
        HomeAction::OpenSettings => state.enter(Mode::Settings),
        HomeAction::Ignored | HomeAction::FocusMoved(_) | HomeAction::Launched(_) => {},
    }
}

fn handle_picker_input<D, P, L>(
    button: Button,
    state: &mut AppState,
    home: &mut HomeScreen<D, P, L>,
    position: usize,
    show_delete: bool,
) where
    D: AppDirectory + Send + Sync + ?Sized + 'static,
    P: PrefStore,
    L: LaunchService,
{
    let len = home.app_list().len();
    match button {
        Button::Up | Button::Left => state.step_cursor(-1, len),
        Button::Down | Button::Right => state.step_cursor(1, len),
        Button::Confirm => {
            let Some(package) = home.app_list().get(state.cursor).map(|a| a.package_id.clone())
            else {
                return;
            };
            if let Err(e) = home.assign(position, Some(&package)) {
                log::warn!("Binding slot {position} failed: {e}");
            }
            state.enter(Mode::Home);
        },
        Button::Menu if show_delete => {
            if let Err(e) = home.assign(position, None) {
                log::warn!("Clearing slot {position} failed: {e}");
            }
            state.enter(Mode::Home);
        },
        Button::Back => state.enter(Mode::Home),
        Button::Menu => {},
    }
}

fn handle_app_list_input<D, P, L>(
    button: Button,
    state: &mut AppState,
    home: &mut HomeScreen<D, P, L>,
) where
    D: AppDirectory + Send + Sync + ?Sized + 'static,
    P: PrefStore,
    L: LaunchService,
{
    let len = home.app_list().len();
    match button {
        Button::Up | Button::Left => state.step_cursor(-1, len),
        Button::Down | Button::Right => state.step_cursor(1, len),
        Button::Confirm => {
            let Some(package) = home.app_list().get(state.cursor).map(|a| a.package_id.clone())
            else {
                return;
            };
            if home.launch(&package).is_ok() {
                state.enter(Mode::Home);
            }
        },
        Button::Back => state.enter(Mode::Home),
        Button::Menu => {},
    }
}

fn handle_settings_input<D, P, L>(
    button: Button,
    state: &mut AppState,
    home: &mut HomeScreen<D, P, L>,
) where
    D: AppDirectory + Send + Sync + ?Sized + 'static,
    P: PrefStore,
    L: LaunchService,
{
    let delta = match button {
        Button::Up => return state.step_cursor(-1, SETTINGS_ITEMS.len()),
        Button::Down => return state.step_cursor(1, SETTINGS_ITEMS.len()),
        Button::Back => return state.enter(Mode::Home),
        Button::Menu => return,
        Button::Left => -1,
        Button::Right | Button::Confirm => 1,
    };
    let mut grid = *home.grid().config();
    let mut flags = *home.flags();
    SETTINGS_ITEMS[state.cursor].adjust(&mut grid, &mut flags, delta);
    if let Err(e) = home.apply_settings(grid, flags) {
        log::warn!("Saving settings failed: {e}");
    }
}
