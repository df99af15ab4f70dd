//! Home screen controller.
//!
//! Owns the slot store, the built grid and its focus graph, the focus cursor
//! and the background worker. Maps remote buttons to [`HomeAction`]s the
//! frontend acts on (open a picker, open settings, show the app list) and
//! performs launches itself. All mutation happens on the caller's thread;
//! worker completions are applied in [`HomeScreen::pump`].

use std::sync::Arc;

use crate::catalog::{AppCatalog, AppRecord};
use crate::config::{DisplayFlags, GridConfig, LauncherConfig};
use crate::error::Result;
use crate::focus::{FocusGraph, FocusTarget, Peripheral};
use crate::grid::SlotGrid;
use crate::input::Button;
use crate::platform::{AppDirectory, LaunchService};
use crate::prefs::PrefStore;
use crate::seeder::{DefaultSeeder, needs_seeding};
use crate::slots::SlotStore;
use crate::worker::{Worker, WorkerEvent, WorkerJob};

/// Kinds of transient user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// A locked slot was about to be edited.
    HomeLocked,
    LaunchFailed,
}

/// A transient message for the frontend to show (toast, status line).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// What the frontend should do after a button press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeAction {
    /// Nothing changed.
    Ignored,
    FocusMoved(FocusTarget),
    Launched(String),
    /// Show the application picker for `position`. `show_delete` offers
    /// clearing the current binding.
    PickApp { position: usize, show_delete: bool },
    OpenAppList,
    OpenSettings,
}

/// Interactive-context state of the launcher.
pub struct HomeScreen<D: ?Sized, P, L> {
    directory: Arc<D>,
    host_package: String,
    store: SlotStore<P>,
    launcher: L,
    seeder: DefaultSeeder,
    grid: SlotGrid,
    focus_graph: FocusGraph,
    focused: FocusTarget,
    flags: DisplayFlags,
    worker: Worker,
    app_list: Vec<AppRecord>,
    notices: Vec<Notice>,
}

impl<D, P, L> HomeScreen<D, P, L>
where
    D: AppDirectory + Send + Sync + ?Sized + 'static,
    P: PrefStore,
    L: LaunchService,
{
    /// Build the grid from the store and start the worker. Queues the
    /// first-run seeding pass when it has not happened yet.
    pub fn new(directory: Arc<D>, prefs: P, launcher: L, config: &LauncherConfig) -> Result<Self> {
        let seeder = match &config.default_apps {
            Some(apps) => DefaultSeeder::with_candidates(apps.iter().cloned()),
            None => DefaultSeeder::default(),
        };
        let store = SlotStore::new(prefs);
        let worker = Worker::spawn(Arc::clone(&directory), config.host_package.clone())?;
        let grid = {
            let catalog = AppCatalog::new(&*directory, config.host_package.as_str());
            SlotGrid::build(store.grid_config(), &store, &catalog)
        };

        let screen = Self {
            host_package: config.host_package.clone(),
            flags: store.display_flags(),
            focus_graph: grid.focus_graph(),
            focused: FocusTarget::Slot(0),
            directory,
            store,
            launcher,
            seeder,
            grid,
            worker,
            app_list: Vec::new(),
            notices: Vec::new(),
        };

        if needs_seeding(&screen.store) {
            log::info!("First launch, planning default shortcuts");
            screen.worker.submit(WorkerJob::Seed(screen.seeder.clone()))?;
        }
        Ok(screen)
    }

    fn catalog(&self) -> AppCatalog<'_, D> {
        AppCatalog::new(&*self.directory, self.host_package.as_str())
    }

    // -- Queries ------------------------------------------------------------

    pub fn grid(&self) -> &SlotGrid {
        &self.grid
    }

    pub fn focus_graph(&self) -> &FocusGraph {
        &self.focus_graph
    }

    pub fn focused(&self) -> FocusTarget {
        self.focused
    }

    pub fn flags(&self) -> &DisplayFlags {
        &self.flags
    }

    pub fn store(&self) -> &SlotStore<P> {
        &self.store
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Result of the last full-list discovery.
    pub fn app_list(&self) -> &[AppRecord] {
        &self.app_list
    }

    /// Drain pending notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn is_alive(&self) -> bool {
        self.worker.liveness().is_alive()
    }

    // -- Input --------------------------------------------------------------

    pub fn handle_input(&mut self, button: Button) -> HomeAction {
        if let Some(dir) = button.direction() {
            self.focused = self.focus_graph.next(self.focused, dir);
            return HomeAction::FocusMoved(self.focused);
        }

        match (button, self.focused) {
            (Button::Confirm, FocusTarget::Slot(position)) => {
                match self.grid.binding(position).map(str::to_string) {
                    Some(package) => match self.launch(&package) {
                        Ok(()) => HomeAction::Launched(package),
                        Err(_) => HomeAction::Ignored,
                    },
                    None => HomeAction::PickApp {
                        position,
                        show_delete: false,
                    },
                }
            },
            (Button::Confirm, FocusTarget::Control(Peripheral::AllApps)) => {
                self.request_app_list();
                HomeAction::OpenAppList
            },
            (Button::Confirm, FocusTarget::Control(Peripheral::Settings)) => {
                HomeAction::OpenSettings
            },
            (Button::Menu, FocusTarget::Slot(position)) => {
                let bound = self.grid.binding(position).is_some();
                if bound && self.flags.icons_locked {
                    self.notify_locked();
                    return HomeAction::Ignored;
                }
                HomeAction::PickApp {
                    position,
                    show_delete: bound,
                }
            },
            _ => HomeAction::Ignored,
        }
    }

    /// Queue a discovery scan; the result lands in [`Self::app_list`].
    ///
    /// The previous list is dropped right away so nothing can be picked
    /// from it while the new scan runs.
    pub fn request_app_list(&mut self) {
        self.app_list.clear();
        if let Err(e) = self.worker.submit(WorkerJob::Discover) {
            log::warn!("Could not queue discovery: {e}");
        }
    }

    // -- Mutations ----------------------------------------------------------

    /// Resolve and start `package_id`. Failures are reported as a
    /// [`NoticeKind::LaunchFailed`] notice as well as returned.
    pub fn launch(&mut self, package_id: &str) -> Result<()> {
        let target = self.catalog().launch_target(package_id);
        let started = target.and_then(|request| self.launcher.start(&request));
        match started {
            Ok(()) => {
                log::info!("Launched {package_id}");
                Ok(())
            },
            Err(e) => {
                log::warn!("Launching {package_id} failed: {e}");
                self.notices.push(Notice::new(
                    NoticeKind::LaunchFailed,
                    format!("Could not open {package_id}"),
                ));
                Err(e)
            },
        }
    }

    /// Bind or clear `position` (picker result) and rebuild.
    ///
    /// Returns `false` without writing when the slot is bound and icons are
    /// locked.
    pub fn assign(&mut self, position: usize, package_id: Option<&str>) -> Result<bool> {
        if self.flags.icons_locked && self.grid.binding(position).is_some() {
            self.notify_locked();
            return Ok(false);
        }
        self.grid.bind(&mut self.store, position, package_id)?;
        self.rebuild();
        Ok(true)
    }

    /// Persist new settings and rebuild the grid with them.
    pub fn apply_settings(&mut self, config: GridConfig, flags: DisplayFlags) -> Result<()> {
        self.store.save_grid_config(&config)?;
        self.store.save_display_flags(&flags)?;
        self.rebuild();
        Ok(())
    }

    /// Re-read settings and bindings and recompute grid and focus graph.
    pub fn rebuild(&mut self) {
        self.flags = self.store.display_flags();
        let grid = SlotGrid::build(self.store.grid_config(), &self.store, &self.catalog());
        self.focus_graph = grid.focus_graph();
        self.grid = grid;
        let count = self.grid.slot_count();
        match self.focused {
            FocusTarget::Slot(p) if p >= count => self.focused = FocusTarget::Slot(count - 1),
            _ => {},
        }
    }

    /// Apply every completion the worker has posted. Returns how many were
    /// applied; always 0 after [`Self::teardown`].
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.worker.try_recv() {
            match event {
                WorkerEvent::AppsDiscovered(apps) => {
                    log::debug!("App list refreshed: {} entries", apps.len());
                    self.app_list = apps;
                },
                WorkerEvent::SeedPlanned(plan) => {
                    match plan.apply(&mut self.store, self.grid.slot_count()) {
                        Ok(outcome) if !outcome.is_empty() => self.rebuild(),
                        Ok(_) => {},
                        Err(e) => log::warn!("Seeding failed: {e}"),
                    }
                },
            }
            applied += 1;
        }
        applied
    }

    /// Stop the worker. Completions still in flight are discarded.
    pub fn teardown(&mut self) {
        self.worker.shutdown();
    }

    fn notify_locked(&mut self) {
        self.notices
            .push(Notice::new(NoticeKind::HomeLocked, "Home screen is locked"));
    }
}
