//! The slot grid: persisted bindings resolved into display records.

use crate::catalog::{AppCatalog, AppRecord};
use crate::config::GridConfig;
use crate::error::{LauncherError, Result};
use crate::focus::FocusGraph;
use crate::platform::AppDirectory;
use crate::prefs::PrefStore;
use crate::slots::SlotStore;

/// One grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub position: usize,
    pub row: usize,
    pub col: usize,
    binding: Option<String>,
    record: Option<AppRecord>,
}

/// What the renderer should draw for a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotView<'a> {
    App(&'a AppRecord),
    /// Bound since the last build; metadata not resolved yet.
    Unresolved(&'a str),
    /// "Add new shortcut".
    AddPlaceholder,
}

impl Slot {
    fn empty(position: usize, columns: usize) -> Self {
        Self {
            position,
            row: position / columns,
            col: position % columns,
            binding: None,
            record: None,
        }
    }

    /// Bound package, if the slot is not empty.
    pub fn binding(&self) -> Option<&str> {
        self.binding.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.binding.is_none()
    }

    pub fn view(&self) -> SlotView<'_> {
        match (&self.binding, &self.record) {
            (Some(_), Some(record)) => SlotView::App(record),
            (Some(package), None) => SlotView::Unresolved(package),
            (None, _) => SlotView::AddPlaceholder,
        }
    }
}

/// Grid state for one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotGrid {
    config: GridConfig,
    slots: Vec<Slot>,
}

impl SlotGrid {
    /// Allocate `rows * columns` slots and resolve their bindings.
    ///
    /// A binding that no longer resolves degrades to an empty slot; the
    /// persisted entry is left alone.
    pub fn build<P, D>(config: GridConfig, store: &SlotStore<P>, catalog: &AppCatalog<'_, D>) -> Self
    where
        P: PrefStore,
        D: AppDirectory + ?Sized,
    {
        let config = config.clamped();
        let mut slots = Vec::with_capacity(config.slot_count());
        for position in 0..config.slot_count() {
            let mut slot = Slot::empty(position, config.columns);
            if let Some(package) = store.get(position) {
                match catalog.resolve_by_package(&package) {
                    Ok(record) => {
                        slot.binding = Some(package);
                        slot.record = Some(record);
                    },
                    Err(e) => {
                        log::warn!("Slot {position}: stale binding {package} ({e}), showing empty");
                    },
                }
            }
            slots.push(slot);
        }
        log::debug!(
            "Built {}x{} grid, {} bound",
            config.rows,
            config.columns,
            slots.iter().filter(|s| !s.is_empty()).count()
        );
        Self { config, slots }
    }

    /// The clamped configuration the grid was built with.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn rows(&self) -> usize {
        self.config.rows
    }

    pub fn columns(&self) -> usize {
        self.config.columns
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, position: usize) -> Option<&Slot> {
        self.slots.get(position)
    }

    /// Bound package at `position`, without touching the catalog.
    pub fn binding(&self, position: usize) -> Option<&str> {
        self.slot(position).and_then(Slot::binding)
    }

    /// Bound packages for every position.
    pub fn bindings(&self) -> Vec<Option<&str>> {
        self.slots.iter().map(Slot::binding).collect()
    }

    pub fn view(&self, position: usize) -> Option<SlotView<'_>> {
        self.slot(position).map(Slot::view)
    }

    /// Write or clear the binding at `position` through `store`.
    ///
    /// The in-memory slot reflects the write immediately; display metadata
    /// for a new binding is resolved by the next build.
    pub fn bind<P: PrefStore>(
        &mut self,
        store: &mut SlotStore<P>,
        position: usize,
        package_id: Option<&str>,
    ) -> Result<()> {
        let slots = self.slots.len();
        let slot = self
            .slots
            .get_mut(position)
            .ok_or(LauncherError::InvalidPosition { position, slots })?;
        let package_id = package_id.filter(|p| !p.is_empty());
        store.set(position, package_id)?;
        slot.binding = package_id.map(str::to_string);
        slot.record = None;
        Ok(())
    }

    /// Focus edges for this grid's dimensions.
    pub fn focus_graph(&self) -> FocusGraph {
        FocusGraph::compute(self.rows(), self.columns())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MAX_COLUMNS, MAX_ROWS};
    use crate::platform::{AppManifest, ManifestApp, ManifestDirectory};
    use crate::prefs::MemoryPrefs;
    use crate::slots::{KEY_GRID_X, KEY_GRID_Y};

    const HOST: &str = "org.tvgrid.launcher";

    fn directory() -> ManifestDirectory {
        let app = |package: &str, label: &str, roles: &[&str]| ManifestApp {
            package: package.to_string(),
            label: Some(label.to_string()),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            icon: Some(format!("{label}.png")),
            ..ManifestApp::default()
        };
        ManifestDirectory::new(AppManifest {
            apps: vec![
                app("com.android.chrome", "Chrome", &["main"]),
                app("com.google.android.youtube.tv", "YouTube", &["tv"]),
                app("org.kodi", "Kodi", &["main", "tv"]),
                app("com.android.providers.media", "Media", &[]),
            ],
        })
    }

    fn store_with(bindings: &[(usize, &str)]) -> SlotStore<MemoryPrefs> {
        let mut store = SlotStore::new(MemoryPrefs::new());
        for (pos, pkg) in bindings {
            store.set(*pos, Some(pkg)).unwrap();
        }
        store
    }

    #[test]
    fn build_allocates_rows_times_columns() {
        let dir = directory();
        let catalog = AppCatalog::new(&dir, HOST);
        let grid = SlotGrid::build(GridConfig::default(), &store_with(&[]), &catalog);
        assert_eq!(grid.slot_count(), 15);
        for (i, slot) in grid.slots().iter().enumerate() {
            assert_eq!(slot.position, i);
            assert_eq!(slot.row * 5 + slot.col, i);
            assert_eq!(slot.view(), SlotView::AddPlaceholder);
        }
    }

    #[test]
    fn build_clamps_config() {
        let dir = directory();
        let catalog = AppCatalog::new(&dir, HOST);
        let config = GridConfig {
            rows: 0,
            columns: 0,
            ..GridConfig::default()
        };
        let grid = SlotGrid::build(config, &store_with(&[]), &catalog);
        assert_eq!((grid.rows(), grid.columns()), (1, 2));
        assert_eq!(grid.slot_count(), 2);
    }

    #[test]
    fn build_resolves_bindings() {
        let dir = directory();
        let catalog = AppCatalog::new(&dir, HOST);
        let store = store_with(&[(0, "org.kodi"), (6, "com.google.android.youtube.tv")]);
        let grid = SlotGrid::build(GridConfig::default(), &store, &catalog);
        match grid.view(0).unwrap() {
            SlotView::App(rec) => assert_eq!(rec.display_name, "Kodi"),
            other => panic!("expected App, got {other:?}"),
        }
        assert_eq!(grid.binding(6), Some("com.google.android.youtube.tv"));
        assert_eq!(grid.slot(6).unwrap().row, 1);
        assert_eq!(grid.slot(6).unwrap().col, 1);
    }

    #[test]
    fn stale_binding_shows_empty_but_is_kept() {
        let dir = directory();
        let catalog = AppCatalog::new(&dir, HOST);
        let store = store_with(&[(1, "com.uninstalled"), (2, "com.android.providers.media")]);
        let grid = SlotGrid::build(GridConfig::default(), &store, &catalog);
        assert_eq!(grid.binding(1), None);
        assert_eq!(grid.view(1), Some(SlotView::AddPlaceholder));
        assert_eq!(grid.binding(2), None);
        assert_eq!(store.get(1).as_deref(), Some("com.uninstalled"));
        assert_eq!(store.get(2).as_deref(), Some("com.android.providers.media"));
    }

    #[test]
    fn oversized_stored_dimensions_are_capped() {
        let dir = directory();
        let catalog = AppCatalog::new(&dir, HOST);
        let mut prefs = MemoryPrefs::new();
        prefs.put_int(KEY_GRID_X, i64::MAX).unwrap();
        prefs.put_int(KEY_GRID_Y, 3).unwrap();
        let store = SlotStore::new(prefs);
        let grid = SlotGrid::build(store.grid_config(), &store, &catalog);
        assert_eq!(grid.columns(), MAX_COLUMNS);
        assert_eq!(grid.slot_count(), 3 * MAX_COLUMNS);
        assert_eq!(grid.focus_graph().slot_count(), grid.slot_count());
    }

    #[test]
    fn unclamped_config_is_capped_by_build() {
        let dir = directory();
        let catalog = AppCatalog::new(&dir, HOST);
        let config = GridConfig {
            rows: usize::MAX,
            columns: usize::MAX,
            ..GridConfig::default()
        };
        let grid = SlotGrid::build(config, &store_with(&[]), &catalog);
        assert_eq!(grid.slot_count(), MAX_ROWS * MAX_COLUMNS);
    }

    #[test]
    fn bindings_outside_grid_are_ignored() {
        let dir = directory();
        let catalog = AppCatalog::new(&dir, HOST);
        let store = store_with(&[(20, "org.kodi")]);
        let grid = SlotGrid::build(GridConfig::default(), &store, &catalog);
        assert!(grid.bindings().iter().all(Option::is_none));
    }

    #[test]
    fn build_is_idempotent() {
        let dir = directory();
        let catalog = AppCatalog::new(&dir, HOST);
        let store = store_with(&[(0, "org.kodi"), (3, "com.android.chrome"), (4, "gone")]);
        let a = SlotGrid::build(GridConfig::default(), &store, &catalog);
        let b = SlotGrid::build(GridConfig::default(), &store, &catalog);
        assert_eq!(a, b);
        assert_eq!(a.bindings(), b.bindings());
    }

    #[test]
    fn bind_then_clear_leaves_placeholder() {
        let dir = directory();
        let catalog = AppCatalog::new(&dir, HOST);
        let mut store = store_with(&[]);
        let mut grid = SlotGrid::build(GridConfig::default(), &store, &catalog);

        grid.bind(&mut store, 2, Some("com.android.chrome")).unwrap();
        assert_eq!(grid.view(2), Some(SlotView::Unresolved("com.android.chrome")));
        grid.bind(&mut store, 2, None).unwrap();

        assert_eq!(store.get(2), None);
        assert_eq!(grid.binding(2), None);
        assert_eq!(grid.view(2), Some(SlotView::AddPlaceholder));
    }

    #[test]
    fn bind_is_resolved_by_rebuild() {
        let dir = directory();
        let catalog = AppCatalog::new(&dir, HOST);
        let mut store = store_with(&[]);
        let mut grid = SlotGrid::build(GridConfig::default(), &store, &catalog);
        grid.bind(&mut store, 7, Some("com.android.chrome")).unwrap();
        let grid = SlotGrid::build(*grid.config(), &store, &catalog);
        assert!(matches!(grid.view(7), Some(SlotView::App(r)) if r.display_name == "Chrome"));
    }

    #[test]
    fn bind_out_of_range_fails_without_writing() {
        let dir = directory();
        let catalog = AppCatalog::new(&dir, HOST);
        let mut store = store_with(&[]);
        let mut grid = SlotGrid::build(GridConfig::default(), &store, &catalog);
        let err = grid.bind(&mut store, 15, Some("org.kodi")).unwrap_err();
        assert!(matches!(
            err,
            LauncherError::InvalidPosition {
                position: 15,
                slots: 15
            }
        ));
        assert_eq!(store.get(15), None);
    }

    #[test]
    fn focus_graph_matches_dimensions() {
        let dir = directory();
        let catalog = AppCatalog::new(&dir, HOST);
        let config = GridConfig {
            rows: 2,
            columns: 4,
            ..GridConfig::default()
        };
        let grid = SlotGrid::build(config, &store_with(&[]), &catalog);
        let focus = grid.focus_graph();
        assert_eq!(focus.slot_count(), grid.slot_count());
        assert_eq!((focus.rows(), focus.columns()), (2, 4));
    }
}
