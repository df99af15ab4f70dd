//! Application catalog: discovery, metadata resolution and launch targets.
//!
//! The catalog never caches: every scan asks the directory again and builds
//! fresh [`AppRecord`]s.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::error::{LauncherError, Result};
use crate::platform::{
    AppDirectory, ComponentInfo, Density, IconHandle, LaunchRequest, LauncherRole,
};

/// Display metadata for one launchable application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppRecord {
    pub package_id: String,
    pub display_name: String,
    pub icon: Option<IconHandle>,
}

impl AppRecord {
    pub fn new(package_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            package_id: package_id.into(),
            display_name: display_name.into(),
            icon: None,
        }
    }
}

/// One way of obtaining an icon. Strategies are tried in order and the
/// first success wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconStrategy {
    /// The application's own icon resource at a fixed density.
    Density(Density),
    /// Whatever the platform's default icon loader returns.
    PlatformDefault,
}

/// High-density resource first, then the platform loader.
pub const DEFAULT_ICON_STRATEGIES: [IconStrategy; 2] = [
    IconStrategy::Density(Density::Xxxhdpi),
    IconStrategy::PlatformDefault,
];

/// Roles queried during discovery, in union order.
const DISCOVERY_ROLES: [LauncherRole; 2] = [LauncherRole::Main, LauncherRole::Tv];

/// Read-only view over an [`AppDirectory`].
pub struct AppCatalog<'a, D: AppDirectory + ?Sized> {
    directory: &'a D,
    host_package: String,
    icon_strategies: Vec<IconStrategy>,
}

impl<'a, D: AppDirectory + ?Sized> AppCatalog<'a, D> {
    /// `host_package` is the launcher's own identifier; it never shows up in
    /// discovery results.
    pub fn new(directory: &'a D, host_package: impl Into<String>) -> Self {
        Self {
            directory,
            host_package: host_package.into(),
            icon_strategies: DEFAULT_ICON_STRATEGIES.to_vec(),
        }
    }

    /// Replace the icon lookup order.
    pub fn with_icon_strategies(mut self, strategies: Vec<IconStrategy>) -> Self {
        self.icon_strategies = strategies;
        self
    }

    /// Enumerate every launchable application except the host.
    ///
    /// Main-launcher components come first, then TV-launcher components;
    /// a package seen twice keeps its first entry. The result is sorted by
    /// display name, case-insensitively, with ties left in discovery order.
    pub fn discover_launchable_apps(&self) -> Vec<AppRecord> {
        let mut seen = HashSet::new();
        let mut records = Vec::new();

        for role in DISCOVERY_ROLES {
            let components = match self.directory.query_components(role) {
                Ok(c) => c,
                Err(e) => {
                    log::warn!("Discovery: querying {role} launcher components failed: {e}");
                    continue;
                },
            };
            for component in components {
                if component.package_id == self.host_package {
                    continue;
                }
                if !seen.insert(component.package_id.clone()) {
                    continue;
                }
                records.push(self.record_for(&component));
            }
        }

        records.sort_by(|a, b| cmp_ignore_case(&a.display_name, &b.display_name));
        log::debug!("Discovery found {} launchable apps", records.len());
        records
    }

    /// Build the record for an installed package with a launcher component.
    pub fn resolve_by_package(&self, package_id: &str) -> Result<AppRecord> {
        self.directory.package_info(package_id)?;
        let component = self
            .find_component(package_id)
            .ok_or_else(|| LauncherError::NotFound(package_id.to_string()))?;
        Ok(self.record_for(&component))
    }

    /// Resolve how to start `package_id`: the standard launch intent, then
    /// the TV-specific one.
    pub fn launch_target(&self, package_id: &str) -> Result<LaunchRequest> {
        self.directory
            .launch_intent(package_id)
            .or_else(|| self.directory.leanback_launch_intent(package_id))
            .ok_or_else(|| LauncherError::NotLaunchable(package_id.to_string()))
    }

    /// Installed and resolvable to a launch request.
    pub fn is_launchable(&self, package_id: &str) -> bool {
        self.directory.package_info(package_id).is_ok() && self.launch_target(package_id).is_ok()
    }

    fn find_component(&self, package_id: &str) -> Option<ComponentInfo> {
        DISCOVERY_ROLES.iter().find_map(|&role| {
            self.directory
                .query_components(role)
                .ok()?
                .into_iter()
                .find(|c| c.package_id == package_id)
        })
    }

    fn record_for(&self, component: &ComponentInfo) -> AppRecord {
        let display_name = match self.directory.load_label(component) {
            Ok(label) => label,
            Err(e) => {
                log::debug!("{}: label lookup failed ({e}), using package id", component.package_id);
                component.package_id.clone()
            },
        };
        AppRecord {
            package_id: component.package_id.clone(),
            display_name,
            icon: Some(self.resolve_icon(component)),
        }
    }

    fn resolve_icon(&self, component: &ComponentInfo) -> IconHandle {
        for strategy in &self.icon_strategies {
            let attempt = match strategy {
                IconStrategy::Density(density) => {
                    self.directory.load_icon_for_density(component, *density)
                },
                IconStrategy::PlatformDefault => self.directory.load_default_icon(component),
            };
            match attempt {
                Ok(icon) => return icon,
                Err(e) => log::warn!(
                    "{}: icon lookup {strategy:?} failed: {e}",
                    component.package_id
                ),
            }
        }
        IconHandle::default_app()
    }
}

/// Case-insensitive comparison, character by character.
fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}
