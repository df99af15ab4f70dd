//! App directory backed by a TOML manifest (`apps.toml`).
//!
//! Desktop and Pi hosts have no package manager the launcher can query, so
//! the installed applications are described in a manifest:
//!
//! ```toml
//! [[app]]
//! package = "org.kodi"
//! label = "Kodi"
//! roles = ["main", "tv"]
//! icon = "icons/kodi.png"
//! hires_icon = "icons/kodi-xxxhdpi.png"
//! exec = ["kodi", "--standalone"]
//! ```
//!
//! Omitting `label`, `icon` or `hires_icon` makes the corresponding lookup
//! fail, exactly as a broken package would on a real device.

use std::path::Path;

use serde::Deserialize;
use tvgrid_types::error::{LauncherError, Result};

use crate::services::{
    AppDirectory, ComponentInfo, Density, IconHandle, LaunchKind, LaunchRequest, LauncherRole,
    PackageInfo,
};

/// One installed application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManifestApp {
    pub package: String,
    #[serde(default)]
    pub label: Option<String>,
    /// Component name; defaults to `<package>.Main`.
    #[serde(default)]
    pub component: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    /// Launcher roles: `"main"` and/or `"tv"`. Empty for services.
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub hires_icon: Option<String>,
    #[serde(default)]
    pub exec: Vec<String>,
}

impl ManifestApp {
    fn component_name(&self) -> String {
        self.component
            .clone()
            .unwrap_or_else(|| format!("{}.Main", self.package))
    }

    fn has_role(&self, role: LauncherRole) -> bool {
        let wanted = role.to_string();
        self.roles.iter().any(|r| r.eq_ignore_ascii_case(&wanted))
    }

    fn request(&self, kind: LaunchKind) -> LaunchRequest {
        LaunchRequest {
            package_id: self.package.clone(),
            component: self.component_name(),
            kind,
            command: self.exec.clone(),
        }
    }
}

/// Top-level manifest document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppManifest {
    #[serde(default, rename = "app")]
    pub apps: Vec<ManifestApp>,
}

impl AppManifest {
    /// Parse a manifest from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let manifest: Self = toml::from_str(text)?;
        for app in &manifest.apps {
            for role in &app.roles {
                if !role.eq_ignore_ascii_case("main") && !role.eq_ignore_ascii_case("tv") {
                    return Err(LauncherError::Config(format!(
                        "{}: unknown launcher role '{role}'",
                        app.package
                    )));
                }
            }
        }
        Ok(manifest)
    }
}

/// [`AppDirectory`] over an [`AppManifest`].
#[derive(Debug, Clone, Default)]
pub struct ManifestDirectory {
    apps: Vec<ManifestApp>,
}

impl ManifestDirectory {
    pub fn new(manifest: AppManifest) -> Self {
        Self {
            apps: manifest.apps,
        }
    }

    /// Load the manifest file at `path`. A missing file yields an empty
    /// directory so the launcher still starts.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let manifest = AppManifest::from_toml(&text)?;
                log::info!(
                    "Loaded {} apps from manifest {}",
                    manifest.apps.len(),
                    path.display()
                );
                Ok(Self::new(manifest))
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("App manifest {} not found, no apps installed", path.display());
                Ok(Self::default())
            },
            Err(e) => Err(e.into()),
        }
    }

    fn find(&self, package_id: &str) -> Option<&ManifestApp> {
        self.apps.iter().find(|a| a.package == package_id)
    }

    fn find_component(&self, component: &ComponentInfo) -> Result<&ManifestApp> {
        self.find(&component.package_id)
            .ok_or_else(|| LauncherError::NotFound(component.package_id.clone()))
    }
}

impl AppDirectory for ManifestDirectory {
    fn query_components(&self, role: LauncherRole) -> Result<Vec<ComponentInfo>> {
        Ok(self
            .apps
            .iter()
            .filter(|a| a.has_role(role))
            .map(|a| ComponentInfo {
                package_id: a.package.clone(),
                component: a.component_name(),
            })
            .collect())
    }

    fn package_info(&self, package_id: &str) -> Result<PackageInfo> {
        self.find(package_id)
            .map(|a| PackageInfo {
                package_id: a.package.clone(),
                version: a.version.clone(),
            })
            .ok_or_else(|| LauncherError::NotFound(package_id.to_string()))
    }

    fn load_label(&self, component: &ComponentInfo) -> Result<String> {
        self.find_component(component)?
            .label
            .clone()
            .ok_or_else(|| LauncherError::Platform(format!("{}: no label", component.package_id)))
    }

    fn load_icon_for_density(
        &self,
        component: &ComponentInfo,
        density: Density,
    ) -> Result<IconHandle> {
        let app = self.find_component(component)?;
        match &app.hires_icon {
            Some(path) if density == Density::Xxxhdpi => Ok(IconHandle::new(path.clone())),
            Some(_) => Err(LauncherError::Platform(format!(
                "{}: no icon for {} dpi",
                component.package_id,
                density.dpi()
            ))),
            None => Err(LauncherError::Platform(format!(
                "{}: no high-density icon",
                component.package_id
            ))),
        }
    }

    fn load_default_icon(&self, component: &ComponentInfo) -> Result<IconHandle> {
        self.find_component(component)?
            .icon
            .clone()
            .map(IconHandle::new)
            .ok_or_else(|| LauncherError::Platform(format!("{}: no icon", component.package_id)))
    }

    fn launch_intent(&self, package_id: &str) -> Option<LaunchRequest> {
        self.find(package_id)
            .filter(|a| a.has_role(LauncherRole::Main))
            .map(|a| a.request(LaunchKind::Standard))
    }

    fn leanback_launch_intent(&self, package_id: &str) -> Option<LaunchRequest> {
        self.find(package_id)
            .filter(|a| a.has_role(LauncherRole::Tv))
            .map(|a| a.request(LaunchKind::Leanback))
    }
}
