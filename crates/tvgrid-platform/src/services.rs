//! Platform service traits.

use std::fmt;

use tvgrid_types::error::Result;

// ---------------------------------------------------------------------------
// App directory service
// ---------------------------------------------------------------------------

/// Launcher roles a component can advertise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LauncherRole {
    /// Regular home-screen launcher entry.
    Main,
    /// TV ("leanback") launcher entry.
    Tv,
}

impl fmt::Display for LauncherRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Main => write!(f, "main"),
            Self::Tv => write!(f, "tv"),
        }
    }
}

/// A launchable component as reported by the app directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentInfo {
    pub package_id: String,
    /// Component (activity) name inside the package.
    pub component: String,
}

/// Installed-package metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    pub package_id: String,
    pub version: Option<String>,
}

/// Screen density buckets for icon resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Density {
    Mdpi,
    Hdpi,
    Xhdpi,
    Xxhdpi,
    Xxxhdpi,
}

impl Density {
    /// Dots per inch of the bucket.
    pub fn dpi(self) -> u32 {
        match self {
            Self::Mdpi => 160,
            Self::Hdpi => 240,
            Self::Xhdpi => 320,
            Self::Xxhdpi => 480,
            Self::Xxxhdpi => 640,
        }
    }
}

/// Opaque reference to an icon image. The renderer knows how to load it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IconHandle(String);

impl IconHandle {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// Generic application icon used when every lookup failed.
    pub fn default_app() -> Self {
        Self::new("builtin:app")
    }

    pub fn uri(&self) -> &str {
        &self.0
    }
}

/// How a launch request was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchKind {
    Standard,
    Leanback,
}

/// A resolved request to start an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub package_id: String,
    pub component: String,
    pub kind: LaunchKind,
    /// Host-specific argv used by process-based launchers. Empty when the
    /// platform starts components by name.
    pub command: Vec<String>,
}

/// Abstraction over the platform's registry of installed applications.
pub trait AppDirectory {
    /// All components advertising `role`, in platform order.
    fn query_components(&self, role: LauncherRole) -> Result<Vec<ComponentInfo>>;

    /// Installed-package metadata. Fails with `NotFound` when the package is
    /// not installed.
    fn package_info(&self, package_id: &str) -> Result<PackageInfo>;

    /// User-visible label of a component.
    fn load_label(&self, component: &ComponentInfo) -> Result<String>;

    /// Icon resource of the component's application at a specific density.
    fn load_icon_for_density(&self, component: &ComponentInfo, density: Density)
    -> Result<IconHandle>;

    /// The platform's default icon loader.
    fn load_default_icon(&self, component: &ComponentInfo) -> Result<IconHandle>;

    /// Standard launch intent for a package, if it has one.
    fn launch_intent(&self, package_id: &str) -> Option<LaunchRequest>;

    /// TV-specific launch intent for a package, if it has one.
    fn leanback_launch_intent(&self, package_id: &str) -> Option<LaunchRequest>;
}

// ---------------------------------------------------------------------------
// Launch execution service
// ---------------------------------------------------------------------------

/// Abstraction over starting an application.
pub trait LaunchService {
    /// Start the application described by `request`.
    fn start(&mut self, request: &LaunchRequest) -> Result<()>;
}
