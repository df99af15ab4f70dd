//! Launch execution by spawning host processes.

use std::process::{Child, Command};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use tvgrid_types::error::{LauncherError, Result};

use crate::services::{LaunchRequest, LaunchService};

/// Starts applications by spawning the request's command line.
///
/// The home screen stays interactive while the application runs. Each
/// child is handed to a detached reaper thread that waits on it, so exited
/// applications never linger as zombies.
#[derive(Debug, Default)]
pub struct ProcessLauncher {
    running: Arc<AtomicUsize>,
}

impl ProcessLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applications started by this launcher that have not exited yet.
    pub fn running(&self) -> usize {
        self.running.load(Ordering::Acquire)
    }

    fn reap(&self, package_id: &str, mut child: Child) {
        let running = Arc::clone(&self.running);
        running.fetch_add(1, Ordering::AcqRel);
        let owned_id = package_id.to_string();
        let pid = child.id();
        let spawned = thread::Builder::new()
            .name("tvgrid-reaper".into())
            .spawn(move || {
                let package_id = owned_id;
                match child.wait() {
                    Ok(status) => log::info!("{package_id} (pid {pid}) exited: {status}"),
                    Err(e) => log::warn!("Failed to wait on {package_id} (pid {pid}): {e}"),
                }
                running.fetch_sub(1, Ordering::AcqRel);
            });
        if let Err(e) = spawned {
            self.running.fetch_sub(1, Ordering::AcqRel);
            log::warn!("No reaper for {package_id} (pid {pid}): {e}");
        }
    }
}

impl LaunchService for ProcessLauncher {
    fn start(&mut self, request: &LaunchRequest) -> Result<()> {
        let (program, args) = request
            .command
            .split_first()
            .ok_or_else(|| LauncherError::NotLaunchable(request.package_id.clone()))?;
        let child = Command::new(program).args(args).spawn().map_err(|e| {
            LauncherError::Platform(format!("{}: failed to spawn {program}: {e}", request.package_id))
        })?;
        log::info!(
            "Started {} ({:?}) as pid {}",
            request.package_id,
            request.kind,
            child.id()
        );
        self.reap(&request.package_id, child);
        Ok(())
    }
}
