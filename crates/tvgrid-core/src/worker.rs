//! Background worker for discovery and seeding lookups.
//!
//! One thread per home screen. The interactive context pushes [`WorkerJob`]s
//! and drains [`WorkerEvent`]s with a non-blocking [`Worker::try_recv`]. The
//! worker never touches the store or the grid; it only reads the app
//! directory.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use crate::catalog::{AppCatalog, AppRecord};
use crate::error::{LauncherError, Result};
use crate::platform::AppDirectory;
use crate::seeder::{DefaultSeeder, SeedPlan};

// ---------------------------------------------------------------------------
// Liveness
// ---------------------------------------------------------------------------

/// Shared "still mounted" flag. Completions arriving after teardown are
/// dropped instead of applied.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn revoke(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Jobs and completions
// ---------------------------------------------------------------------------

/// Work for the background thread.
#[derive(Debug)]
pub enum WorkerJob {
    /// Scan the directory for launchable apps.
    Discover,
    /// Resolve which seeding candidates are usable.
    Seed(DefaultSeeder),
    Shutdown,
}

/// Completions posted back to the interactive context.
#[derive(Debug)]
pub enum WorkerEvent {
    AppsDiscovered(Vec<AppRecord>),
    SeedPlanned(SeedPlan),
}

// ---------------------------------------------------------------------------
// Worker handle
// ---------------------------------------------------------------------------

/// Handle to the background thread. Dropping it shuts the thread down.
///
/// The thread is detached: shutdown never waits for a job in flight. A scan
/// still running at teardown finishes on its own and its result is dropped.
pub struct Worker {
    jobs: Sender<WorkerJob>,
    events: Receiver<WorkerEvent>,
    liveness: Liveness,
}

impl Worker {
    /// Spawn the worker thread over a shared directory.
    pub fn spawn<D>(directory: Arc<D>, host_package: impl Into<String>) -> Result<Self>
    where
        D: AppDirectory + Send + Sync + 'static + ?Sized,
    {
        let (job_tx, job_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let liveness = Liveness::new();
        let host_package = host_package.into();
        let thread_liveness = liveness.clone();

        thread::Builder::new()
            .name("tvgrid-worker".into())
            .spawn(move || {
                worker_loop(&*directory, &host_package, job_rx, event_tx, thread_liveness);
            })
            .map_err(|e| LauncherError::Worker(format!("spawn failed: {e}")))?;

        log::debug!("Worker thread started");
        Ok(Self {
            jobs: job_tx,
            events: event_rx,
            liveness,
        })
    }

    /// Queue a job. Fails once the worker has been shut down.
    pub fn submit(&self, job: WorkerJob) -> Result<()> {
        if !self.liveness.is_alive() {
            return Err(LauncherError::Worker("worker is shut down".into()));
        }
        self.jobs
            .send(job)
            .map_err(|_| LauncherError::Worker("worker thread is gone".into()))
    }

    /// Next completion, if one is ready (non-blocking).
    ///
    /// Returns `None` once the worker has been shut down.
    pub fn try_recv(&self) -> Option<WorkerEvent> {
        if !self.liveness.is_alive() {
            return None;
        }
        match self.events.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                log::warn!("Worker thread exited unexpectedly");
                None
            },
        }
    }

    pub fn liveness(&self) -> &Liveness {
        &self.liveness
    }

    /// Revoke liveness and tell the thread to exit after its current job.
    /// Returns without waiting. Idempotent.
    pub fn shutdown(&mut self) {
        if !self.liveness.is_alive() {
            return;
        }
        self.liveness.revoke();
        let _ = self.jobs.send(WorkerJob::Shutdown);
        log::debug!("Worker thread detached");
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop<D: AppDirectory + ?Sized>(
    directory: &D,
    host_package: &str,
    jobs: Receiver<WorkerJob>,
    events: Sender<WorkerEvent>,
    liveness: Liveness,
) {
    let catalog = AppCatalog::new(directory, host_package);
    while let Ok(job) = jobs.recv() {
        let event = match job {
            WorkerJob::Discover => WorkerEvent::AppsDiscovered(catalog.discover_launchable_apps()),
            WorkerJob::Seed(seeder) => WorkerEvent::SeedPlanned(seeder.plan(&catalog)),
            WorkerJob::Shutdown => break,
        };
        if !liveness.is_alive() {
            break;
        }
        if events.send(event).is_err() {
            break;
        }
    }
}
