//! First-run population of the grid from a fixed candidate list.
//!
//! Seeding is split in two halves. [`DefaultSeeder::plan`] does the
//! directory lookups and may run on the worker; [`SeedPlan::apply`] does the
//! store writes and belongs to the interactive context.

use crate::catalog::AppCatalog;
use crate::error::Result;
use crate::platform::AppDirectory;
use crate::prefs::PrefStore;
use crate::slots::SlotStore;

/// Packages tried on first launch, in priority order.
pub const DEFAULT_CANDIDATES: [&str; 6] = [
    "com.android.settings",
    "com.android.tv.settings",
    "com.android.vending",
    "com.android.chrome",
    "com.google.android.youtube",
    "com.alexpozzani.paineldigital",
];

/// Walks the candidate list against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultSeeder {
    candidates: Vec<String>,
}

impl Default for DefaultSeeder {
    fn default() -> Self {
        Self::with_candidates(DEFAULT_CANDIDATES)
    }
}

impl DefaultSeeder {
    pub fn with_candidates<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Keep the candidates that are installed and resolve to a launch request.
    pub fn plan<D: AppDirectory + ?Sized>(&self, catalog: &AppCatalog<'_, D>) -> SeedPlan {
        let packages = self
            .candidates
            .iter()
            .filter(|candidate| {
                let ok = catalog.is_launchable(candidate);
                if !ok {
                    log::debug!("Seeding: skipping {candidate}, not installed or not launchable");
                }
                ok
            })
            .cloned()
            .collect();
        SeedPlan { packages }
    }
}

/// Candidates that passed the lookup, in priority order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedPlan {
    pub packages: Vec<String>,
}

/// What [`SeedPlan::apply`] wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    /// `(position, package)` pairs in write order.
    pub written: Vec<(usize, String)>,
}

impl SeedOutcome {
    pub fn is_empty(&self) -> bool {
        self.written.is_empty()
    }
}

impl SeedPlan {
    /// Write the plan into the first unused positions of a `slot_count`
    /// grid and set `first_launch_done`.
    ///
    /// Does nothing once the flag is set. The flag is set even when no
    /// candidate survived.
    pub fn apply<P: PrefStore>(
        &self,
        store: &mut SlotStore<P>,
        slot_count: usize,
    ) -> Result<SeedOutcome> {
        let mut outcome = SeedOutcome::default();
        if store.first_launch_done() {
            log::debug!("Seeding: first launch already done, nothing to write");
            return Ok(outcome);
        }

        let mut free = (0..slot_count).filter(|&p| store.get(p).is_none()).collect::<Vec<_>>();
        free.reverse();
        for package in &self.packages {
            let Some(position) = free.pop() else {
                log::debug!("Seeding: grid full, dropping {package}");
                continue;
            };
            store.set(position, Some(package))?;
            outcome.written.push((position, package.clone()));
        }

        store.mark_first_launch_done()?;
        log::info!("Seeded {} default shortcuts", outcome.written.len());
        Ok(outcome)
    }
}

/// Whether the seeding pass still has to run.
pub fn needs_seeding<P: PrefStore>(store: &SlotStore<P>) -> bool {
    !store.first_launch_done()
}
