//! Opening the stored table and routing UI actions to the reconciler.

use std::path::PathBuf;

use anyhow::{Context, Result};
use people_generate::{Generator, LevelSizes};
use people_model::PersonPatch;
use people_store::{
    CorruptSlotPolicy, DEFAULT_SLOT_KEY, FileStore, MutationOutcome, ReconcileError, Reconciler,
    ReconcilerConfig, clear_slot,
};
use tracing::{debug, trace, warn};

use crate::logging::redact_value;

/// The table as seen by one CLI invocation.
pub type Session = Reconciler<FileStore>;

/// Store location and seeding options.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub store_dir: PathBuf,
    pub seed_sizes: LevelSizes,
    pub seed: Option<u64>,
    pub on_corrupt: CorruptSlotPolicy,
}

impl SessionConfig {
    pub fn new(store_dir: impl Into<PathBuf>) -> Self {
        Self {
            store_dir: store_dir.into(),
            seed_sizes: ReconcilerConfig::default().seed_sizes,
            seed: None,
            on_corrupt: CorruptSlotPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_seed_sizes(mut self, sizes: LevelSizes) -> Self {
        self.seed_sizes = sizes;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_on_corrupt(mut self, policy: CorruptSlotPolicy) -> Self {
        self.on_corrupt = policy;
        self
    }

    fn reconciler_config(&self) -> ReconcilerConfig {
        ReconcilerConfig::default()
            .with_key(DEFAULT_SLOT_KEY)
            .with_seed_sizes(self.seed_sizes.clone())
            .with_on_corrupt(self.on_corrupt)
    }
}

/// Load the table, seeding the store on first use.
pub fn open_session(config: &SessionConfig) -> Result<Session> {
    let store = FileStore::new(&config.store_dir);
    let mut generator = match config.seed {
        Some(seed) => Generator::seeded(seed),
        None => Generator::new(),
    };
    Reconciler::initialize(store, config.reconciler_config(), &mut generator).with_context(|| {
        format!("open table in {}", config.store_dir.display())
    })
}

/// Remove the stored table without loading it.
pub fn reset_store(config: &SessionConfig) -> Result<()> {
    let mut store = FileStore::new(&config.store_dir);
    clear_slot(&mut store, &config.reconciler_config())
        .with_context(|| format!("clear table in {}", config.store_dir.display()))
}

/// Parse a salary entered in the edit form. NaN, infinities and negative
/// amounts are refused.
pub fn parse_salary(value: &str) -> std::result::Result<f64, String> {
    let salary: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if !salary.is_finite() {
        return Err(format!("'{value}' is not a finite amount"));
    }
    if salary < 0.0 {
        return Err(format!("salary cannot be negative (got {value})"));
    }
    Ok(salary)
}

/// Apply `patch` to the record at `index` and hand the result to the
/// reconciler's edit entry point.
pub fn on_edit(
    session: &mut Session,
    index: usize,
    patch: &PersonPatch,
) -> std::result::Result<MutationOutcome, ReconcileError> {
    let Some(current) = session.records().get(index) else {
        warn!(index, records = session.records().len(), "edit target not found");
        return Ok(MutationOutcome::NotFound);
    };
    let edited = patch.apply_to(current);
    trace!(
        index,
        before = redact_value(&current.full_name()),
        after = redact_value(&edited.full_name()),
        "applying edit"
    );
    session.edit_record(index, edited)
}

/// Delete the top-level record with `id`.
pub fn on_delete(
    session: &mut Session,
    id: &str,
) -> std::result::Result<MutationOutcome, ReconcileError> {
    if let Some(person) = session.records().iter().find(|person| person.id == id) {
        debug!(id, name = redact_value(&person.full_name()), "deleting record");
    }
    session.delete_record(id)
}
