//! Reconciliation between the in-memory forest and its persisted slot.
//!
//! The [`Reconciler`] owns the session's records. Every mutation is applied
//! in memory first and then the whole forest is serialized and written over
//! the slot. When a write fails the in-memory forest stays authoritative and
//! the reconciler is marked dirty until a later write succeeds.

use people_generate::Generator;
use people_model::{Person, Summary, find_index_by_id, total_count};
use tracing::{info, info_span, warn};

use crate::codec::{decode_forest, encode_forest};
use crate::config::{CorruptSlotPolicy, ReconcilerConfig};
use crate::error::{ReconcileError, Result};
use crate::slot::SlotStore;

/// Supplies the records used to seed an empty slot.
pub trait RecordSource {
    fn records(&mut self, sizes: &[usize]) -> Vec<Person>;
}

impl RecordSource for Generator {
    fn records(&mut self, sizes: &[usize]) -> Vec<Person> {
        self.generate(sizes)
    }
}

/// Where the current forest came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Decoded from the slot.
    Stored,
    /// Produced by the record source because the slot was empty.
    Generated,
}

/// Result of an edit or delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    /// The target index or id is not in the top-level forest; nothing changed.
    NotFound,
}

/// Owns the session's records and keeps the slot in step with them.
#[derive(Debug)]
pub struct Reconciler<S: SlotStore> {
    store: S,
    config: ReconcilerConfig,
    records: Vec<Person>,
    origin: Origin,
    dirty: bool,
}

impl<S: SlotStore> Reconciler<S> {
    /// Read the slot and build the session state.
    ///
    /// A present slot is decoded and used as-is; `source` is not consulted.
    /// An absent or blank slot is seeded from `source` with
    /// `config.seed_sizes` and written back.
    pub fn initialize<R>(store: S, config: ReconcilerConfig, source: &mut R) -> Result<Self>
    where
        R: RecordSource + ?Sized,
    {
        let mut reconciler = Self {
            store,
            config,
            records: Vec::new(),
            origin: Origin::Stored,
            dirty: false,
        };
        reconciler.load(source)?;
        Ok(reconciler)
    }

    fn load<R>(&mut self, source: &mut R) -> Result<()>
    where
        R: RecordSource + ?Sized,
    {
        let span = info_span!("initialize", key = %self.config.key);
        let _guard = span.enter();

        match self.read_slot()? {
            Some(records) => {
                info!(
                    records = records.len(),
                    total = total_count(&records),
                    "loaded records from slot"
                );
                self.records = records;
                self.origin = Origin::Stored;
                self.dirty = false;
            }
            None => {
                let sizes = self.config.seed_sizes.as_slice().to_vec();
                self.records = source.records(&sizes);
                self.origin = Origin::Generated;
                info!(
                    sizes = %self.config.seed_sizes,
                    records = self.records.len(),
                    "seeded empty slot"
                );
                if let Err(error) = self.persist() {
                    warn!(error = %error, "seeded records were not saved");
                }
            }
        }
        Ok(())
    }

    /// Slot content as a forest, `None` when absent or (under
    /// [`CorruptSlotPolicy::Regenerate`]) unreadable.
    fn read_slot(&self) -> Result<Option<Vec<Person>>> {
        let key = &self.config.key;
        let content = match self.store.read(key) {
            Ok(content) => content,
            Err(source) => match self.config.on_corrupt {
                CorruptSlotPolicy::Fail => {
                    return Err(ReconcileError::StoreRead {
                        key: key.clone(),
                        source,
                    });
                }
                CorruptSlotPolicy::Regenerate => {
                    warn!(error = %source, "slot unreadable, treating as empty");
                    None
                }
            },
        };
        let Some(content) = content else {
            return Ok(None);
        };
        match decode_forest(&content) {
            Ok(records) => Ok(records),
            Err(source) => match self.config.on_corrupt {
                CorruptSlotPolicy::Fail => Err(ReconcileError::CorruptSlot {
                    key: key.clone(),
                    source,
                }),
                CorruptSlotPolicy::Regenerate => {
                    warn!(error = %source, bytes = content.len(), "slot content corrupt, treating as empty");
                    Ok(None)
                }
            },
        }
    }

    /// Serialize the whole forest and overwrite the slot.
    fn persist(&mut self) -> Result<()> {
        let encoded = match encode_forest(&self.records) {
            Ok(encoded) => encoded,
            Err(source) => {
                self.dirty = true;
                return Err(ReconcileError::Encode(source));
            }
        };
        match self.store.write(&self.config.key, &encoded) {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(source) => {
                self.dirty = true;
                Err(ReconcileError::StoreWrite {
                    key: self.config.key.clone(),
                    source,
                })
            }
        }
    }

    /// Current top-level records.
    pub fn records(&self) -> &[Person] {
        &self.records
    }

    pub fn summary(&self) -> Summary {
        Summary::from_records(&self.records)
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Returns true if the slot lags behind in-memory state.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Replace the top-level record at `index` and rewrite the slot.
    ///
    /// `person` is stored as given. On [`ReconcileError::StoreWrite`] the
    /// replacement is still in effect in memory. A replacement with a NaN or
    /// infinite salary anywhere in its subtree is refused with
    /// [`ReconcileError::InvalidRecord`] and nothing changes.
    pub fn edit_record(&mut self, index: usize, person: Person) -> Result<MutationOutcome> {
        let Some(slot) = self.records.get_mut(index) else {
            warn!(index, records = self.records.len(), "edit target not found");
            return Ok(MutationOutcome::NotFound);
        };
        if let Some(invalid) = person.find_non_finite_salary() {
            warn!(index, id = %invalid.id, "edit rejected, salary is not finite");
            return Err(ReconcileError::InvalidRecord {
                id: invalid.id.clone(),
                reason: "salary must be a finite number".to_string(),
            });
        }
        info!(index, id = %person.id, "editing record");
        *slot = person;
        self.persist()?;
        Ok(MutationOutcome::Applied)
    }

    /// Remove the first top-level record whose id is `id` and rewrite the
    /// slot. Nested records are never matched.
    pub fn delete_record(&mut self, id: &str) -> Result<MutationOutcome> {
        let Some(index) = find_index_by_id(&self.records, id) else {
            warn!(id, "delete target not found");
            return Ok(MutationOutcome::NotFound);
        };
        self.records.remove(index);
        info!(index, id, remaining = self.records.len(), "deleted record");
        self.persist()?;
        Ok(MutationOutcome::Applied)
    }

    /// Retry writing the slot after an earlier failure. No-op when clean.
    pub fn flush(&mut self) -> Result<()> {
        if self.dirty {
            self.persist()?;
        }
        Ok(())
    }

    /// Remove the slot and drop the in-memory forest.
    pub fn clear(&mut self) -> Result<()> {
        clear_slot(&mut self.store, &self.config)?;
        self.records.clear();
        self.dirty = false;
        Ok(())
    }

    /// Initialize again from the slot.
    ///
    /// Pending changes are flushed first. If that write fails the reload is
    /// refused with [`ReconcileError::UnsavedChanges`] and the in-memory
    /// forest is kept.
    pub fn reload<R>(&mut self, source: &mut R) -> Result<()>
    where
        R: RecordSource + ?Sized,
    {
        if let Err(error) = self.flush() {
            warn!(key = %self.config.key, "reload refused, pending changes could not be saved");
            return Err(ReconcileError::UnsavedChanges {
                key: self.config.key.clone(),
                source: Box::new(error),
            });
        }
        self.load(source)
    }
}

/// Remove the slot named by `config` without loading it. The next
/// [`Reconciler::initialize`] on `store` seeds a fresh forest.
pub fn clear_slot<S: SlotStore>(store: &mut S, config: &ReconcilerConfig) -> Result<()> {
    store
        .remove(&config.key)
        .map_err(|source| ReconcileError::StoreWrite {
            key: config.key.clone(),
            source,
        })?;
    info!(key = %config.key, "cleared slot");
    Ok(())
}
