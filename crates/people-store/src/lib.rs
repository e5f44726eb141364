//! Local persistence for the people table.
//!
//! A single named slot in a key-value store holds the JSON-encoded forest.
//! The [`Reconciler`] seeds the slot from the generator when it is empty and
//! rewrites it in full after every edit or delete.
//!
//! # Architecture
//!
//! - `slot.rs` - the [`SlotStore`] trait and the in-memory store
//! - `file.rs` - file-backed store with atomic writes
//! - `codec.rs` - forest encoding
//! - `config.rs` - slot key, seed shape, corrupt-slot policy
//! - `reconciler.rs` - session state and the edit/delete entry points
//! - `error.rs` - error types with user-friendly messages

mod codec;
mod config;
mod error;
mod file;
mod reconciler;
mod slot;

pub use codec::{decode_forest, encode_forest};
pub use config::{CorruptSlotPolicy, DEFAULT_SEED_SIZES, DEFAULT_SLOT_KEY, ReconcilerConfig};
pub use error::{CodecError, ReconcileError, Result, StoreError, StoreResult};
pub use file::FileStore;
pub use reconciler::{MutationOutcome, Origin, Reconciler, RecordSource, clear_slot};
pub use slot::{MemoryStore, SlotStore};
