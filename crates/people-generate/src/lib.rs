//! Synthetic hierarchical person records.
//!
//! [`Generator`] builds a forest of [`people_model::Person`] records whose
//! nesting is driven by a size-per-level sequence ([`LevelSizes`]). Used to
//! seed an empty store.

mod error;
mod generator;
mod names;
mod sizes;

pub use error::{GenerateError, Result};
pub use generator::{
    Generator, ID_ALPHABET, ID_LENGTH, MAX_AGE, SALARY_MAX, SALARY_MIN, generate,
};
pub use sizes::{LevelSizes, MAX_TOTAL_RECORDS};
