//! Depth-first generation of nested person records.

use std::collections::HashSet;

use people_model::{Gender, Person, round_cents, total_count};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::debug;

use crate::names::{FIRST_NAMES, LAST_NAMES, STATES};

/// Length of generated record identifiers.
pub const ID_LENGTH: usize = 10;

/// URL-safe identifier alphabet (64 symbols).
pub const ID_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Ages are drawn from `[0, MAX_AGE)`.
pub const MAX_AGE: u32 = 40;

/// Salaries are drawn from `[SALARY_MIN, SALARY_MAX)` and rounded to cents.
pub const SALARY_MIN: f64 = 2000.0;
pub const SALARY_MAX: f64 = 50000.0;

/// Synthetic record generator.
///
/// Values are random; a generator built with [`Generator::seeded`] produces
/// the same forest for the same seed and sizes.
#[derive(Debug, Clone)]
pub struct Generator {
    rng: Xoshiro256PlusPlus,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Generator seeded from the thread RNG.
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    /// Build a forest where `sizes[0]` is the number of top-level records and
    /// `sizes[d]` the number of children under every node at depth `d - 1`.
    ///
    /// Identifiers are unique across the returned forest.
    pub fn generate(&mut self, sizes: &[usize]) -> Vec<Person> {
        let mut issued = HashSet::new();
        let records = self.level(sizes, 0, &mut issued);
        debug!(
            levels = ?sizes,
            top_level = records.len(),
            total = total_count(&records),
            "generated records"
        );
        records
    }

    fn level(&mut self, sizes: &[usize], depth: usize, issued: &mut HashSet<String>) -> Vec<Person> {
        let Some(&len) = sizes.get(depth) else {
            return Vec::new();
        };
        let has_children = sizes.get(depth + 1).is_some_and(|&next| next > 0);
        (0..len)
            .map(|_| {
                let mut person = self.person(issued);
                if has_children {
                    person.sub_rows = Some(self.level(sizes, depth + 1, issued));
                }
                person
            })
            .collect()
    }

    /// One leaf record with fresh values.
    pub fn person(&mut self, issued: &mut HashSet<String>) -> Person {
        Person {
            id: self.unique_id(issued),
            first_name: self.pick(FIRST_NAMES).to_string(),
            last_name: self.pick(LAST_NAMES).to_string(),
            age: self.rng.gen_range(0..MAX_AGE),
            gender: self.pick(&Gender::ALL),
            state: self.pick(STATES).to_string(),
            salary: round_cents(self.rng.gen_range(SALARY_MIN..SALARY_MAX)),
            sub_rows: None,
        }
    }

    fn unique_id(&mut self, issued: &mut HashSet<String>) -> String {
        loop {
            let id = self.id();
            if issued.insert(id.clone()) {
                return id;
            }
        }
    }

    fn id(&mut self) -> String {
        (0..ID_LENGTH)
            .map(|_| char::from(ID_ALPHABET[self.rng.gen_range(0..ID_ALPHABET.len())]))
            .collect()
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.rng.gen_range(0..items.len())]
    }
}

/// Generate a forest with a freshly seeded [`Generator`].
pub fn generate(sizes: &[usize]) -> Vec<Person> {
    Generator::new().generate(sizes)
}
