//! Person records and their enumerated fields.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Gender label carried by every person record.
///
/// Serialized as `"Male"` / `"Female"`, the same labels the edit form offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// All recognized labels, in the order the edit select lists them.
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    /// Returns the display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    /// Parse a gender label (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MALE" => Ok(Gender::Male),
            "FEMALE" => Ok(Gender::Female),
            _ => Err(format!("Unknown gender: {s}")),
        }
    }
}

/// A synthetic person record, optionally rooting a subtree of child records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub gender: Gender,
    pub state: String,
    pub salary: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_rows: Option<Vec<Person>>,
}

impl Person {
    /// Display name used in confirmations and logs.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Child records, empty for leaves.
    pub fn children(&self) -> &[Person] {
        self.sub_rows.as_deref().unwrap_or_default()
    }

    /// Returns true if this record has no child sequence.
    pub fn is_leaf(&self) -> bool {
        self.sub_rows.is_none()
    }

    /// Checks the recursive shape rules: a child sequence, when present, is
    /// non-empty and every child is itself well formed.
    pub fn is_well_formed(&self) -> bool {
        match &self.sub_rows {
            None => true,
            Some(children) => {
                !children.is_empty() && children.iter().all(Person::is_well_formed)
            }
        }
    }

    /// First record in this subtree, depth-first, whose salary is NaN or
    /// infinite. JSON has no encoding for those values.
    pub fn find_non_finite_salary(&self) -> Option<&Person> {
        if !self.salary.is_finite() {
            return Some(self);
        }
        self.children()
            .iter()
            .find_map(Person::find_non_finite_salary)
    }
}

/// Field values for the editable columns of a record.
///
/// The id and child sequence are not part of the edit form; applying a patch
/// keeps them from the record being edited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub state: Option<String>,
    pub salary: Option<f64>,
}

impl PersonPatch {
    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.state.is_none()
            && self.salary.is_none()
    }

    /// Build the replacement record for `base` with the patched fields.
    #[must_use]
    pub fn apply_to(&self, base: &Person) -> Person {
        Person {
            id: base.id.clone(),
            first_name: self
                .first_name
                .clone()
                .unwrap_or_else(|| base.first_name.clone()),
            last_name: self
                .last_name
                .clone()
                .unwrap_or_else(|| base.last_name.clone()),
            age: self.age.unwrap_or(base.age),
            gender: self.gender.unwrap_or(base.gender),
            state: self.state.clone().unwrap_or_else(|| base.state.clone()),
            salary: self.salary.map_or(base.salary, round_cents),
            sub_rows: base.sub_rows.clone(),
        }
    }
}

/// Round a monetary amount to two decimal places.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
