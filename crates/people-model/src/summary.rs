//! Whole-table aggregates and money formatting.

use serde::Serialize;

use crate::forest::total_count;
use crate::person::Person;

/// Aggregates over the top-level records of a forest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Number of top-level records.
    pub records: usize,
    /// Number of records including nested ones.
    pub total: usize,
    pub mean_salary: Option<f64>,
    pub max_age: Option<u32>,
}

impl Summary {
    pub fn from_records(records: &[Person]) -> Self {
        Self {
            records: records.len(),
            total: total_count(records),
            mean_salary: mean(records.iter().map(|p| p.salary)),
            max_age: records.iter().map(|p| p.age).max(),
        }
    }
}

/// Arithmetic mean, `None` for an empty sequence.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0_f64, 0usize), |(sum, count), value| {
            (sum + value, count + 1)
        });
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Format an amount as US dollars without fraction digits (`$12,346`).
pub fn format_usd(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}
