//! Helpers over the top-level ordered sequence of records.

use crate::person::Person;

/// Counts every record in the forest, nested ones included.
pub fn total_count(records: &[Person]) -> usize {
    records
        .iter()
        .map(|person| 1 + total_count(person.children()))
        .sum()
}

/// Deepest nesting level, where a forest of leaves has depth 1.
pub fn depth(records: &[Person]) -> usize {
    records
        .iter()
        .map(|person| 1 + depth(person.children()))
        .max()
        .unwrap_or(0)
}

/// Collects every identifier, depth-first in record order.
pub fn collect_ids(records: &[Person]) -> Vec<&str> {
    let mut ids = Vec::with_capacity(total_count(records));
    push_ids(records, &mut ids);
    ids
}

fn push_ids<'a>(records: &'a [Person], ids: &mut Vec<&'a str>) {
    for person in records {
        ids.push(person.id.as_str());
        push_ids(person.children(), ids);
    }
}

/// Position of the first top-level record with `id`. Nested records are not
/// searched.
pub fn find_index_by_id(records: &[Person], id: &str) -> Option<usize> {
    records.iter().position(|person| person.id == id)
}
