//! Table view engine: filter, sort, group, aggregate and paginate records.
//!
//! A [`TableView`] borrows the forest and lays out display rows according to
//! [`TableOptions`]. It never mutates records; rows carry the top-level
//! position of the record they show so edit callbacks can target it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::column::{Aggregation, ColumnDef, ColumnId, column_def, default_columns};
use crate::error::{ModelError, Result};
use crate::person::Person;
use crate::summary::mean;

/// Rows-per-page choices offered by the pager.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [50, 100, 250, 500];

/// Rows per page on first display.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: ColumnId,
    pub descending: bool,
}

impl SortSpec {
    pub fn ascending(column: ColumnId) -> Self {
        Self {
            column,
            descending: false,
        }
    }

    pub fn descending(column: ColumnId) -> Self {
        Self {
            column,
            descending: true,
        }
    }
}

/// Display state for the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableOptions {
    pub sort: Option<SortSpec>,
    pub group_by: Option<ColumnId>,
    /// Global filter text, matched case-insensitively against every column.
    pub filter: Option<String>,
    pub page_size: usize,
    /// Whether nested records are shown under their parents.
    pub expanded: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            sort: Some(SortSpec::ascending(ColumnId::State)),
            group_by: None,
            filter: None,
            page_size: DEFAULT_PAGE_SIZE,
            expanded: true,
        }
    }
}

impl TableOptions {
    #[must_use]
    pub fn with_sort(mut self, sort: Option<SortSpec>) -> Self {
        self.sort = sort;
        self
    }

    /// Group by `column`. Fails for columns with grouping disabled.
    pub fn with_group_by(mut self, column: Option<ColumnId>) -> Result<Self> {
        if let Some(id) = column {
            let columns = default_columns();
            let def = column_def(&columns, id).ok_or_else(|| {
                ModelError::UnknownColumn(id.key().to_string())
            })?;
            if !def.enable_grouping {
                return Err(ModelError::NotGroupable(def.header));
            }
        }
        self.group_by = column;
        Ok(self)
    }

    #[must_use]
    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter.filter(|text| !text.trim().is_empty());
        self
    }

    /// Set rows per page; only [`PAGE_SIZE_OPTIONS`] are accepted.
    pub fn with_page_size(mut self, size: usize) -> Result<Self> {
        if !PAGE_SIZE_OPTIONS.contains(&size) {
            return Err(ModelError::PageSize {
                size,
                allowed: PAGE_SIZE_OPTIONS.to_vec(),
            });
        }
        self.page_size = size;
        Ok(self)
    }

    #[must_use]
    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }
}

/// One aggregated value in a group row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregateValue {
    pub column: ColumnId,
    pub aggregation: Aggregation,
    pub value: Option<f64>,
}

/// Header row for a group of records sharing one column value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRow {
    pub column: ColumnId,
    pub value: String,
    pub count: usize,
    pub aggregates: Vec<AggregateValue>,
}

impl GroupRow {
    /// Aggregated value for `column`, if that column aggregates.
    pub fn aggregate(&self, column: ColumnId) -> Option<&AggregateValue> {
        self.aggregates.iter().find(|agg| agg.column == column)
    }
}

/// A display row.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewRow<'a> {
    Group(GroupRow),
    Record {
        /// Position of the owning top-level record in the forest.
        index: usize,
        /// Nesting depth, 0 for top-level records.
        depth: usize,
        person: &'a Person,
    },
}

#[derive(Debug)]
enum Unit<'a> {
    Group {
        row: GroupRow,
        members: Vec<(usize, &'a Person)>,
    },
    Record(usize, &'a Person),
}

/// Laid-out table ready to be paged through.
#[derive(Debug)]
pub struct TableView<'a> {
    columns: Vec<ColumnDef>,
    unit_count: usize,
    /// Every display row in order; pages are slices of this.
    rows: Vec<ViewRow<'a>>,
    matched: usize,
    page_size: usize,
}

impl<'a> TableView<'a> {
    pub fn build(records: &'a [Person], options: &TableOptions) -> Self {
        let columns = default_columns();
        let needle = options.filter.as_deref().map(str::to_lowercase);

        let mut rows: Vec<(usize, &'a Person)> = records
            .iter()
            .enumerate()
            .filter(|(_, person)| match &needle {
                Some(needle) => matches_filter(&columns, person, needle),
                None => true,
            })
            .collect();

        if let Some(sort) = options.sort {
            rows.sort_by(|(_, a), (_, b)| {
                let ordering = sort.column.compare(a, b);
                if sort.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }

        let matched = rows.len();
        let units = match options.group_by {
            Some(column) => group_rows(&columns, column, rows),
            None => rows
                .into_iter()
                .map(|(index, person)| Unit::Record(index, person))
                .collect(),
        };

        let mut rows = Vec::new();
        for unit in &units {
            match unit {
                Unit::Group { row, members } => {
                    rows.push(ViewRow::Group(row.clone()));
                    for &(index, person) in members {
                        push_record(&mut rows, options.expanded, index, 0, person);
                    }
                }
                Unit::Record(index, person) => {
                    push_record(&mut rows, options.expanded, *index, 0, person);
                }
            }
        }

        Self {
            columns,
            unit_count: units.len(),
            rows,
            matched,
            page_size: options.page_size.max(1),
        }
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Number of top-level records that passed the filter.
    pub fn matched(&self) -> usize {
        self.matched
    }

    /// Number of top-level units (records, or groups when grouped).
    pub fn unit_count(&self) -> usize {
        self.unit_count
    }

    /// Number of display rows across all pages. Group headers and expanded
    /// nested records each count as one row.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(self.page_size)
    }

    /// Rows for page `page_index` (zero-based). Out-of-range pages are empty.
    pub fn page(&self, page_index: usize) -> Vec<ViewRow<'a>> {
        let start = page_index.saturating_mul(self.page_size);
        self.rows
            .iter()
            .skip(start)
            .take(self.page_size)
            .cloned()
            .collect()
    }
}

fn push_record<'a>(
    out: &mut Vec<ViewRow<'a>>,
    expanded: bool,
    index: usize,
    depth: usize,
    person: &'a Person,
) {
    out.push(ViewRow::Record {
        index,
        depth,
        person,
    });
    if expanded {
        for child in person.children() {
            push_record(out, expanded, index, depth + 1, child);
        }
    }
}

fn matches_filter(columns: &[ColumnDef], person: &Person, needle: &str) -> bool {
    columns.iter().any(|column| {
        column.display(person).to_lowercase().contains(needle)
            || column.id.raw_text(person).to_lowercase().contains(needle)
    })
}

fn group_rows<'a>(
    columns: &[ColumnDef],
    column: ColumnId,
    rows: Vec<(usize, &'a Person)>,
) -> Vec<Unit<'a>> {
    let mut order: Vec<(String, Vec<(usize, &'a Person)>)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for (index, person) in rows {
        let key = column.raw_text(person);
        let slot = *positions.entry(key.clone()).or_insert_with(|| {
            order.push((key, Vec::new()));
            order.len() - 1
        });
        order[slot].1.push((index, person));
    }

    order
        .into_iter()
        .map(|(value, members)| {
            let aggregates = columns
                .iter()
                .filter_map(|def| {
                    def.aggregation.map(|aggregation| AggregateValue {
                        column: def.id,
                        aggregation,
                        value: aggregate(def.id, aggregation, &members),
                    })
                })
                .collect();
            Unit::Group {
                row: GroupRow {
                    column,
                    value,
                    count: members.len(),
                    aggregates,
                },
                members,
            }
        })
        .collect()
}

fn numeric_value(column: ColumnId, person: &Person) -> Option<f64> {
    match column {
        ColumnId::Age => Some(f64::from(person.age)),
        ColumnId::Salary => Some(person.salary),
        _ => None,
    }
}

fn aggregate(column: ColumnId, aggregation: Aggregation, members: &[(usize, &Person)]) -> Option<f64> {
    let values = members
        .iter()
        .filter_map(|(_, person)| numeric_value(column, person));
    match aggregation {
        Aggregation::Max => values.reduce(f64::max),
        Aggregation::Mean => mean(values),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::Gender;

    fn person(id: &str, state: &str, age: u32, salary: f64) -> Person {
        Person {
            id: id.to_string(),
            first_name: format!("First{id}"),
            last_name: format!("Last{id}"),
            age,
            gender: Gender::Male,
            state: state.to_string(),
            salary,
            sub_rows: None,
        }
    }

    #[test]
    fn default_options_sort_by_state() {
        let records = vec![
            person("a", "Texas", 30, 3000.0),
            person("b", "Alaska", 20, 2000.0),
        ];
        let view = TableView::build(&records, &TableOptions::default());
        let page = view.page(0);
        match &page[0] {
            ViewRow::Record { index, person, .. } => {
                assert_eq!(*index, 1);
                assert_eq!(person.state, "Alaska");
            }
            ViewRow::Group(_) => panic!("expected record row"),
        }
    }

    #[test]
    fn grouping_first_name_is_rejected() {
        let result = TableOptions::default().with_group_by(Some(ColumnId::FirstName));
        assert_eq!(result, Err(ModelError::NotGroupable("First Name")));
    }

    #[test]
    fn page_size_must_be_offered() {
        assert!(TableOptions::default().with_page_size(100).is_ok());
        assert!(matches!(
            TableOptions::default().with_page_size(7),
            Err(ModelError::PageSize { size: 7, .. })
        ));
    }
}
