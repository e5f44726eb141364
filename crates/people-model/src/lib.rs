//! Data model for the people table.
//!
//! - `person` - the [`Person`] record and its [`Gender`] label
//! - `forest` - helpers over the top-level record sequence
//! - `column` - declarative column configuration
//! - `view` - filtering, sorting, grouping and pagination for display
//! - `summary` - whole-table aggregates and money formatting

pub mod column;
pub mod error;
pub mod forest;
pub mod person;
pub mod summary;
pub mod view;

pub use column::{
    Aggregation, CellFormat, ColumnDef, ColumnId, EditVariant, column_def, default_columns,
};
pub use error::{ModelError, Result};
pub use forest::{collect_ids, depth, find_index_by_id, total_count};
pub use person::{Gender, Person, PersonPatch, round_cents};
pub use summary::{Summary, format_usd, mean};
pub use view::{
    AggregateValue, DEFAULT_PAGE_SIZE, GroupRow, PAGE_SIZE_OPTIONS, SortSpec, TableOptions,
    TableView, ViewRow,
};
