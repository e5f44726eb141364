//! Column configuration for the people table.
//!
//! Each column is described by an explicit [`ColumnDef`] with its header,
//! ordinal position, grouping flag, aggregation, edit control and cell format.
//! Renderers consume these definitions instead of hard-coding layout.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::person::{Gender, Person};
use crate::summary::format_usd;

/// Identifies one displayed field of a [`Person`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnId {
    FirstName,
    LastName,
    Age,
    Gender,
    State,
    Salary,
}

impl ColumnId {
    pub const ALL: [ColumnId; 6] = [
        ColumnId::FirstName,
        ColumnId::LastName,
        ColumnId::Age,
        ColumnId::Gender,
        ColumnId::State,
        ColumnId::Salary,
    ];

    /// Accessor key, matching the serialized field name.
    pub fn key(&self) -> &'static str {
        match self {
            ColumnId::FirstName => "firstName",
            ColumnId::LastName => "lastName",
            ColumnId::Age => "age",
            ColumnId::Gender => "gender",
            ColumnId::State => "state",
            ColumnId::Salary => "salary",
        }
    }

    /// Orders two records by this column's raw value.
    pub fn compare(&self, a: &Person, b: &Person) -> Ordering {
        match self {
            ColumnId::FirstName => a.first_name.cmp(&b.first_name),
            ColumnId::LastName => a.last_name.cmp(&b.last_name),
            ColumnId::Age => a.age.cmp(&b.age),
            ColumnId::Gender => a.gender.cmp(&b.gender),
            ColumnId::State => a.state.cmp(&b.state),
            ColumnId::Salary => a.salary.total_cmp(&b.salary),
        }
    }

    /// Raw value as text, used for grouping keys and filtering.
    pub fn raw_text(&self, person: &Person) -> String {
        match self {
            ColumnId::FirstName => person.first_name.clone(),
            ColumnId::LastName => person.last_name.clone(),
            ColumnId::Age => person.age.to_string(),
            ColumnId::Gender => person.gender.as_str().to_string(),
            ColumnId::State => person.state.clone(),
            ColumnId::Salary => format!("{:.2}", person.salary),
        }
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for ColumnId {
    type Err = ModelError;

    /// Accepts the accessor key or the header text, ignoring case, spaces,
    /// dashes and underscores (`state`, `first-name`, `First Name`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "firstname" => Ok(ColumnId::FirstName),
            "lastname" => Ok(ColumnId::LastName),
            "age" => Ok(ColumnId::Age),
            "gender" => Ok(ColumnId::Gender),
            "state" => Ok(ColumnId::State),
            "salary" => Ok(ColumnId::Salary),
            _ => Err(ModelError::UnknownColumn(s.to_string())),
        }
    }
}

/// Aggregation applied to a column's values within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Aggregation {
    Max,
    Mean,
}

impl Aggregation {
    /// Label prefix shown in the aggregated cell.
    pub fn label(&self) -> &'static str {
        match self {
            Aggregation::Max => "Oldest",
            Aggregation::Mean => "Average",
        }
    }
}

/// Edit control offered for a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditVariant {
    Text,
    Number,
    Select(Vec<String>),
}

/// How a cell value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellFormat {
    Plain,
    /// US dollars, no fraction digits.
    Currency,
}

/// Declarative definition of one table column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDef {
    pub id: ColumnId,
    pub header: &'static str,
    pub ordinal: u8,
    pub enable_grouping: bool,
    pub aggregation: Option<Aggregation>,
    pub edit: EditVariant,
    pub format: CellFormat,
    /// Preferred width in characters, if any.
    pub size: Option<u16>,
}

impl ColumnDef {
    /// Rendered cell text for `person`.
    pub fn display(&self, person: &Person) -> String {
        match self.format {
            CellFormat::Currency => format_usd(person.salary),
            CellFormat::Plain => self.id.raw_text(person),
        }
    }
}

/// The people table's columns, ordered by ordinal.
pub fn default_columns() -> Vec<ColumnDef> {
    let mut columns = vec![
        ColumnDef {
            id: ColumnId::FirstName,
            header: "First Name",
            ordinal: 1,
            enable_grouping: false,
            aggregation: None,
            edit: EditVariant::Text,
            format: CellFormat::Plain,
            size: None,
        },
        ColumnDef {
            id: ColumnId::LastName,
            header: "Last Name",
            ordinal: 2,
            enable_grouping: true,
            aggregation: None,
            edit: EditVariant::Text,
            format: CellFormat::Plain,
            size: None,
        },
        ColumnDef {
            id: ColumnId::Age,
            header: "Age",
            ordinal: 3,
            enable_grouping: true,
            aggregation: Some(Aggregation::Max),
            edit: EditVariant::Number,
            format: CellFormat::Plain,
            size: Some(12),
        },
        ColumnDef {
            id: ColumnId::Gender,
            header: "Gender",
            ordinal: 4,
            enable_grouping: true,
            aggregation: None,
            edit: EditVariant::Select(
                Gender::ALL.iter().map(|g| g.as_str().to_string()).collect(),
            ),
            format: CellFormat::Plain,
            size: None,
        },
        ColumnDef {
            id: ColumnId::State,
            header: "State",
            ordinal: 5,
            enable_grouping: true,
            aggregation: None,
            edit: EditVariant::Text,
            format: CellFormat::Plain,
            size: None,
        },
        ColumnDef {
            id: ColumnId::Salary,
            header: "Salary",
            ordinal: 6,
            enable_grouping: true,
            aggregation: Some(Aggregation::Mean),
            edit: EditVariant::Number,
            format: CellFormat::Currency,
            size: None,
        },
    ];
    columns.sort_by_key(|column| column.ordinal);
    columns
}

/// Looks up the definition for `id` in `columns`.
pub fn column_def(columns: &[ColumnDef], id: ColumnId) -> Option<&ColumnDef> {
    columns.iter().find(|column| column.id == id)
}
