//! Terminal rendering of the people table with `comfy-table`.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use people_model::{
    Aggregation, AggregateValue, CellFormat, ColumnDef, ColumnId, GroupRow, Person, Summary,
    TableView, ViewRow, format_usd,
};

/// Prefix for nested records in the id column.
const NESTED_MARKER: &str = "↳ ";

/// Build the table for one page of `view`.
pub fn render_page(view: &TableView<'_>, page_index: usize) -> Table {
    let columns = view.columns();
    let mut table = Table::new();
    let mut header = vec![header_cell("#"), header_cell("ID")];
    header.extend(columns.iter().map(|column| header_cell(column.header)));
    table.set_header(header);
    apply_people_table_style(&mut table, columns);

    for row in view.page(page_index) {
        match row {
            ViewRow::Group(group) => {
                table.add_row(group_cells(columns, &group));
            }
            ViewRow::Record {
                index,
                depth,
                person,
            } => {
                table.add_row(record_cells(columns, index, depth, person));
            }
        }
    }
    table
}

/// Cell texts for a record row: position, id, then one per column.
pub fn record_texts(columns: &[ColumnDef], index: usize, depth: usize, person: &Person) -> Vec<String> {
    let mut texts = Vec::with_capacity(columns.len() + 2);
    texts.push(if depth == 0 {
        index.to_string()
    } else {
        "-".to_string()
    });
    if depth == 0 {
        texts.push(person.id.clone());
    } else {
        texts.push(format!("{}{}{}", "  ".repeat(depth - 1), NESTED_MARKER, person.id));
    }
    texts.extend(columns.iter().map(|column| column.display(person)));
    texts
}

/// Cell texts for a group header row.
pub fn group_texts(columns: &[ColumnDef], group: &GroupRow) -> Vec<String> {
    let mut texts = vec![String::new(), String::new()];
    texts.extend(columns.iter().map(|column| {
        if column.id == group.column {
            return format!("{} ({})", group.value, group.count);
        }
        match group.aggregate(column.id) {
            Some(aggregate) => aggregate_text(columns, group.column, column, aggregate),
            None => String::new(),
        }
    }));
    texts
}

fn aggregate_text(
    columns: &[ColumnDef],
    grouped_by: ColumnId,
    column: &ColumnDef,
    aggregate: &AggregateValue,
) -> String {
    let grouped_header = columns
        .iter()
        .find(|def| def.id == grouped_by)
        .map_or_else(|| grouped_by.key(), |def| def.header);
    let value = match aggregate.value {
        None => "-".to_string(),
        Some(value) => match (column.format, aggregate.aggregation) {
            (CellFormat::Currency, _) => format_usd(value),
            (CellFormat::Plain, Aggregation::Max) => format!("{value:.0}"),
            (CellFormat::Plain, Aggregation::Mean) => format!("{value:.1}"),
        },
    };
    format!("{} by {}: {}", aggregate.aggregation.label(), grouped_header, value)
}

/// One-line description of the whole table.
pub fn summary_line(summary: &Summary) -> String {
    let average = summary
        .mean_salary
        .map_or_else(|| "-".to_string(), format_usd);
    let oldest = summary
        .max_age
        .map_or_else(|| "-".to_string(), |age| age.to_string());
    format!(
        "{} records ({} including nested) | average salary {} | oldest {}",
        summary.records, summary.total, average, oldest
    )
}

/// Pager line shown under the table.
pub fn pager_line(view: &TableView<'_>, page_index: usize) -> String {
    let pages = view.page_count().max(1);
    format!(
        "Page {} of {} | {} matching records",
        page_index + 1,
        pages,
        view.matched()
    )
}

fn record_cells(columns: &[ColumnDef], index: usize, depth: usize, person: &Person) -> Vec<Cell> {
    record_texts(columns, index, depth, person)
        .into_iter()
        .enumerate()
        .map(|(position, text)| match position {
            0 if depth > 0 => dim_cell(text),
            0 => Cell::new(text).fg(Color::Blue),
            1 if depth > 0 => dim_cell(text),
            1 => Cell::new(text).add_attribute(Attribute::Bold),
            _ if depth > 0 => Cell::new(text).fg(Color::Grey),
            _ => Cell::new(text),
        })
        .collect()
}

fn group_cells(columns: &[ColumnDef], group: &GroupRow) -> Vec<Cell> {
    let texts = group_texts(columns, group);
    texts
        .into_iter()
        .enumerate()
        .map(|(position, text)| {
            let column = position.checked_sub(2).and_then(|i| columns.get(i));
            match column {
                Some(def) if def.id == group.column => Cell::new(text)
                    .fg(Color::Cyan)
                    .add_attribute(Attribute::Bold),
                Some(def) if def.format == CellFormat::Currency => Cell::new(text)
                    .fg(Color::Green)
                    .add_attribute(Attribute::Bold),
                Some(_) => Cell::new(text)
                    .fg(Color::Cyan)
                    .add_attribute(Attribute::Bold),
                None => Cell::new(text),
            }
        })
        .collect()
}

fn apply_people_table_style(table: &mut Table, columns: &[ColumnDef]) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);

    let mut constraints = vec![
        ColumnConstraint::LowerBoundary(Width::Fixed(4)),
        ColumnConstraint::LowerBoundary(Width::Fixed(12)),
    ];
    constraints.extend(columns.iter().map(|column| match column.size {
        Some(size) => ColumnConstraint::LowerBoundary(Width::Fixed(size)),
        None => ColumnConstraint::UpperBoundary(Width::Percentage(25)),
    }));
    table.set_constraints(constraints);

    align_column(table, 0, CellAlignment::Right);
    for (offset, column) in columns.iter().enumerate() {
        if matches!(column.id, ColumnId::Age | ColumnId::Salary) {
            align_column(table, offset + 2, CellAlignment::Right);
        }
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
