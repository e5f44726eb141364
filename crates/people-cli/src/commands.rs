use std::fs;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use people_generate::Generator;
use people_model::{PersonPatch, SortSpec, TableOptions, TableView};
use people_store::{MutationOutcome, ReconcileError};
use tracing::{info, info_span};

use people_cli::render::{pager_line, render_page, summary_line};
use people_cli::session::{SessionConfig, on_delete, on_edit, open_session, reset_store};

use crate::cli::{DeleteArgs, EditArgs, GenerateArgs, ShowArgs};

/// How a command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Done,
    /// The change is visible in this run but was not written to the store.
    Unsaved,
}

pub fn run_show(config: &SessionConfig, args: &ShowArgs) -> Result<Status> {
    let session = open_session(config)?;
    let sort = if args.unsorted {
        None
    } else {
        let column = args.sort.unwrap_or(people_model::ColumnId::State);
        Some(if args.desc {
            SortSpec::descending(column)
        } else {
            SortSpec::ascending(column)
        })
    };
    let options = TableOptions::default()
        .with_sort(sort)
        .with_group_by(args.group_by)?
        .with_filter(args.filter.clone())
        .with_page_size(args.page_size)?
        .with_expanded(!args.collapsed);

    let view = TableView::build(session.records(), &options);
    let page_index = args.page.saturating_sub(1);
    println!("{}", render_page(&view, page_index));
    println!("{}", pager_line(&view, page_index));
    println!("{}", summary_line(&session.summary()));
    Ok(if session.is_dirty() {
        Status::Unsaved
    } else {
        Status::Done
    })
}

pub fn run_edit(config: &SessionConfig, args: &EditArgs) -> Result<Status> {
    let patch = PersonPatch {
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
        age: args.age,
        gender: args.gender,
        state: args.state.clone(),
        salary: args.salary,
    };
    if patch.is_empty() {
        bail!("nothing to edit: pass at least one field flag (see --help)");
    }
    let mut session = open_session(config)?;
    let span = info_span!("edit", index = args.index);
    let _guard = span.enter();
    let result = on_edit(&mut session, args.index, &patch);
    let status = report_mutation(result, || {
        format!("No record at position {}.", args.index)
    })?;
    if let Some(person) = session.records().get(args.index) {
        println!(
            "{} | {} | {} | {} | {} | {} | {}",
            person.id,
            person.first_name,
            person.last_name,
            person.age,
            person.gender,
            person.state,
            people_model::format_usd(person.salary)
        );
    }
    Ok(status)
}

pub fn run_delete(config: &SessionConfig, args: &DeleteArgs) -> Result<Status> {
    let mut session = open_session(config)?;
    let span = info_span!("delete", id = %args.id);
    let _guard = span.enter();
    let name = session
        .records()
        .iter()
        .find(|person| person.id == args.id)
        .map(people_model::Person::full_name);
    if let Some(name) = &name
        && !args.yes
        && !confirm(&format!(
            "Are you sure you want to delete {name}? This action cannot be undone. [y/N] "
        ))?
    {
        println!("Cancelled.");
        return Ok(Status::Done);
    }
    let result = on_delete(&mut session, &args.id);
    let status = report_mutation(result, || format!("No record with id {}.", args.id))?;
    println!("{} records remain.", session.records().len());
    Ok(status)
}

pub fn run_reset(config: &SessionConfig) -> Result<Status> {
    reset_store(config)?;
    info!(store = %config.store_dir.display(), "store cleared");
    println!("Cleared stored table in {}.", config.store_dir.display());
    Ok(Status::Done)
}

pub fn run_generate(args: &GenerateArgs, seed: Option<u64>) -> Result<Status> {
    let mut generator = match seed {
        Some(seed) => Generator::seeded(seed),
        None => Generator::new(),
    };
    let records = generator.generate(args.sizes.as_slice());
    let json = if args.pretty {
        serde_json::to_string_pretty(&records)
    } else {
        serde_json::to_string(&records)
    }
    .context("serialize records")?;
    match &args.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), records = records.len(), "wrote generated records");
        }
        None => println!("{json}"),
    }
    Ok(Status::Done)
}

/// Print the outcome of an edit or delete. Unsaved changes are reported as a
/// warning rather than an error.
fn report_mutation(
    result: std::result::Result<MutationOutcome, ReconcileError>,
    not_found: impl FnOnce() -> String,
) -> Result<Status> {
    match result {
        Ok(MutationOutcome::Applied) => {
            println!("Saved.");
            Ok(Status::Done)
        }
        Ok(MutationOutcome::NotFound) => {
            eprintln!("warning: {}", not_found());
            Ok(Status::Done)
        }
        Err(error) if error.is_unsaved_change() => {
            eprintln!("warning: {}", error.user_message());
            if let Some(suggestion) = error.suggestion() {
                eprintln!("hint: {suggestion}");
            }
            Ok(Status::Unsaved)
        }
        Err(error) => Err(error.into()),
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    let mut stdout = io::stdout();
    write!(stdout, "{prompt}")?;
    stdout.flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
