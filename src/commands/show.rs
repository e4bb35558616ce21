//! Show command: list files with their current title tag

use byte_unit::{Byte, UnitType};
use colored::Colorize;
use serde::Serialize;
use tracing::warn;

use super::collect_files;
use crate::Result;
use crate::collection::FileEntry;
use crate::config::AppConfig;
use crate::report::ErrorReporter;
use crate::tags::{Id3TagWriter, TagWriter};

/// One listed file
#[derive(Debug, Serialize)]
struct Row<'a> {
    #[serde(flatten)]
    entry: &'a FileEntry,
    title: Option<String>,
}

/// Execute the show command
///
/// # Errors
/// Returns an error if JSON output cannot be produced.
pub fn execute(config: &AppConfig, files: &[String], json: bool, quiet: bool) -> Result<()> {
    let reporter = ErrorReporter::default();
    let collection = collect_files(files, &reporter, config.surface_errors);

    let rows: Vec<Row<'_>> = collection
        .sorted_by_name()
        .into_iter()
        .map(|entry| Row {
            title: read_title(&Id3TagWriter, entry),
            entry,
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        if !quiet {
            println!("No files to show.");
        }
        return Ok(());
    }

    for row in &rows {
        println!("{}", format_row(row));
    }
    if !quiet {
        println!("\n{} file(s)", rows.len());
    }
    Ok(())
}

fn read_title(writer: &impl TagWriter, entry: &FileEntry) -> Option<String> {
    match writer.read_title(entry.full_path()) {
        Ok(title) => title,
        Err(e) => {
            warn!(error = %e, "could not read title");
            None
        }
    }
}

fn format_size(bytes: Option<u64>) -> String {
    bytes.map_or_else(
        || "-".to_string(),
        |b| Byte::from_u64(b).get_appropriate_unit(UnitType::Binary).to_string(),
    )
}

fn format_row(row: &Row<'_>) -> String {
    let entry = row.entry;
    let title = row
        .title
        .as_deref()
        .map_or_else(|| "(no title)".dimmed().to_string(), |t| t.green().to_string());
    let modified = entry
        .modified()
        .map_or_else(|| "-".to_string(), |m| m.format("%Y-%m-%d %H:%M").to_string());
    let name = if entry.exists() {
        entry.name().bold().to_string()
    } else {
        entry.name().red().to_string()
    };

    format!(
        "{name}  {title}  {}  {}  {}",
        format_size(entry.size()).cyan(),
        modified.dimmed(),
        entry.directory().display().to_string().dimmed()
    )
}
