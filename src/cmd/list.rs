//! List command - every calculator id with its content fingerprint

use super::CalendarArgs;
use calc_content::core::{cross_links, ContentEntry};
use clap::Args;
use serde::Serialize;
use std::io;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct ListCommand {
    /// Output as CSV instead of formatted table
    #[arg(long, conflicts_with = "json")]
    csv: bool,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,

    /// Only entries that reference a year placeholder
    #[arg(long)]
    year_dependent: bool,
}

/// Row for the list output
#[derive(Debug, Clone, Tabled, Serialize)]
struct EntryRow {
    #[tabled(rename = "Calculator")]
    id: String,
    #[tabled(rename = "Dated")]
    year_dependent: bool,
    #[tabled(rename = "Bytes")]
    bytes: usize,
    #[tabled(rename = "Links")]
    links: usize,
    #[tabled(rename = "SHA-256")]
    digest: String,
}

impl From<&ContentEntry> for EntryRow {
    fn from(entry: &ContentEntry) -> Self {
        EntryRow {
            id: entry.id.clone(),
            year_dependent: entry.year_dependent,
            bytes: entry.html.len(),
            links: cross_links(&entry.html).len(),
            digest: entry.digest(),
        }
    }
}

impl ListCommand {
    pub fn exec(&self, calendar: &CalendarArgs) -> anyhow::Result<()> {
        let registry = calendar.build()?;
        let rows: Vec<EntryRow> = registry
            .entries()
            .into_iter()
            .filter(|e| !self.year_dependent || e.year_dependent)
            .map(EntryRow::from)
            .collect();

        if self.csv {
            print_csv(&rows)
        } else if self.json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
            Ok(())
        } else {
            self.print_table(&rows);
            Ok(())
        }
    }

    fn print_table(&self, rows: &[EntryRow]) {
        if rows.is_empty() {
            println!("No calculators found");
            return;
        }

        let short: Vec<EntryRow> = rows
            .iter()
            .cloned()
            .map(|mut row| {
                row.digest.truncate(12);
                row
            })
            .collect();
        let table = Table::new(short)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(2..4)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
    }
}

/// Full digests, one row per calculator
fn print_csv(rows: &[EntryRow]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(io::stdout().lock());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
