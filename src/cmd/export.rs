//! Export command - the whole registry as JSON for the rendering layer

use super::CalendarArgs;
use anyhow::Context;
use clap::Args;
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ExportCommand {
    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ExportCommand {
    pub fn exec(&self, calendar: &CalendarArgs) -> anyhow::Result<()> {
        let registry = calendar.build()?;
        let json = serde_json::to_string_pretty(&registry.to_document())?;

        match &self.output {
            Some(path) => {
                fs::write(path, json)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                log::info!("Exported {} entries to {}", registry.len(), path.display());
            }
            None => println!("{}", json),
        }
        Ok(())
    }
}
