//! Validate command - surface cross-link problems without failing the build

use super::CalendarArgs;
use calc_content::core::{links, Warning};
use clap::Args;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,

    /// Exit with an error if any warning is found
    #[arg(long)]
    strict: bool,
}

/// JSON output structure
#[derive(Debug, Serialize)]
struct ValidationOutput {
    entry_count: usize,
    issue_count: usize,
    issues: Vec<Warning>,
}

impl ValidateCommand {
    pub fn exec(&self, calendar: &CalendarArgs) -> anyhow::Result<()> {
        let registry = calendar.build()?;
        let issues = links::check(&registry);
        let output = ValidationOutput {
            entry_count: registry.len(),
            issue_count: issues.len(),
            issues,
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else if output.issues.is_empty() {
            println!("{} entries, no issues found", output.entry_count);
        } else {
            println!("{} entries, {} issues:", output.entry_count, output.issue_count);
            for issue in &output.issues {
                match issue {
                    Warning::DanglingLink { from, to } => {
                        println!("  {}: links to unknown calculator '{}'", from, to)
                    }
                }
            }
        }

        if self.strict && output.issue_count > 0 {
            anyhow::bail!("{} validation issues", output.issue_count);
        }
        Ok(())
    }
}
