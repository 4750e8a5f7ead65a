//! Context command - the year values content is built with

use super::CalendarArgs;
use calc_content::core::{CalendarContext, TaxYearRule};
use clap::Args;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct ContextCommand {
    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct ContextOutput {
    date: String,
    tax_year_rule: String,
    #[serde(flatten)]
    context: CalendarContext,
}

impl ContextCommand {
    pub fn exec(&self, calendar: &CalendarArgs) -> anyhow::Result<()> {
        let pinned = calendar.calendar()?;
        let registry = calendar.build_with(&pinned)?;
        let output = ContextOutput {
            date: pinned.date().to_string(),
            tax_year_rule: describe_rule(pinned.rule()),
            context: *registry.context(),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        println!("Date:           {}", output.date);
        println!("Tax year rule:  {}", output.tax_year_rule);
        println!("Current year:   {}", output.context.current_year);
        println!("Previous year:  {}", output.context.previous_year);
        println!("Tax year:       {}", output.context.tax_year);
        Ok(())
    }
}

fn describe_rule(rule: TaxYearRule) -> String {
    match rule {
        TaxYearRule::CalendarYear => "calendar year".to_string(),
        TaxYearRule::Cutover { month, day } => format!("cutover {:02}-{:02}", month, day),
    }
}
