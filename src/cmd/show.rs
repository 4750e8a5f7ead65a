//! Show command - print one calculator's finished HTML

use super::CalendarArgs;
use clap::Args;

#[derive(Args, Debug)]
pub struct ShowCommand {
    /// Calculator identifier (e.g., bmi-calculator)
    id: String,
}

impl ShowCommand {
    pub fn exec(&self, calendar: &CalendarArgs) -> anyhow::Result<()> {
        let registry = calendar.build()?;
        match registry.lookup(&self.id) {
            Ok(html) => {
                println!("{}", html);
                Ok(())
            }
            Err(miss) => {
                let close: Vec<&str> = registry
                    .ids()
                    .into_iter()
                    .filter(|id| id.split('-').next() == self.id.split('-').next())
                    .collect();
                if close.is_empty() {
                    anyhow::bail!("{}", miss)
                } else {
                    anyhow::bail!("{} (did you mean {}?)", miss, close.join(", "))
                }
            }
        }
    }
}
