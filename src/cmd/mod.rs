pub mod context;
pub mod export;
pub mod list;
pub mod placeholders;
pub mod schema;
pub mod show;
pub mod validate;

use anyhow::Context;
use calc_content::core::{Calendar, ContentRegistry, RegistryBuilder, TaxYearRule};
use chrono::NaiveDate;
use clap::Args;

/// Options shared by every command that reads the calendar
#[derive(Args, Debug, Clone)]
pub struct CalendarArgs {
    /// Build as if today were this date (YYYY-MM-DD) instead of reading the clock
    #[arg(long, global = true)]
    date: Option<NaiveDate>,

    /// Month and day (MM-DD) before which tax content still uses last year
    #[arg(long, global = true, default_value = "04-15")]
    tax_year_cutover: String,

    /// Tax year always equals the calendar year
    #[arg(long, global = true)]
    calendar_tax_year: bool,

    /// Apply the tax-year rule instead of using the current year for tax content
    #[arg(long, global = true)]
    filing_season: bool,
}

impl CalendarArgs {
    pub fn rule(&self) -> anyhow::Result<TaxYearRule> {
        if self.calendar_tax_year {
            return Ok(TaxYearRule::CalendarYear);
        }
        Ok(TaxYearRule::parse_cutover(&self.tax_year_cutover)?)
    }

    pub fn calendar(&self) -> anyhow::Result<Calendar> {
        let rule = self.rule()?;
        // Pin the clock so one run sees one date.
        Ok(match self.date {
            Some(date) => Calendar::on(date, rule),
            None => Calendar::today(rule).pin(),
        })
    }

    pub fn build(&self) -> anyhow::Result<ContentRegistry> {
        self.build_with(&self.calendar()?)
    }

    /// Build against an already pinned calendar
    pub fn build_with(&self, calendar: &Calendar) -> anyhow::Result<ContentRegistry> {
        log::debug!("Building content for {}", calendar.date());
        RegistryBuilder::new(calendar)
            .use_current_tax_year(!self.filing_season)
            .build()
            .context("failed to build content registry")
    }
}
