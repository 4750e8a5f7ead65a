use calc_content_derive::Placeholders;
use chrono::{Datelike, Local, NaiveDate};
use schemars::JsonSchema;
use serde::Serialize;

use super::error::ConfigurationError;
use super::template::Placeholder;

/// A calendar year, always positive once it has passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct Year(pub i32);

impl std::fmt::Display for Year {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the tax year is derived from today's date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxYearRule {
    /// Tax year is the calendar year.
    CalendarYear,
    /// Before this month/day the tax year is still the previous year.
    Cutover { month: u32, day: u32 },
}

impl Default for TaxYearRule {
    /// Filing deadline, 15 April
    fn default() -> Self {
        TaxYearRule::Cutover { month: 4, day: 15 }
    }
}

impl TaxYearRule {
    /// Parse a cutover given as `MM-DD`
    pub fn parse_cutover(s: &str) -> Result<Self, ConfigurationError> {
        let invalid = || ConfigurationError::InvalidCutover(s.to_string());
        let (month, day) = s.trim().split_once('-').ok_or_else(invalid)?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        let day: u32 = day.parse().map_err(|_| invalid())?;
        // Must exist in every year, so 29 February is out.
        NaiveDate::from_ymd_opt(2001, month, day).ok_or_else(invalid)?;
        Ok(TaxYearRule::Cutover { month, day })
    }

    pub fn tax_year_for(&self, date: NaiveDate) -> Result<i32, ConfigurationError> {
        let year = date.year();
        match *self {
            TaxYearRule::CalendarYear => Ok(year),
            TaxYearRule::Cutover { month, day } => {
                let cutover = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
                    ConfigurationError::InvalidCutover(format!("{:02}-{:02}", month, day))
                })?;
                if date < cutover {
                    Ok(year - 1)
                } else {
                    Ok(year)
                }
            }
        }
    }
}

/// Date/calendar utility the registry builder reads its year values from.
///
/// All values handed out while building one registry must describe the same
/// point in time. The string forms default to the decimal rendering of the
/// numeric ones.
pub trait DateSource {
    fn current_year(&self) -> Result<i32, ConfigurationError>;

    fn current_year_string(&self) -> Result<String, ConfigurationError> {
        self.current_year().map(|y| y.to_string())
    }

    fn previous_year(&self) -> Result<i32, ConfigurationError> {
        self.current_year().map(|y| y - 1)
    }

    fn previous_year_string(&self) -> Result<String, ConfigurationError> {
        self.previous_year().map(|y| y.to_string())
    }

    /// With `use_current` the tax year is simply the current year.
    fn tax_year(&self, use_current: bool) -> Result<i32, ConfigurationError>;

    fn tax_year_string(&self, use_current: bool) -> Result<String, ConfigurationError> {
        self.tax_year(use_current).map(|y| y.to_string())
    }

    /// A copy frozen at the current instant, for sources that read a live
    /// clock. `None` means every call already answers for the same moment.
    fn pinned(&self) -> Result<Option<Calendar>, ConfigurationError> {
        Ok(None)
    }
}

/// Chrono-backed date source, either pinned to a date or following the local clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    date: Option<NaiveDate>,
    rule: TaxYearRule,
}

impl Calendar {
    /// Pinned to `date`; every call answers for that day.
    pub fn on(date: NaiveDate, rule: TaxYearRule) -> Self {
        Calendar {
            date: Some(date),
            rule,
        }
    }

    /// Follows the local clock. A snapshot pins it once, so a build never
    /// mixes two dates.
    pub fn today(rule: TaxYearRule) -> Self {
        Calendar { date: None, rule }
    }

    pub fn date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }

    /// This calendar fixed at its current date
    pub fn pin(&self) -> Calendar {
        Calendar::on(self.date(), self.rule)
    }

    pub fn rule(&self) -> TaxYearRule {
        self.rule
    }
}

impl DateSource for Calendar {
    fn current_year(&self) -> Result<i32, ConfigurationError> {
        Ok(self.date().year())
    }

    fn tax_year(&self, use_current: bool) -> Result<i32, ConfigurationError> {
        let today = self.date();
        if use_current {
            Ok(today.year())
        } else {
            self.rule.tax_year_for(today)
        }
    }

    fn pinned(&self) -> Result<Option<Calendar>, ConfigurationError> {
        Ok(match self.date {
            Some(_) => None,
            None => Some(self.pin()),
        })
    }
}

/// Year values substituted into content templates, read once per build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema, Placeholders)]
pub struct CalendarContext {
    /// Calendar year the page renders in
    pub current_year: Year,
    /// The year before the current one
    pub previous_year: Year,
    /// Year referenced by tax-related content
    pub tax_year: Year,
}

impl CalendarContext {
    /// Read every value from `source` and check they agree with each other.
    /// Live clocks are pinned first so all six reads see one instant.
    pub fn snapshot(
        source: &dyn DateSource,
        use_current_tax_year: bool,
    ) -> Result<Self, ConfigurationError> {
        match source.pinned()? {
            Some(pinned) => Self::read(&pinned, use_current_tax_year),
            None => Self::read(source, use_current_tax_year),
        }
    }

    fn read(
        source: &dyn DateSource,
        use_current_tax_year: bool,
    ) -> Result<Self, ConfigurationError> {
        let current = positive("current year", source.current_year()?)?;
        let previous = positive("previous year", source.previous_year()?)?;
        let tax = positive("tax year", source.tax_year(use_current_tax_year)?)?;

        if previous != current - 1 {
            return Err(ConfigurationError::InconsistentPreviousYear { current, previous });
        }

        matches_string("current year", current, source.current_year_string()?)?;
        matches_string("previous year", previous, source.previous_year_string()?)?;
        matches_string(
            "tax year",
            tax,
            source.tax_year_string(use_current_tax_year)?,
        )?;

        Ok(CalendarContext {
            current_year: Year(current),
            previous_year: Year(previous),
            tax_year: Year(tax),
        })
    }

    /// Whether content built from this context is still current for `other`.
    pub fn same_period(&self, other: &CalendarContext) -> bool {
        self.current_year == other.current_year && self.tax_year == other.tax_year
    }
}

fn positive(field: &'static str, value: i32) -> Result<i32, ConfigurationError> {
    if value > 0 {
        Ok(value)
    } else {
        Err(ConfigurationError::InvalidYear { field, value })
    }
}

fn matches_string(field: &'static str, value: i32, text: String) -> Result<(), ConfigurationError> {
    if text == value.to_string() {
        Ok(())
    } else {
        Err(ConfigurationError::StringMismatch { field, value, text })
    }
}
