use std::collections::{BTreeMap, HashMap};

use schemars::JsonSchema;
use serde::Serialize;
use sha2::{Digest, Sha256};

use super::calendar::{CalendarContext, DateSource};
use super::error::{BuildError, LookupMiss};
use super::template::Template;
use crate::content;

/// One calculator's raw template as it ships in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub template: &'static str,
}

/// Fully interpolated content for one calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct ContentEntry {
    /// Calculator identifier, e.g. `bmi-calculator`
    pub id: String,
    /// HTML body with every placeholder resolved
    pub html: String,
    /// Whether the template referenced any date placeholder
    pub year_dependent: bool,
}

impl ContentEntry {
    /// SHA-256 of the html, hex encoded
    pub fn digest(&self) -> String {
        hex::encode(Sha256::digest(self.html.as_bytes()))
    }
}

/// Immutable map from calculator id to finished content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRegistry {
    context: CalendarContext,
    entries: HashMap<String, ContentEntry>,
}

/// Serializable form of a registry with stable ordering.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct RegistryDocument {
    pub context: CalendarContext,
    pub entries: BTreeMap<String, ContentEntry>,
}

impl ContentRegistry {
    /// Interpolate every catalog entry with `context`. Fails on the first bad entry.
    pub fn from_catalog(
        catalog: &[CatalogEntry],
        context: CalendarContext,
    ) -> Result<Self, BuildError> {
        let known = CalendarContext::placeholders();
        let values = context.substitutions();
        let mut entries = HashMap::with_capacity(catalog.len());

        for item in catalog {
            if !is_valid_id(item.id) {
                return Err(BuildError::InvalidId(item.id.to_string()));
            }
            if entries.contains_key(item.id) {
                return Err(BuildError::DuplicateId(item.id.to_string()));
            }
            if item.template.trim().is_empty() {
                return Err(BuildError::EmptyContent(item.id.to_string()));
            }

            let template_error = |source| BuildError::Template {
                id: item.id.to_string(),
                source,
            };
            let template = Template::parse(item.template, known).map_err(template_error)?;
            let html = template.render(&values).map_err(template_error)?;
            let year_dependent = !template.is_static();
            log::debug!(
                "Rendered {} ({} bytes, year dependent: {})",
                item.id,
                html.len(),
                year_dependent
            );

            entries.insert(
                item.id.to_string(),
                ContentEntry {
                    id: item.id.to_string(),
                    html,
                    year_dependent,
                },
            );
        }

        log::info!(
            "Built {} content entries for {} (tax year {})",
            entries.len(),
            context.current_year,
            context.tax_year
        );
        Ok(ContentRegistry { context, entries })
    }

    pub fn context(&self) -> &CalendarContext {
        &self.context
    }

    /// Finished HTML for `id`, or a miss the caller can render a fallback for.
    pub fn lookup(&self, id: &str) -> Result<&str, LookupMiss> {
        self.entries
            .get(id)
            .map(|entry| entry.html.as_str())
            .ok_or_else(|| LookupMiss { id: id.to_string() })
    }

    pub fn get(&self, id: &str) -> Option<&ContentEntry> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Ids in sorted order
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Entries sorted by id
    pub fn entries(&self) -> Vec<&ContentEntry> {
        let mut entries: Vec<&ContentEntry> = self.entries.values().collect();
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_document(&self) -> RegistryDocument {
        RegistryDocument {
            context: self.context,
            entries: self
                .entries
                .iter()
                .map(|(id, entry)| (id.clone(), entry.clone()))
                .collect(),
        }
    }
}

/// Builds a registry from a date source and a catalog.
pub struct RegistryBuilder<'s> {
    source: &'s dyn DateSource,
    catalog: &'s [CatalogEntry],
    use_current_tax_year: bool,
}

impl<'s> RegistryBuilder<'s> {
    pub fn new(source: &'s dyn DateSource) -> Self {
        RegistryBuilder {
            source,
            catalog: content::CATALOG,
            use_current_tax_year: true,
        }
    }

    pub fn catalog(mut self, catalog: &'s [CatalogEntry]) -> Self {
        self.catalog = catalog;
        self
    }

    /// When false, the source's tax-year rule decides (e.g. still last year before filing day).
    pub fn use_current_tax_year(mut self, use_current: bool) -> Self {
        self.use_current_tax_year = use_current;
        self
    }

    pub fn build(&self) -> Result<ContentRegistry, BuildError> {
        let context = CalendarContext::snapshot(self.source, self.use_current_tax_year)?;
        ContentRegistry::from_catalog(self.catalog, context)
    }
}

/// Build the bundled catalog against `source`.
pub fn build_registry(source: &dyn DateSource) -> Result<ContentRegistry, BuildError> {
    RegistryBuilder::new(source).build()
}

/// Lowercase slug: `[a-z0-9]+` groups joined by single hyphens.
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id.split('-').all(|part| {
            !part.is_empty()
                && part
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calendar::{Calendar, TaxYearRule, Year};
    use crate::core::error::{ConfigurationError, TemplateError};
    use chrono::NaiveDate;

    fn calendar(y: i32, m: u32, d: u32) -> Calendar {
        Calendar::on(
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            TaxYearRule::default(),
        )
    }

    fn uses(template: &str, name: &str) -> bool {
        template.contains(&format!("{{{{{}}}}}", name))
    }

    struct Skewed;

    impl DateSource for Skewed {
        fn current_year(&self) -> Result<i32, ConfigurationError> {
            Ok(2026)
        }

        fn previous_year(&self) -> Result<i32, ConfigurationError> {
            Ok(2026)
        }

        fn tax_year(&self, _use_current: bool) -> Result<i32, ConfigurationError> {
            Ok(2026)
        }
    }

    #[test]
    fn every_entry_is_non_empty_and_fully_resolved() {
        let registry = build_registry(&calendar(2026, 10, 18)).unwrap();
        assert_eq!(registry.len(), content::CATALOG.len());
        for id in registry.ids() {
            let html = registry.lookup(id).unwrap();
            assert!(!html.is_empty(), "{} is empty", id);
            assert!(!html.contains("{{"), "{} has an unresolved placeholder", id);
        }
    }

    #[test]
    fn example_scenario_2026() {
        let registry = build_registry(&calendar(2026, 10, 18)).unwrap();
        assert_eq!(
            *registry.context(),
            CalendarContext {
                current_year: Year(2026),
                previous_year: Year(2025),
                tax_year: Year(2026),
            }
        );
        assert!(!registry.lookup("percentage-calculator").unwrap().is_empty());
        assert!(registry.lookup("tax-calculator").unwrap().contains("2026"));
    }

    #[test]
    fn current_year_placeholder_is_substituted() {
        let registry = build_registry(&calendar(2026, 6, 1)).unwrap();
        for item in content::CATALOG
            .iter()
            .filter(|item| uses(item.template, "current_year"))
        {
            let html = registry.lookup(item.id).unwrap();
            assert!(html.contains("2026"), "{} lacks the current year", item.id);
            assert!(!html.contains("{{current_year}}"));
        }
    }

    #[test]
    fn build_is_deterministic() {
        let first = build_registry(&calendar(2026, 3, 2)).unwrap();
        let second = build_registry(&calendar(2026, 3, 2)).unwrap();
        assert_eq!(first, second);
        for (a, b) in first.entries().iter().zip(second.entries()) {
            assert_eq!(a.digest(), b.digest());
        }
    }

    #[test]
    fn same_year_different_day_is_identical() {
        let spring = build_registry(&calendar(2026, 5, 1)).unwrap();
        let autumn = build_registry(&calendar(2026, 11, 30)).unwrap();
        assert_eq!(spring, autumn);
    }

    #[test]
    fn year_change_only_touches_year_dependent_entries() {
        let before = build_registry(&calendar(2025, 12, 31)).unwrap();
        let after = build_registry(&calendar(2026, 12, 31)).unwrap();
        assert_eq!(before.ids(), after.ids());

        let mut dependent = 0;
        for (old, new) in before.entries().into_iter().zip(after.entries()) {
            if old.year_dependent {
                dependent += 1;
                assert_ne!(old.html, new.html, "{} did not change", old.id);
            } else {
                assert_eq!(old.html, new.html, "{} changed", old.id);
            }
        }
        assert!(dependent > 0);
    }

    #[test]
    fn filing_season_keeps_previous_tax_year() {
        let source = calendar(2026, 2, 10);
        let registry = RegistryBuilder::new(&source)
            .use_current_tax_year(false)
            .build()
            .unwrap();
        assert_eq!(registry.context().tax_year, Year(2025));
        assert_eq!(registry.context().current_year, Year(2026));
    }

    #[test]
    fn unknown_id_is_a_lookup_miss() {
        let registry = build_registry(&calendar(2026, 10, 18)).unwrap();
        assert_eq!(
            registry.lookup("nonexistent-id"),
            Err(LookupMiss {
                id: "nonexistent-id".to_string()
            })
        );
        assert!(registry.get("nonexistent-id").is_none());
        assert!(!registry.contains("nonexistent-id"));
    }

    #[test]
    fn rejects_inconsistent_collaborator() {
        assert_eq!(
            build_registry(&Skewed),
            Err(BuildError::Configuration(
                ConfigurationError::InconsistentPreviousYear {
                    current: 2026,
                    previous: 2026
                }
            ))
        );
    }

    #[test]
    fn rejects_duplicate_ids() {
        static CATALOG: &[CatalogEntry] = &[
            CatalogEntry {
                id: "tip-calculator",
                template: "<p>a</p>",
            },
            CatalogEntry {
                id: "tip-calculator",
                template: "<p>b</p>",
            },
        ];
        let source = calendar(2026, 1, 1);
        let result = RegistryBuilder::new(&source).catalog(CATALOG).build();
        assert_eq!(result, Err(BuildError::DuplicateId("tip-calculator".to_string())));
    }

    #[test]
    fn rejects_malformed_ids_and_empty_content() {
        let source = calendar(2026, 1, 1);
        let bad_id = [CatalogEntry {
            id: "Tip_Calculator",
            template: "<p>a</p>",
        }];
        assert_eq!(
            RegistryBuilder::new(&source).catalog(&bad_id).build(),
            Err(BuildError::InvalidId("Tip_Calculator".to_string()))
        );

        let empty = [CatalogEntry {
            id: "tip-calculator",
            template: "  \n",
        }];
        assert_eq!(
            RegistryBuilder::new(&source).catalog(&empty).build(),
            Err(BuildError::EmptyContent("tip-calculator".to_string()))
        );
    }

    #[test]
    fn typo_in_placeholder_fails_the_build() {
        let source = calendar(2026, 1, 1);
        let catalog = [CatalogEntry {
            id: "tax-calculator",
            template: "<p>{{tax_yaer}} brackets</p>",
        }];
        assert_eq!(
            RegistryBuilder::new(&source).catalog(&catalog).build(),
            Err(BuildError::Template {
                id: "tax-calculator".to_string(),
                source: TemplateError::UnknownPlaceholder("tax_yaer".to_string()),
            })
        );
    }

    #[test]
    fn id_format() {
        assert!(is_valid_id("bmi-calculator"));
        assert!(is_valid_id("401k-calculator"));
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("-bmi"));
        assert!(!is_valid_id("bmi--calculator"));
        assert!(!is_valid_id("BMI-calculator"));
    }

    #[test]
    fn document_is_sorted_and_complete() {
        let registry = build_registry(&calendar(2026, 10, 18)).unwrap();
        let document = registry.to_document();
        let keys: Vec<&str> = document.entries.keys().map(String::as_str).collect();
        assert_eq!(keys, registry.ids());
        assert_eq!(document.context, *registry.context());
    }
}
