use std::sync::{Arc, PoisonError, RwLock};

use super::calendar::{CalendarContext, DateSource};
use super::error::BuildError;
use super::registry::{CatalogEntry, ContentRegistry, RegistryBuilder};
use crate::content;

/// Process-wide published registry.
///
/// Readers take an `Arc` snapshot and never see a half-built registry. A
/// rebuild happens off to the side and is swapped in with one assignment.
pub struct SharedRegistry {
    source: Box<dyn DateSource + Send + Sync>,
    catalog: &'static [CatalogEntry],
    use_current_tax_year: bool,
    current: RwLock<Arc<ContentRegistry>>,
}

impl SharedRegistry {
    /// Build the bundled catalog and publish it.
    pub fn new(
        source: Box<dyn DateSource + Send + Sync>,
        use_current_tax_year: bool,
    ) -> Result<Self, BuildError> {
        Self::with_catalog(source, content::CATALOG, use_current_tax_year)
    }

    pub fn with_catalog(
        source: Box<dyn DateSource + Send + Sync>,
        catalog: &'static [CatalogEntry],
        use_current_tax_year: bool,
    ) -> Result<Self, BuildError> {
        let registry = RegistryBuilder::new(source.as_ref())
            .catalog(catalog)
            .use_current_tax_year(use_current_tax_year)
            .build()?;
        Ok(SharedRegistry {
            source,
            catalog,
            use_current_tax_year,
            current: RwLock::new(Arc::new(registry)),
        })
    }

    pub fn snapshot(&self) -> Arc<ContentRegistry> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Rebuild and publish. On failure the previous registry stays in place.
    pub fn refresh(&self) -> Result<Arc<ContentRegistry>, BuildError> {
        let registry = RegistryBuilder::new(self.source.as_ref())
            .catalog(self.catalog)
            .use_current_tax_year(self.use_current_tax_year)
            .build()
            .inspect_err(|e| log::warn!("Registry rebuild failed, keeping previous: {}", e))?;
        let registry = Arc::new(registry);

        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::clone(&registry);
        log::info!("Published registry for {}", registry.context().current_year);
        Ok(registry)
    }

    /// Rebuild only if the year values have moved since the last publish.
    /// Returns whether a new registry was published.
    pub fn refresh_if_stale(&self) -> Result<bool, BuildError> {
        let now = CalendarContext::snapshot(self.source.as_ref(), self.use_current_tax_year)?;
        if self.snapshot().context().same_period(&now) {
            return Ok(false);
        }
        log::debug!("Calendar moved to {}, rebuilding", now.current_year);
        self.refresh()?;
        Ok(true)
    }
}
