pub mod calendar;
pub mod error;
pub mod links;
pub mod registry;
pub mod shared;
pub mod template;

// Flat public surface for domain types and functions.
pub use calendar::{Calendar, CalendarContext, DateSource, TaxYearRule, Year};
pub use error::{BuildError, ConfigurationError, LookupMiss, TemplateError};
pub use links::{cross_links, Warning};
pub use registry::{
    build_registry, CatalogEntry, ContentEntry, ContentRegistry, RegistryBuilder,
    RegistryDocument,
};
pub use shared::SharedRegistry;
pub use template::{Placeholder, Template};
