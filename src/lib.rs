//! SEO content for a catalog of web calculators, with year values resolved
//! once per build and published as an immutable registry.

pub mod content;
pub mod core;

pub use crate::core::{
    build_registry, Calendar, CalendarContext, ContentRegistry, DateSource, LookupMiss,
    RegistryBuilder, SharedRegistry, TaxYearRule,
};
