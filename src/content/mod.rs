//! Bundled calculator copy. Inert HTML; the only moving parts are the
//! `{{...}}` year placeholders resolved by the registry builder.

use crate::core::CatalogEntry;

macro_rules! catalog {
    ($($id:literal),* $(,)?) => {
        &[$(CatalogEntry {
            id: $id,
            template: include_str!(concat!("templates/", $id, ".html")),
        }),*]
    };
}

pub static CATALOG: &[CatalogEntry] = catalog![
    "age-calculator",
    "bmi-calculator",
    "compound-interest-calculator",
    "loan-calculator",
    "mortgage-calculator",
    "percentage-calculator",
    "retirement-calculator",
    "salary-calculator",
    "tax-calculator",
    "tip-calculator",
];
