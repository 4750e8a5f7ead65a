//! Schema command - JSON Schema of the export document

use calc_content::core::RegistryDocument;
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let schema = schema_for!(RegistryDocument);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }
}
