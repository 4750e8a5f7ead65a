//! Placeholders command - the names templates may use

use calc_content::core::CalendarContext;
use clap::Args;

#[derive(Args, Debug)]
pub struct PlaceholdersCommand {}

impl PlaceholdersCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        println!("Template Placeholders");
        println!("=====================");
        println!();
        for placeholder in CalendarContext::placeholders() {
            let token = format!("{{{{{}}}}}", placeholder.name);
            println!("{:20}  {}", token, placeholder.description);
        }
        Ok(())
    }
}
