use clap::{Parser, Subcommand};

mod cmd;

use cmd::CalendarArgs;

#[derive(Parser, Debug)]
#[command(name = "calc-content")]
#[command(author, version, about = "Calculator page content with up-to-date years", long_about = None)]
struct Cli {
    #[command(flatten)]
    calendar: CalendarArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the finished HTML for one calculator
    Show(cmd::show::ShowCommand),
    /// List calculators with size, links and content digest
    List(cmd::list::ListCommand),
    /// Show the year values used for substitution
    Context(cmd::context::ContextCommand),
    /// Check cross-links between calculator pages
    Validate(cmd::validate::ValidateCommand),
    /// Export the full registry as JSON
    Export(cmd::export::ExportCommand),
    /// Print the JSON Schema of the export format
    Schema(cmd::schema::SchemaCommand),
    /// List the placeholders templates may use
    Placeholders(cmd::placeholders::PlaceholdersCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Show(show) => show.exec(&cli.calendar),
        Command::List(list) => list.exec(&cli.calendar),
        Command::Context(context) => context.exec(&cli.calendar),
        Command::Validate(validate) => validate.exec(&cli.calendar),
        Command::Export(export) => export.exec(&cli.calendar),
        Command::Schema(schema) => schema.exec(),
        Command::Placeholders(placeholders) => placeholders.exec(),
    }
}
