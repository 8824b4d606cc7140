use clap::{Parser, Subcommand};

mod cmd;
mod utils;

#[derive(Parser, Debug)]
#[command(name = "souzoku", version, about = "Japanese Inheritance Tax Calculator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Determine statutory heirs and their shares
    Heirs(cmd::heirs::HeirsCommand),
    /// Calculate total inheritance tax by statutory shares
    Tax(cmd::tax::TaxCommand),
    /// Apportion tax over an actual division of the estate
    Division(cmd::division::DivisionCommand),
    /// Check a family or division document without calculating
    Validate(cmd::validate::ValidateCommand),
    /// Print the JSON Schema of an input or output document
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Heirs(heirs) => heirs.exec(),
        Command::Tax(tax) => tax.exec(),
        Command::Division(division) => division.exec(),
        Command::Validate(validate) => validate.exec(),
        Command::Schema(schema) => schema.exec(),
    }
}
