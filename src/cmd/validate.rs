//! Validate command - surface input problems without calculating

use super::read_json;
use clap::{Args, ValueEnum};
use souzoku::core::{
    validate_division_input, validate_family_structure, DivisionInput, FamilyStructure,
    ValidationResult,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// Kind of document to check
    #[arg(value_enum)]
    kind: DocumentKind,

    /// JSON file to check ("-" for stdin)
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DocumentKind {
    /// Family structure
    Family,
    /// Division input
    Division,
}

impl DocumentKind {
    fn label(self) -> &'static str {
        match self {
            DocumentKind::Family => "family structure",
            DocumentKind::Division => "division input",
        }
    }
}

impl ValidateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let result = match self.kind {
            DocumentKind::Family => {
                let family: FamilyStructure = read_json(&self.input)?;
                validate_family_structure(&family)
            }
            DocumentKind::Division => {
                let input: DivisionInput = read_json(&self.input)?;
                validate_division_input(&input)
            }
        };
        log::info!("{} error(s) in {}", result.errors.len(), self.kind.label());

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            self.print_text(&result);
        }

        // Exit with code 1 if issues found
        if !result.is_valid {
            std::process::exit(1);
        }
        Ok(())
    }

    fn print_text(&self, result: &ValidationResult) {
        println!();
        println!("VALIDATION RESULTS ({})", self.kind.label());
        println!();

        if result.is_valid {
            println!("\u{2713} No issues found.");
        } else {
            println!("\u{26A0} {} issue(s) found:", result.errors.len());
            println!();

            for (i, error) in result.errors.iter().enumerate() {
                println!("  {}. [{}] {}", i + 1, error.code, error.field);
                println!("     {}", error.message);
                println!();
            }
        }
    }
}
