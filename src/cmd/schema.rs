//! Schema command - print expected document formats

use clap::{Args, ValueEnum};
use schemars::schema_for;
use souzoku::core::{DivisionInput, FamilyStructure};
use souzoku::tax::{DivisionResult, TaxCalculationResult};

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Document to describe
    #[arg(value_enum, default_value = "family")]
    document: SchemaDocument,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SchemaDocument {
    /// Family structure input for `heirs` and `tax`
    Family,
    /// Division input for `division`
    Division,
    /// Output of `tax --json`
    TaxResult,
    /// Output of `division --json`
    DivisionResult,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let schema = match self.document {
            SchemaDocument::Family => schema_for!(FamilyStructure),
            SchemaDocument::Division => schema_for!(DivisionInput),
            SchemaDocument::TaxResult => schema_for!(TaxCalculationResult),
            SchemaDocument::DivisionResult => schema_for!(DivisionResult),
        };
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }
}
