//! Heirs command - statutory heirs and their shares for a family

use super::FamilyArgs;
use crate::utils::write_csv;
use clap::Args;
use rust_decimal_macros::dec;
use serde::Serialize;
use souzoku::core::{format_percent, format_yen, Heir, HeirType, Relationship};
use souzoku::tax::{basic_deduction, count_heirs_for_deduction, determine_legal_heirs};
use std::io;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct HeirsCommand {
    #[command(flatten)]
    family: FamilyArgs,

    /// Output as JSON instead of formatted table
    #[arg(long, conflicts_with = "csv")]
    json: bool,

    /// Output as CSV instead of formatted table
    #[arg(long)]
    csv: bool,
}

impl HeirsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let family = self.family.load()?;
        let heirs = determine_legal_heirs(&family)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&heirs)?);
            Ok(())
        } else if self.csv {
            write_csv(heirs.iter().map(HeirRecord::from), io::stdout())
        } else {
            self.print_table(&heirs);
            Ok(())
        }
    }

    fn print_table(&self, heirs: &[Heir]) {
        let rows: Vec<HeirRow> = heirs.iter().map(HeirRow::from).collect();
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);

        let statutory = heirs.iter().filter(|h| h.is_statutory()).count();
        println!();
        println!("  Statutory heirs:        {}", statutory);
        println!("  Counted for deduction:  {}", count_heirs_for_deduction(heirs));
        println!("  Basic deduction:        {}", format_yen(basic_deduction(heirs)));
    }
}

#[derive(Debug, Clone, Tabled)]
struct HeirRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Relationship")]
    relationship: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "%")]
    percent: String,
    #[tabled(rename = "Surcharge")]
    surcharge: String,
}

impl From<&Heir> for HeirRow {
    fn from(heir: &Heir) -> Self {
        HeirRow {
            id: heir.id.clone(),
            name: heir.name.clone(),
            relationship: heir.relationship.to_string(),
            share: heir.inheritance_share.to_string(),
            percent: format_percent(heir.inheritance_share.to_decimal() * dec!(100)),
            surcharge: if heir.two_fold_addition { "+20%" } else { "-" }.to_string(),
        }
    }
}

/// Flat CSV record; every row has the same columns
#[derive(Debug, Serialize)]
struct HeirRecord<'a> {
    id: &'a str,
    name: &'a str,
    heir_type: HeirType,
    relationship: Relationship,
    inheritance_share: String,
    two_fold_addition: bool,
    is_adopted: Option<bool>,
}

impl<'a> From<&'a Heir> for HeirRecord<'a> {
    fn from(heir: &'a Heir) -> Self {
        HeirRecord {
            id: &heir.id,
            name: &heir.name,
            heir_type: heir.heir_type,
            relationship: heir.relationship,
            inheritance_share: heir.inheritance_share.to_string(),
            two_fold_addition: heir.two_fold_addition,
            is_adopted: heir.is_adopted,
        }
    }
}
