//! Division command - apportion tax over an actual division of the estate

use super::read_json;
use crate::utils::write_csv;
use clap::Args;
use souzoku::core::{format_yen, DivisionInput};
use souzoku::tax::{calculate_division, DivisionDetail, DivisionResult};
use std::io;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct DivisionCommand {
    /// JSON file containing a division input ("-" for stdin)
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Output as JSON instead of formatted table
    #[arg(long, conflicts_with = "csv")]
    json: bool,

    /// Output per-heir details as CSV
    #[arg(long)]
    csv: bool,
}

impl DivisionCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let input: DivisionInput = read_json(&self.input)?;
        let result = calculate_division(&input)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        } else if self.csv {
            write_csv(&result.division_details, io::stdout())
        } else {
            self.print_report(&result);
            Ok(())
        }
    }

    fn print_report(&self, result: &DivisionResult) {
        println!();
        println!("INHERITANCE TAX (actual division)");
        println!();

        let rows: Vec<DivisionRow> = result.division_details.iter().map(DivisionRow::from).collect();
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);

        println!();
        println!("  Estate:               {:>16}", format_yen(result.total_amount));
        println!("  Tax (statutory):      {:>16}", format_yen(result.statutory_tax_amount));
        println!("  Tax payable:          {:>16}", format_yen(result.total_final_tax_amount));

        if result.has_warnings() {
            println!();
            for warning in &result.warnings {
                println!("\u{26A0} {}", warning);
            }
        }
    }
}

#[derive(Debug, Clone, Tabled)]
struct DivisionRow {
    #[tabled(rename = "Heir")]
    name: String,
    #[tabled(rename = "Relationship")]
    relationship: String,
    #[tabled(rename = "Acquired")]
    acquired: String,
    #[tabled(rename = "Distributed Tax")]
    distributed: String,
    #[tabled(rename = "Adjustment")]
    adjustment: String,
    #[tabled(rename = "Final Tax")]
    final_tax: String,
}

impl From<&DivisionDetail> for DivisionRow {
    fn from(detail: &DivisionDetail) -> Self {
        DivisionRow {
            name: detail.name.clone(),
            relationship: detail.relationship.to_string(),
            acquired: format_yen(detail.acquired_amount),
            distributed: format_yen(detail.distributed_tax),
            adjustment: format_yen(detail.adjustment),
            final_tax: format_yen(detail.final_tax_amount),
        }
    }
}
