//! Tax command - total inheritance tax by statutory shares

use super::FamilyArgs;
use crate::utils::write_csv;
use clap::Args;
use rust_decimal::Decimal;
use souzoku::core::{format_yen, Heir};
use souzoku::tax::table::{BASIC_DEDUCTION_BASE, BASIC_DEDUCTION_PER_HEIR};
use souzoku::tax::{bracket_for, calculate_statutory_tax, HeirTaxDetail, TaxCalculationResult};
use std::io;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct TaxCommand {
    /// Taxable value of the estate in yen
    #[arg(short, long, allow_negative_numbers = true)]
    amount: Decimal,

    #[command(flatten)]
    family: FamilyArgs,

    /// Output as JSON instead of formatted table
    #[arg(long, conflicts_with_all = ["csv", "division_template"])]
    json: bool,

    /// Output per-heir details as CSV
    #[arg(long, conflicts_with = "division_template")]
    csv: bool,

    /// Print a division input pre-filled with statutory amounts
    #[arg(long)]
    division_template: bool,
}

impl TaxCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let family = self.family.load()?;
        let result = calculate_statutory_tax(self.amount, &family)?;

        if self.division_template {
            println!("{}", serde_json::to_string_pretty(&result.division_template())?);
            Ok(())
        } else if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        } else if self.csv {
            write_csv(&result.heir_tax_details, io::stdout())
        } else {
            self.print_report(&result);
            Ok(())
        }
    }

    fn print_report(&self, result: &TaxCalculationResult) {
        println!();
        println!("INHERITANCE TAX (statutory shares)");
        println!();

        let statutory = result.legal_heirs.iter().filter(|h| h.is_statutory());
        let rows: Vec<TaxRow> = statutory
            .zip(&result.heir_tax_details)
            .map(|(heir, detail)| TaxRow::new(heir, detail, result.taxable_estate))
            .collect();
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);

        println!();
        println!("  Taxable amount:   {:>16}", format_yen(result.taxable_amount));
        let million = Decimal::from(1_000_000);
        println!(
            "  Basic deduction:  {:>16}  ({}M + {}M x {} heirs)",
            format_yen(result.basic_deduction),
            BASIC_DEDUCTION_BASE / million,
            BASIC_DEDUCTION_PER_HEIR / million,
            result.deduction_heirs_count
        );
        println!("  Taxable estate:   {:>16}", format_yen(result.taxable_estate));
        println!("  Total tax:        {:>16}", format_yen(result.total_tax_amount));

        if !result.is_taxable() {
            println!();
            println!("\u{2713} No inheritance tax is due.");
        }
    }
}

#[derive(Debug, Clone, Tabled)]
struct TaxRow {
    #[tabled(rename = "Heir")]
    name: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "Legal Share")]
    legal_share: String,
    #[tabled(rename = "Taxable Share")]
    taxable_share: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Tax")]
    tax: String,
    #[tabled(rename = "Surcharge")]
    surcharge: String,
}

impl TaxRow {
    fn new(heir: &Heir, detail: &HeirTaxDetail, taxable_estate: Decimal) -> Self {
        let portion = heir.inheritance_share.of(taxable_estate);
        let rate = if portion > Decimal::ZERO {
            format!("{}%", bracket_for(portion).rate_pct())
        } else {
            "-".to_string()
        };
        TaxRow {
            name: detail.name.clone(),
            share: detail.legal_share_fraction.clone(),
            legal_share: format_yen(detail.legal_share_amount),
            taxable_share: format_yen(detail.taxable_share_amount),
            rate,
            tax: format_yen(detail.tax_before_addition),
            surcharge: if detail.two_fold_addition { "+20%" } else { "-" }.to_string(),
        }
    }
}
