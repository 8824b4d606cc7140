use super::division::statutory_split;
use super::table::{basic_deduction_for, count_heirs_for_deduction, tax_on_share};
use crate::core::{round_yen, DivisionInput, DivisionMode, Heir, Relationship, RoundingMethod};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Per-heir breakdown under the statutory-share method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HeirTaxDetail {
    pub heir_id: String,
    pub name: String,
    pub relationship: Relationship,
    pub two_fold_addition: bool,
    /// Statutory share of the whole estate, floored to yen
    #[schemars(with = "f64")]
    pub legal_share_amount: Decimal,
    /// Statutory share of the taxable estate, floored to yen for display
    #[schemars(with = "f64")]
    pub taxable_share_amount: Decimal,
    /// Tax on the taxable share before the 20% surcharge
    #[schemars(with = "f64")]
    pub tax_before_addition: Decimal,
    /// Reduced fraction such as "1/4"
    pub legal_share_fraction: String,
}

/// Aggregate inheritance tax computed on statutory shares
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TaxCalculationResult {
    #[schemars(with = "f64")]
    pub taxable_amount: Decimal,
    #[schemars(with = "f64")]
    pub basic_deduction: Decimal,
    #[schemars(with = "f64")]
    pub taxable_estate: Decimal,
    #[schemars(with = "f64")]
    pub total_tax_amount: Decimal,
    /// Statutory heirs (excludes non-heirs)
    pub total_heirs_count: usize,
    /// Heirs counted for the basic deduction after the adopted-child cap
    pub deduction_heirs_count: usize,
    pub legal_heirs: Vec<Heir>,
    pub heir_tax_details: Vec<HeirTaxDetail>,
}

impl TaxCalculationResult {
    pub fn is_taxable(&self) -> bool {
        self.total_tax_amount > Decimal::ZERO
    }

    /// A division input pre-filled with each heir's statutory amount,
    /// ready to be edited into the actual split.
    pub fn division_template(&self) -> DivisionInput {
        DivisionInput {
            heirs: self.legal_heirs.clone(),
            total_amount: self.taxable_amount,
            total_tax_amount: self.total_tax_amount,
            mode: DivisionMode::Amount,
            amounts: Some(statutory_split(&self.legal_heirs, self.taxable_amount)),
            percentages: None,
            rounding_method: RoundingMethod::Round,
        }
    }
}

/// Calculate inheritance tax by statutory shares.
///
/// Each heir's portion of the taxable estate is taxed from the table without
/// flooring the portion first; the per-heir taxes (already whole yen) are
/// summed and the total rounded once.
pub fn calculate_tax_by_legal_share(taxable_amount: Decimal, heirs: &[Heir]) -> TaxCalculationResult {
    let deduction_heirs_count = count_heirs_for_deduction(heirs);
    let basic_deduction = basic_deduction_for(deduction_heirs_count);
    let taxable_estate = (taxable_amount - basic_deduction).max(Decimal::ZERO);
    log::debug!(
        "Taxable amount {}, basic deduction {} ({} heirs), taxable estate {}",
        taxable_amount,
        basic_deduction,
        deduction_heirs_count,
        taxable_estate
    );

    let mut total_tax = Decimal::ZERO;
    let mut heir_tax_details = Vec::new();

    for heir in heirs.iter().filter(|h| h.is_statutory()) {
        let share = heir.inheritance_share;
        let heir_taxable = share.of(taxable_estate);
        let tax = tax_on_share(taxable_estate, share);
        total_tax += tax;
        log::debug!("{}: share {} of estate = {}, tax {}", heir.id, share, heir_taxable, tax);

        heir_tax_details.push(HeirTaxDetail {
            heir_id: heir.id.clone(),
            name: heir.name.clone(),
            relationship: heir.relationship,
            two_fold_addition: heir.two_fold_addition,
            legal_share_amount: share.of(taxable_amount).floor(),
            taxable_share_amount: heir_taxable.floor(),
            tax_before_addition: tax,
            legal_share_fraction: share.to_string(),
        });
    }

    TaxCalculationResult {
        taxable_amount,
        basic_deduction,
        taxable_estate,
        total_tax_amount: round_yen(total_tax),
        total_heirs_count: heir_tax_details.len(),
        deduction_heirs_count,
        legal_heirs: heirs.to_vec(),
        heir_tax_details,
    }
}
