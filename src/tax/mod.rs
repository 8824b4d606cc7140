pub mod division;
pub mod heirs;
pub mod statutory;
pub mod table;

pub use division::{
    calculate_actual_division, convert_percentage_to_amount, statutory_split, DivisionDetail,
    DivisionResult,
};
pub use heirs::determine_heirs;
pub use statutory::{calculate_tax_by_legal_share, HeirTaxDetail, TaxCalculationResult};
pub use table::{basic_deduction, bracket_for, count_heirs_for_deduction, tax_from_table, TaxBracket};

use crate::core::{
    validate_division_input, validate_family_structure, validate_taxable_amount, DivisionInput,
    FamilyStructure, Heir, ValidationResult,
};
use rust_decimal::Decimal;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CalculationError {
    #[error("invalid input: {0}")]
    Invalid(ValidationResult),
}

impl CalculationError {
    pub fn validation(&self) -> &ValidationResult {
        match self {
            CalculationError::Invalid(result) => result,
        }
    }
}

fn check(result: ValidationResult) -> Result<(), CalculationError> {
    if result.is_valid {
        Ok(())
    } else {
        log::info!("Rejected input: {}", result);
        Err(CalculationError::Invalid(result))
    }
}

/// Validate the family and determine its heirs.
pub fn determine_legal_heirs(family: &FamilyStructure) -> Result<Vec<Heir>, CalculationError> {
    check(validate_family_structure(family))?;
    let heirs = determine_heirs(family);
    log::info!("Determined {} heirs", heirs.len());
    Ok(heirs)
}

/// Validate inputs, determine heirs and compute tax under the statutory-share method.
pub fn calculate_statutory_tax(
    taxable_amount: Decimal,
    family: &FamilyStructure,
) -> Result<TaxCalculationResult, CalculationError> {
    check(validate_family_structure(family).merge(validate_taxable_amount(taxable_amount)))?;
    let heirs = determine_heirs(family);
    let result = calculate_tax_by_legal_share(taxable_amount, &heirs);
    log::info!(
        "Taxable estate {}, total tax {}",
        result.taxable_estate,
        result.total_tax_amount
    );
    Ok(result)
}

/// Validate and apportion tax over an actual division.
pub fn calculate_division(input: &DivisionInput) -> Result<DivisionResult, CalculationError> {
    check(validate_division_input(input))?;
    let result = calculate_actual_division(input);
    log::info!(
        "Division over {} recipients, total final tax {}",
        result.division_details.len(),
        result.total_final_tax_amount
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DivisionMode, ErrorCode, RoundingMethod, Share};
    use rust_decimal_macros::dec;

    fn golden_family() -> FamilyStructure {
        FamilyStructure {
            spouse_exists: true,
            children_count: 2,
            ..Default::default()
        }
    }

    #[test]
    fn golden_scenario_end_to_end() {
        let tax = calculate_statutory_tax(dec!(100000000), &golden_family()).unwrap();
        assert_eq!(tax.basic_deduction, dec!(48000000));
        assert_eq!(tax.taxable_estate, dec!(52000000));
        assert_eq!(tax.total_tax_amount, dec!(6300000));

        let division = calculate_division(&tax.division_template()).unwrap();
        assert_eq!(division.statutory_tax_amount, dec!(6300000));
        // Spouse fully relieved, children pay their proportional part
        assert_eq!(division.total_final_tax_amount, dec!(3150000));
    }

    #[test]
    fn heirs_for_valid_family() {
        let heirs = determine_legal_heirs(&golden_family()).unwrap();
        assert_eq!(heirs.len(), 3);
        assert_eq!(heirs[0].inheritance_share, Share::new(1, 2).unwrap());
    }

    #[test]
    fn empty_family_rejected() {
        let err = determine_legal_heirs(&FamilyStructure::default()).unwrap_err();
        assert!(err.validation().has_code(ErrorCode::NoHeirs));
    }

    #[test]
    fn inconsistent_family_rejected_before_tax() {
        let family = FamilyStructure {
            children_count: 1,
            adopted_children_count: 2,
            ..Default::default()
        };
        let err = calculate_statutory_tax(dec!(100000000), &family).unwrap_err();
        assert!(err.validation().has_code(ErrorCode::Inconsistent));
    }

    #[test]
    fn family_and_amount_errors_reported_together() {
        let family = FamilyStructure {
            children_count: -1,
            ..Default::default()
        };
        let err = calculate_statutory_tax(dec!(-1), &family).unwrap_err();
        let fields: Vec<_> = err.validation().errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"children_count"));
        assert!(fields.contains(&"taxable_amount"));
        assert!(err.to_string().starts_with("invalid input: "));
    }

    #[test]
    fn oversized_estate_rejected_not_panicking() {
        let family = FamilyStructure {
            spouse_exists: true,
            parents_alive: 1,
            ..Default::default()
        };
        let err = calculate_statutory_tax(Decimal::MAX, &family).unwrap_err();
        assert_eq!(err.validation().errors.len(), 1);
        assert_eq!(err.validation().errors[0].field, "taxable_amount");
        assert_eq!(err.validation().errors[0].code, ErrorCode::InvalidValue);
    }

    #[test]
    fn quadrillion_yen_division_apportioned() {
        let heirs = determine_legal_heirs(&FamilyStructure {
            children_count: 2,
            ..Default::default()
        })
        .unwrap();
        let input = DivisionInput {
            heirs,
            total_amount: dec!(2000000000000000),
            total_tax_amount: dec!(1099999832900000),
            mode: DivisionMode::Amount,
            amounts: Some(
                [("child_1", dec!(1000000000000000)), ("child_2", dec!(1000000000000000))]
                    .iter()
                    .map(|(id, a)| (id.to_string(), *a))
                    .collect(),
            ),
            percentages: None,
            rounding_method: RoundingMethod::Round,
        };
        let result = calculate_division(&input).unwrap();
        assert_eq!(result.total_final_tax_amount, dec!(1099999832900000));
    }

    #[test]
    fn division_with_bad_sum_rejected() {
        let heirs = determine_legal_heirs(&golden_family()).unwrap();
        let input = DivisionInput {
            heirs,
            total_amount: dec!(100000000),
            total_tax_amount: dec!(6300000),
            mode: DivisionMode::Amount,
            amounts: Some(
                [("spouse", dec!(50000000)), ("child_1", dec!(25000000)), ("child_2", dec!(1))]
                    .iter()
                    .map(|(id, a)| (id.to_string(), *a))
                    .collect(),
            ),
            percentages: None,
            rounding_method: RoundingMethod::Round,
        };
        let err = calculate_division(&input).unwrap_err();
        assert!(err.validation().has_code(ErrorCode::InvalidSum));
    }
}
