//! Structural checks on calculation inputs.
//!
//! Validators collect every problem they find rather than stopping at the
//! first, so callers can show all of them at once.

use super::division::{DivisionInput, DivisionMode};
use super::family::FamilyStructure;
use super::heir::Heir;
use super::share::Share;
use super::yen::{format_percent, format_yen, round_yen};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

const MAX_PARENTS: i32 = 2;
const PERCENTAGE_TOLERANCE: Decimal = dec!(0.01);
/// Largest yen amount accepted as input. Products of amounts, taxes and
/// rates stay well inside `Decimal` range below it.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000000000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Value out of its allowed range
    InvalidValue,
    /// Counts contradict each other
    Inconsistent,
    /// No statutory heir exists
    NoHeirs,
    /// Required map not supplied
    Missing,
    /// A statutory heir has no entry
    MissingHeir,
    /// Entries do not add up to the required total
    InvalidSum,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidValue => "INVALID_VALUE",
            ErrorCode::Inconsistent => "INCONSISTENT",
            ErrorCode::NoHeirs => "NO_HEIRS",
            ErrorCode::Missing => "MISSING",
            ErrorCode::MissingHeir => "MISSING_HEIR",
            ErrorCode::InvalidSum => "INVALID_SUM",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationError {
    pub field: String,
    pub code: ErrorCode,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, code: ErrorCode, message: impl Into<String>) -> Self {
        ValidationError {
            field: field.to_string(),
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    pub fn valid() -> Self {
        ValidationResult::from_errors(Vec::new())
    }

    /// Combine two results, keeping all errors.
    pub fn merge(mut self, other: ValidationResult) -> Self {
        self.errors.extend(other.errors);
        self.is_valid = self.errors.is_empty();
        self
    }

    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }
}

impl std::fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.errors.is_empty() {
            return write!(f, "no errors");
        }
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{} [{}]: {}", e.field, e.code, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

pub fn validate_family_structure(family: &FamilyStructure) -> ValidationResult {
    let mut errors = Vec::new();

    let counts = [
        ("children_count", family.children_count, "Number of children"),
        ("adopted_children_count", family.adopted_children_count, "Number of adopted children"),
        ("grandchild_adopted_count", family.grandchild_adopted_count, "Number of adopted grandchildren"),
        ("parents_alive", family.parents_alive, "Number of surviving parents"),
        ("siblings_count", family.siblings_count, "Number of siblings"),
        ("half_siblings_count", family.half_siblings_count, "Number of half-siblings"),
        ("non_heirs_count", family.non_heirs_count, "Number of non-heirs"),
    ];
    for (field, value, label) in counts {
        if value < 0 {
            errors.push(ValidationError::new(
                field,
                ErrorCode::InvalidValue,
                format!("{} must be 0 or more (got {})", label, value),
            ));
        }
    }

    if family.parents_alive > MAX_PARENTS {
        errors.push(ValidationError::new(
            "parents_alive",
            ErrorCode::InvalidValue,
            format!("At most {} parents can survive (got {})", MAX_PARENTS, family.parents_alive),
        ));
    }

    if family.adopted_children_count > family.children_count {
        errors.push(ValidationError::new(
            "adopted_children_count",
            ErrorCode::Inconsistent,
            format!(
                "Adopted children ({}) cannot exceed children ({})",
                family.adopted_children_count, family.children_count
            ),
        ));
    }

    if family.grandchild_adopted_count > family.adopted_children_count {
        errors.push(ValidationError::new(
            "grandchild_adopted_count",
            ErrorCode::Inconsistent,
            format!(
                "Adopted grandchildren ({}) cannot exceed adopted children ({})",
                family.grandchild_adopted_count, family.adopted_children_count
            ),
        ));
    }

    if !family.has_statutory_heirs() {
        errors.push(ValidationError::new(
            "general",
            ErrorCode::NoHeirs,
            "There are no statutory heirs",
        ));
    }

    ValidationResult::from_errors(errors)
}

pub fn validate_taxable_amount(amount: Decimal) -> ValidationResult {
    let mut errors = Vec::new();
    check_yen("taxable_amount", "Taxable amount", amount, &mut errors);
    ValidationResult::from_errors(errors)
}

/// A yen input must be non-negative and no larger than `MAX_AMOUNT`.
fn check_yen(field: &str, label: &str, amount: Decimal, errors: &mut Vec<ValidationError>) {
    if amount < Decimal::ZERO {
        errors.push(ValidationError::new(
            field,
            ErrorCode::InvalidValue,
            format!("{} must be 0 or more (got {})", label, format_yen(amount)),
        ));
    } else if amount > MAX_AMOUNT {
        errors.push(ValidationError::new(
            field,
            ErrorCode::InvalidValue,
            format!("{} cannot exceed {} (got {})", label, format_yen(MAX_AMOUNT), amount),
        ));
    }
}

pub fn validate_division_input(input: &DivisionInput) -> ValidationResult {
    let mut errors = Vec::new();

    check_yen("total_amount", "Total amount", input.total_amount, &mut errors);
    check_yen("total_tax_amount", "Total tax amount", input.total_tax_amount, &mut errors);
    check_heirs(&input.heirs, &mut errors);

    let (field, noun) = match input.mode {
        DivisionMode::Amount => ("amounts", "amount"),
        DivisionMode::Percentage => ("percentages", "percentage"),
    };

    let Some(entries) = input.entries() else {
        errors.push(ValidationError::new(
            field,
            ErrorCode::Missing,
            format!("Enter the {} each person acquires", noun),
        ));
        return ValidationResult::from_errors(errors);
    };

    check_entries(field, noun, entries, &input.heirs, &mut errors);
    if input.mode == DivisionMode::Amount {
        for (id, value) in entries.iter().filter(|(_, v)| **v > MAX_AMOUNT) {
            errors.push(ValidationError::new(
                field,
                ErrorCode::InvalidValue,
                format!(
                    "The amount for {} cannot exceed {} (got {})",
                    id,
                    format_yen(MAX_AMOUNT),
                    value
                ),
            ));
        }
    }

    let Some(sum) = entries
        .values()
        .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(*value))
    else {
        errors.push(ValidationError::new(
            field,
            ErrorCode::InvalidValue,
            format!("The {}s are too large to add up", noun),
        ));
        return ValidationResult::from_errors(errors);
    };
    match input.mode {
        DivisionMode::Amount => {
            if round_yen(sum) != input.total_amount {
                errors.push(ValidationError::new(
                    field,
                    ErrorCode::InvalidSum,
                    format!(
                        "Acquired amounts total {} but the estate is {}",
                        format_yen(sum),
                        format_yen(input.total_amount)
                    ),
                ));
            }
        }
        DivisionMode::Percentage => {
            if (sum - dec!(100)).abs() > PERCENTAGE_TOLERANCE {
                errors.push(ValidationError::new(
                    field,
                    ErrorCode::InvalidSum,
                    format!("Percentages total {}, expected 100%", format_percent(sum)),
                ));
            }
        }
    }

    ValidationResult::from_errors(errors)
}

/// Heir ids key the division maps, so each must appear once; shares are
/// fractions of the whole estate.
fn check_heirs(heirs: &[Heir], errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    for heir in heirs {
        if !seen.insert(heir.id.as_str()) {
            errors.push(ValidationError::new(
                "heirs",
                ErrorCode::Inconsistent,
                format!("Heir id '{}' appears more than once", heir.id),
            ));
        }
        if heir.inheritance_share > Share::ONE {
            errors.push(ValidationError::new(
                "heirs",
                ErrorCode::InvalidValue,
                format!(
                    "Share {} for {} is larger than the whole estate",
                    heir.inheritance_share, heir.id
                ),
            ));
        }
    }
}

/// Every statutory heir needs an entry; no entry may be negative.
fn check_entries(
    field: &str,
    noun: &str,
    entries: &BTreeMap<String, Decimal>,
    heirs: &[Heir],
    errors: &mut Vec<ValidationError>,
) {
    for heir in heirs.iter().filter(|h| h.is_statutory()) {
        if !entries.contains_key(&heir.id) {
            errors.push(ValidationError::new(
                field,
                ErrorCode::MissingHeir,
                format!("No {} given for {}", noun, heir.name),
            ));
        }
    }

    for (id, value) in entries {
        if *value < Decimal::ZERO {
            errors.push(ValidationError::new(
                field,
                ErrorCode::InvalidValue,
                format!("The {} for {} cannot be negative", noun, id),
            ));
        }
    }
}
