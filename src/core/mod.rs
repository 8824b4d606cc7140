pub mod division;
pub mod family;
pub mod heir;
pub mod share;
pub mod validation;
pub mod warnings;
pub mod yen;

// Flat public surface for domain types and functions.
pub use division::{DivisionInput, DivisionMode};
pub use family::FamilyStructure;
pub use heir::{Heir, HeirType, Relationship};
pub use share::{Share, ShareError};
pub use validation::{
    validate_division_input, validate_family_structure, validate_taxable_amount, ErrorCode,
    ValidationError, ValidationResult, MAX_AMOUNT,
};
pub use warnings::Warning;
pub use yen::{format_percent, format_yen, mul_div, round_yen, RoundingMethod};
