use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Domain warning types emitted during calculation.
///
/// Warnings never stop a calculation; they flag input that was degraded
/// to a defined result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type")]
pub enum Warning {
    /// A division entry names an id that is not in the heir list and was ignored.
    UnknownRecipient { id: String },
    /// Total estate value is zero, so no tax can be distributed.
    ZeroTotalAmount,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::UnknownRecipient { id } => {
                write!(f, "'{}' is not in the heir list and was ignored", id)
            }
            Warning::ZeroTotalAmount => write!(f, "total amount is zero, no tax distributed"),
        }
    }
}
