use super::heir::Heir;
use super::yen::RoundingMethod;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How the actual split is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DivisionMode {
    /// Yen amounts per heir id
    #[default]
    Amount,
    /// Percentages (0-100) per heir id
    Percentage,
}

/// An actual division of the estate to be taxed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DivisionInput {
    pub heirs: Vec<Heir>,
    /// Total taxable value of the estate (yen)
    #[schemars(with = "f64")]
    pub total_amount: Decimal,
    /// Aggregate tax from the statutory-share calculation (yen)
    #[schemars(with = "f64")]
    pub total_tax_amount: Decimal,
    #[serde(default)]
    pub mode: DivisionMode,
    #[serde(default)]
    #[schemars(with = "Option<BTreeMap<String, f64>>")]
    pub amounts: Option<BTreeMap<String, Decimal>>,
    #[serde(default)]
    #[schemars(with = "Option<BTreeMap<String, f64>>")]
    pub percentages: Option<BTreeMap<String, Decimal>>,
    /// Rounding for percentage mode
    #[serde(default)]
    pub rounding_method: RoundingMethod,
}

impl DivisionInput {
    /// The map that applies to the selected mode.
    pub fn entries(&self) -> Option<&BTreeMap<String, Decimal>> {
        match self.mode {
            DivisionMode::Amount => self.amounts.as_ref(),
            DivisionMode::Percentage => self.percentages.as_ref(),
        }
    }

    pub fn heir(&self, id: &str) -> Option<&Heir> {
        self.heirs.iter().find(|h| h.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_minimal_amount_input() {
        let json = r#"{
            "heirs": [],
            "total_amount": 100000000,
            "total_tax_amount": 6300000,
            "amounts": {"spouse": 100000000}
        }"#;
        let input: DivisionInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.mode, DivisionMode::Amount);
        assert_eq!(input.rounding_method, RoundingMethod::Round);
        assert_eq!(input.total_amount, dec!(100000000));
        assert_eq!(input.entries().unwrap()["spouse"], dec!(100000000));
    }

    #[test]
    fn entries_follow_mode() {
        let json = r#"{
            "heirs": [],
            "total_amount": 1000,
            "total_tax_amount": 0,
            "mode": "percentage",
            "amounts": {"a": 1000},
            "percentages": {"a": 100}
        }"#;
        let input: DivisionInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.entries().unwrap()["a"], dec!(100));
    }
}
