use rust_decimal::{Decimal, RoundingStrategy};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How a percentage-derived amount is brought to whole yen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMethod {
    /// Nearest yen, halves rounded up
    #[default]
    Round,
    Floor,
    Ceil,
}

impl RoundingMethod {
    pub fn apply(self, amount: Decimal) -> Decimal {
        match self {
            RoundingMethod::Round => round_yen(amount),
            RoundingMethod::Floor => amount.floor(),
            RoundingMethod::Ceil => amount.ceil(),
        }
    }
}

/// Round to the nearest whole yen (half away from zero).
pub fn round_yen(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// `value x numer / denom`, multiplying first while the product fits in a
/// `Decimal` and dividing first once it would overflow.
pub fn mul_div(value: Decimal, numer: Decimal, denom: Decimal) -> Decimal {
    match value.checked_mul(numer) {
        Some(product) => product / denom,
        None => value / denom * numer,
    }
}

/// Format as `¥12,345,678`, rounding to whole yen.
pub fn format_yen(amount: Decimal) -> String {
    let rounded = round_yen(amount);
    let digits = rounded.abs().trunc().to_string();
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{}¥{}", sign, group_thousands(&digits))
}

/// Format a percentage such as `dec!(33.3333)` as `33.33%`.
pub fn format_percent(pct: Decimal) -> String {
    format!("{:.2}%", pct)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rounding_methods() {
        assert_eq!(RoundingMethod::Round.apply(dec!(10.5)), dec!(11));
        assert_eq!(RoundingMethod::Round.apply(dec!(10.49)), dec!(10));
        assert_eq!(RoundingMethod::Floor.apply(dec!(10.99)), dec!(10));
        assert_eq!(RoundingMethod::Ceil.apply(dec!(10.01)), dec!(11));
        assert_eq!(RoundingMethod::Ceil.apply(dec!(10)), dec!(10));
    }

    #[test]
    fn mul_div_exact_and_overflow_safe() {
        assert_eq!(mul_div(dec!(1), dec!(1.5), dec!(3)), dec!(0.5));
        assert_eq!(mul_div(dec!(80000000), dec!(6300000), dec!(100000000)), dec!(5040000));
        let big = mul_div(Decimal::MAX, dec!(2), dec!(3));
        assert_eq!(big, Decimal::MAX / dec!(3) * dec!(2));
    }

    #[test]
    fn yen_formatting() {
        assert_eq!(format_yen(dec!(0)), "¥0");
        assert_eq!(format_yen(dec!(999)), "¥999");
        assert_eq!(format_yen(dec!(1000)), "¥1,000");
        assert_eq!(format_yen(dec!(6300000)), "¥6,300,000");
        assert_eq!(format_yen(dec!(123456789.6)), "¥123,456,790");
        assert_eq!(format_yen(dec!(-2500)), "-¥2,500");
    }

    #[test]
    fn percent_formatting() {
        assert_eq!(format_percent(dec!(50)), "50.00%");
        assert_eq!(format_percent(dec!(33.3333)), "33.33%");
    }

    #[test]
    fn rounding_method_serde() {
        let method: RoundingMethod = serde_json::from_str("\"ceil\"").unwrap();
        assert_eq!(method, RoundingMethod::Ceil);
        assert_eq!(serde_json::to_string(&RoundingMethod::Floor).unwrap(), "\"floor\"");
    }
}
