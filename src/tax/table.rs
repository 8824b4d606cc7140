use crate::core::{Heir, HeirType, Share};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Basic deduction: fixed part
pub const BASIC_DEDUCTION_BASE: Decimal = dec!(30000000);
/// Basic deduction: added per statutory heir
pub const BASIC_DEDUCTION_PER_HEIR: Decimal = dec!(6000000);
/// Surcharge for heirs outside the spouse / child / parent circle (2割加算)
pub const SURCHARGE_RATE: Decimal = dec!(0.2);
/// The spouse pays no tax on acquisitions up to at least this amount
pub const SPOUSAL_REDUCTION_FLOOR: Decimal = dec!(160000000);

/// Adopted children counted for the deduction when a biological child exists
const ADOPTED_CAP_WITH_BIOLOGICAL: usize = 1;
/// Adopted children counted for the deduction otherwise
const ADOPTED_CAP_WITHOUT_BIOLOGICAL: usize = 2;

/// One row of the inheritance tax quick-calculation table (速算表)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxBracket {
    /// Inclusive upper bound; `None` for the top bracket
    pub max_amount: Option<Decimal>,
    pub rate: Decimal,
    pub deduction: Decimal,
}

impl TaxBracket {
    const fn new(max_amount: Option<Decimal>, rate: Decimal, deduction: Decimal) -> Self {
        TaxBracket {
            max_amount,
            rate,
            deduction,
        }
    }

    /// Whether `amount / denom` falls within this bracket, compared without
    /// dividing. A bound too large to scale covers every `Decimal`.
    pub fn contains_scaled(&self, amount: Decimal, denom: Decimal) -> bool {
        self.max_amount
            .and_then(|max| max.checked_mul(denom))
            .map_or(true, |limit| amount <= limit)
    }

    /// Rate as a percentage for display, e.g. `15`.
    pub fn rate_pct(&self) -> Decimal {
        (self.rate * dec!(100)).normalize()
    }
}

pub const TAX_TABLE: [TaxBracket; 8] = [
    TaxBracket::new(Some(dec!(10000000)), dec!(0.10), dec!(0)),
    TaxBracket::new(Some(dec!(30000000)), dec!(0.15), dec!(500000)),
    TaxBracket::new(Some(dec!(50000000)), dec!(0.20), dec!(2000000)),
    TaxBracket::new(Some(dec!(100000000)), dec!(0.30), dec!(7000000)),
    TaxBracket::new(Some(dec!(200000000)), dec!(0.40), dec!(17000000)),
    TaxBracket::new(Some(dec!(300000000)), dec!(0.45), dec!(27000000)),
    TaxBracket::new(Some(dec!(600000000)), dec!(0.50), dec!(42000000)),
    TaxBracket::new(None, dec!(0.55), dec!(72000000)),
];

/// The first bracket whose upper bound covers `amount`.
pub fn bracket_for(amount: Decimal) -> &'static TaxBracket {
    bracket_for_scaled(amount, Decimal::ONE)
}

fn bracket_for_scaled(amount: Decimal, denom: Decimal) -> &'static TaxBracket {
    TAX_TABLE
        .iter()
        .find(|b| b.contains_scaled(amount, denom))
        .unwrap_or(&TAX_TABLE[TAX_TABLE.len() - 1])
}

/// Tax on an amount from the table, truncated to whole yen.
pub fn tax_from_table(amount: Decimal) -> Decimal {
    tax_on_share(amount, Share::ONE)
}

/// Tax on `share` of `estate`, truncated to whole yen.
///
/// Works on `estate x numer` and divides by the denominator last, so a
/// portion such as 1/3 is never rounded before the rate is applied. Estates
/// too large for that product are taxed on the divided-out portion instead.
pub fn tax_on_share(estate: Decimal, share: Share) -> Decimal {
    if estate <= Decimal::ZERO || share.is_zero() {
        return Decimal::ZERO;
    }

    let (tax, bracket) = scaled_tax(estate, share).unwrap_or_else(|| {
        let portion = share.of(estate);
        let bracket = bracket_for(portion);
        (portion * bracket.rate - bracket.deduction, bracket)
    });
    let tax = tax.trunc();
    log::debug!(
        "Bracket {}%: {} of {} x {} - {} = {}",
        bracket.rate_pct(),
        share,
        estate,
        bracket.rate,
        bracket.deduction,
        tax
    );
    tax.max(Decimal::ZERO)
}

fn scaled_tax(estate: Decimal, share: Share) -> Option<(Decimal, &'static TaxBracket)> {
    let denom = Decimal::from(share.denom());
    let scaled = estate.checked_mul(Decimal::from(share.numer()))?;
    let bracket = bracket_for_scaled(scaled, denom);
    let gross = scaled.checked_mul(bracket.rate)?;
    let deduction = bracket.deduction.checked_mul(denom)?;
    Some(((gross - deduction) / denom, bracket))
}

/// Number of heirs for the basic deduction, with adopted children capped.
pub fn count_heirs_for_deduction(heirs: &[Heir]) -> usize {
    let mut count = 0;
    let mut adopted = 0;
    let mut has_biological = false;

    for heir in heirs {
        match heir.heir_type {
            HeirType::Spouse | HeirType::Parent | HeirType::Sibling => count += 1,
            HeirType::Child if heir.is_adopted() => adopted += 1,
            HeirType::Child => {
                count += 1;
                has_biological = true;
            }
            HeirType::Other => {}
        }
    }

    let cap = if has_biological {
        ADOPTED_CAP_WITH_BIOLOGICAL
    } else {
        ADOPTED_CAP_WITHOUT_BIOLOGICAL
    };
    count + adopted.min(cap)
}

pub fn basic_deduction_for(count: usize) -> Decimal {
    BASIC_DEDUCTION_BASE + BASIC_DEDUCTION_PER_HEIR * Decimal::from(count)
}

pub fn basic_deduction(heirs: &[Heir]) -> Decimal {
    basic_deduction_for(count_heirs_for_deduction(heirs))
}
