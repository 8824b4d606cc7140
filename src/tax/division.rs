use super::table::{SPOUSAL_REDUCTION_FLOOR, SURCHARGE_RATE};
use crate::core::{
    mul_div, round_yen, DivisionInput, DivisionMode, Heir, Relationship, RoundingMethod, Warning,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tax borne by one recipient of the actual division
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DivisionDetail {
    pub heir_id: String,
    pub name: String,
    pub relationship: Relationship,
    #[schemars(with = "f64")]
    pub acquired_amount: Decimal,
    /// Share of the aggregate tax in proportion to the amount acquired
    #[schemars(with = "f64")]
    pub distributed_tax: Decimal,
    /// Surcharge minus spousal reduction
    #[schemars(with = "f64")]
    pub adjustment: Decimal,
    #[schemars(with = "f64")]
    pub final_tax_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DivisionResult {
    #[schemars(with = "f64")]
    pub total_amount: Decimal,
    /// Aggregate tax under the statutory-share method, as supplied
    #[schemars(with = "f64")]
    pub statutory_tax_amount: Decimal,
    /// Sum of the rounded per-heir final amounts
    #[schemars(with = "f64")]
    pub total_final_tax_amount: Decimal,
    pub division_details: Vec<DivisionDetail>,
    #[serde(default)]
    pub warnings: Vec<Warning>,
}

impl DivisionResult {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Apportion the aggregate tax over an actual division of the estate.
///
/// Tax is first distributed by each recipient's actual share of
/// `total_amount`, then the 20% surcharge and the spousal reduction are
/// applied per heir. Amounts are kept exact until the end, where every
/// per-heir figure is rounded to whole yen.
pub fn calculate_actual_division(input: &DivisionInput) -> DivisionResult {
    let amounts = resolve_amounts(input);
    let total_amount = input.total_amount;
    let total_tax = input.total_tax_amount;

    let mut warnings: Vec<Warning> = amounts
        .keys()
        .filter(|id| input.heir(id).is_none())
        .map(|id| {
            log::warn!("Division entry '{}' matches no heir, ignoring", id);
            Warning::UnknownRecipient { id: id.clone() }
        })
        .collect();
    if total_amount.is_zero() {
        warnings.push(Warning::ZeroTotalAmount);
    }

    let mut division_details = Vec::new();
    for heir in &input.heirs {
        let acquired = amounts.get(&heir.id).copied().unwrap_or(Decimal::ZERO);
        // Unused placeholder rows
        if !heir.is_statutory() && acquired <= Decimal::ZERO {
            continue;
        }
        division_details.push(apportion(heir, acquired, total_amount, total_tax));
    }

    let total_final_tax_amount = division_details.iter().map(|d| d.final_tax_amount).sum();

    DivisionResult {
        total_amount,
        statutory_tax_amount: total_tax,
        total_final_tax_amount,
        division_details,
        warnings,
    }
}

fn resolve_amounts(input: &DivisionInput) -> BTreeMap<String, Decimal> {
    match input.mode {
        DivisionMode::Amount => input.amounts.clone().unwrap_or_default(),
        DivisionMode::Percentage => convert_percentage_to_amount(
            &input.percentages.clone().unwrap_or_default(),
            input.total_amount,
            input.rounding_method,
        ),
    }
}

fn apportion(heir: &Heir, acquired: Decimal, total_amount: Decimal, total_tax: Decimal) -> DivisionDetail {
    let distributed = if total_amount > Decimal::ZERO {
        mul_div(acquired, total_tax, total_amount)
    } else {
        Decimal::ZERO
    };

    let surcharge = if heir.two_fold_addition {
        distributed * SURCHARGE_RATE
    } else {
        Decimal::ZERO
    };
    let mut adjustment = surcharge;

    if heir.is_spouse() {
        let share = heir.inheritance_share;
        let limit = SPOUSAL_REDUCTION_FLOOR.max(share.of(total_amount));
        let tax_for_spouse = distributed + surcharge;
        let reduction = if acquired >= limit {
            tax_for_spouse
        } else {
            tax_for_spouse.min(share.of(total_tax))
        };
        log::debug!(
            "Spousal reduction: acquired {}, limit {}, reduction {}",
            acquired,
            limit,
            reduction
        );
        adjustment -= reduction;
    }

    let final_tax = (distributed + adjustment).max(Decimal::ZERO);
    log::debug!(
        "{}: acquired {}, distributed {}, adjustment {}, final {}",
        heir.id,
        acquired,
        distributed,
        adjustment,
        final_tax
    );

    DivisionDetail {
        heir_id: heir.id.clone(),
        name: heir.name.clone(),
        relationship: heir.relationship,
        acquired_amount: round_yen(acquired),
        distributed_tax: round_yen(distributed),
        adjustment: round_yen(adjustment),
        final_tax_amount: round_yen(final_tax),
    }
}

/// Convert percentages (0-100) into yen amounts summing to `total_amount`.
///
/// Each amount is rounded per `rounding`; the residual is handed out one yen
/// at a time, largest percentage first (ties by id), cycling until none is
/// left.
pub fn convert_percentage_to_amount(
    percentages: &BTreeMap<String, Decimal>,
    total_amount: Decimal,
    rounding: RoundingMethod,
) -> BTreeMap<String, Decimal> {
    if percentages.is_empty() {
        return BTreeMap::new();
    }

    let mut amounts: BTreeMap<String, Decimal> = percentages
        .iter()
        .map(|(id, pct)| (id.clone(), rounding.apply(total_amount * pct / dec!(100))))
        .collect();

    let mut order: Vec<&String> = percentages.keys().collect();
    order.sort_by(|a, b| percentages[*b].cmp(&percentages[*a]).then_with(|| a.cmp(b)));

    let diff = total_amount - amounts.values().copied().sum::<Decimal>();
    if diff.is_zero() {
        return amounts;
    }

    // Whole cycles first, then the remaining yen one at a time.
    let people = Decimal::from(order.len());
    let whole = diff.trunc();
    let per_person = (whole / people).trunc();
    let remainder = whole - per_person * people;
    let step = if diff.is_sign_negative() { -Decimal::ONE } else { Decimal::ONE };
    let extra = remainder.abs();

    for (i, id) in order.iter().enumerate() {
        if let Some(amount) = amounts.get_mut(*id) {
            *amount += per_person;
            if Decimal::from(i) < extra {
                *amount += step;
            }
        }
    }

    // A fractional total leaves less than one yen over
    let fraction = diff - whole;
    if !fraction.is_zero() {
        if let Some(amount) = amounts.get_mut(order[0]) {
            *amount += fraction;
        }
    }

    log::debug!(
        "Converted {} percentages, residual {} distributed",
        percentages.len(),
        diff
    );
    amounts
}

/// Each statutory heir's share of `total_amount` in whole yen.
///
/// Shares are floored and the leftover yen handed out in heir order, so the
/// amounts sum to `total_amount`. Other-type heirs get 0.
pub fn statutory_split(heirs: &[Heir], total_amount: Decimal) -> BTreeMap<String, Decimal> {
    let mut amounts: BTreeMap<String, Decimal> = heirs
        .iter()
        .map(|h| {
            let amount = if h.is_statutory() {
                h.inheritance_share.of(total_amount).floor()
            } else {
                Decimal::ZERO
            };
            (h.id.clone(), amount)
        })
        .collect();

    let statutory: Vec<&Heir> = heirs.iter().filter(|h| h.is_statutory()).collect();
    let Some(first) = statutory.first() else {
        return amounts;
    };

    let mut residual = total_amount - amounts.values().copied().sum::<Decimal>();
    for heir in statutory.iter().cycle() {
        if residual < Decimal::ONE {
            break;
        }
        if let Some(amount) = amounts.get_mut(&heir.id) {
            *amount += Decimal::ONE;
        }
        residual -= Decimal::ONE;
    }
    if residual > Decimal::ZERO {
        if let Some(amount) = amounts.get_mut(&first.id) {
            *amount += residual;
        }
    }

    amounts
}
