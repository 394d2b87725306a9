use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::types::{Document, LineItem};

/// Document-level monetary figures, computed once and shared by the JSON
/// record and the PDF so both always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of line totals excluding tax.
    pub subtotal_ex_tax: Decimal,
    /// Tax over all lines.
    pub total_tax: Decimal,
    /// subtotal_ex_tax + total_tax.
    pub net_payable: Decimal,
}

impl Totals {
    /// Totals of `doc`. Amounts that do not fit in a `Decimal` saturate at
    /// `Decimal::MAX`; use [`Totals::checked`] to detect that case.
    pub fn of(doc: &Document) -> Self {
        let subtotal_ex_tax = subtotal_ex_tax(doc);
        let total_tax = total_tax(doc);
        Self {
            subtotal_ex_tax,
            total_tax,
            net_payable: round2(subtotal_ex_tax.saturating_add(total_tax)),
        }
    }

    /// Totals of `doc`, or `None` when any intermediate amount overflows.
    pub fn checked(doc: &Document) -> Option<Self> {
        let subtotal_ex_tax = checked_subtotal_ex_tax(doc)?;
        let total_tax = checked_total_tax(doc)?;
        Some(Self {
            subtotal_ex_tax,
            total_tax,
            net_payable: round2(subtotal_ex_tax.checked_add(total_tax)?),
        })
    }
}

/// Round to cents, midpoints away from zero (commercial rounding):
/// 0.005 → 0.01, -0.005 → -0.01.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `quantity * unit_price`, discounted, rounded to cents.
///
/// Negative discounts count as no discount. The discount factor is floored at
/// zero, so a discount above 100% zeroes the line rather than inverting it.
/// Saturates at `Decimal::MAX` when the product overflows.
pub fn line_total_ex_tax(line: &LineItem) -> Decimal {
    checked_line_total_ex_tax(line).unwrap_or(Decimal::MAX)
}

/// [`line_total_ex_tax`], or `None` when the product overflows.
pub fn checked_line_total_ex_tax(line: &LineItem) -> Option<Decimal> {
    let mut price = line.quantity.checked_mul(line.unit_price)?;
    let discount = line.discount_pct.max(Decimal::ZERO);
    if !discount.is_zero() {
        price = price.checked_mul((Decimal::ONE - discount / dec!(100)).max(Decimal::ZERO))?;
    }
    Some(round2(price))
}

/// Unrounded tax term of one line, or `None` on overflow.
pub fn checked_line_tax(line: &LineItem) -> Option<Decimal> {
    checked_line_total_ex_tax(line)?
        .checked_mul(line.tax_pct.max(Decimal::ZERO))?
        .checked_div(dec!(100))
}

/// Sum of the (already rounded) line totals, rounded once more.
pub fn subtotal_ex_tax(doc: &Document) -> Decimal {
    checked_subtotal_ex_tax(doc).unwrap_or(Decimal::MAX)
}

pub fn checked_subtotal_ex_tax(doc: &Document) -> Option<Decimal> {
    doc.lines
        .iter()
        .try_fold(Decimal::ZERO, |sum, line| {
            sum.checked_add(checked_line_total_ex_tax(line)?)
        })
        .map(round2)
}

/// Per-line tax terms are summed unrounded; only the sum is rounded.
pub fn total_tax(doc: &Document) -> Decimal {
    checked_total_tax(doc).unwrap_or(Decimal::MAX)
}

pub fn checked_total_tax(doc: &Document) -> Option<Decimal> {
    doc.lines
        .iter()
        .try_fold(Decimal::ZERO, |sum, line| sum.checked_add(checked_line_tax(line)?))
        .map(round2)
}

pub fn net_payable(doc: &Document) -> Decimal {
    round2(subtotal_ex_tax(doc).saturating_add(total_tax(doc)))
}
