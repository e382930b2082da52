//! Monetary rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept on every monetary amount.
pub const MONEY_DP: u32 = 2;

/// Rounds an amount to 2 decimal places, half away from zero.
///
/// Applied after every stage, not only on the final figures, so that
/// intermediate amounts match those printed on reference payslips. The
/// result always carries exactly two decimal places.
///
/// # Examples
///
/// ```
/// use moroccan_payroll::calculation::round_money;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_money(dec!(2458.255)), dec!(2458.26));
/// assert_eq!(round_money(dec!(355.9499)), dec!(355.95));
/// assert_eq!(round_money(dec!(0.004)), dec!(0.00));
/// assert_eq!(round_money(dec!(15750)).to_string(), "15750.00");
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_DP);
    rounded
}
