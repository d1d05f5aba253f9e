//! Rounding and overflow-safe arithmetic shared by the income calculations.

use rust_decimal::Decimal;
use tracing::warn;

/// Rounds a monetary value to cents, with midpoints rounded away from zero.
///
/// Values that already carry two or fewer decimal places come back unchanged,
/// scale included.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use fsr_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(123.456)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Adds two amounts, clamping to [`Decimal::MAX`] or [`Decimal::MIN`] instead
/// of overflowing.
pub fn saturating_add(
    lhs: Decimal,
    rhs: Decimal,
) -> Decimal {
    lhs.checked_add(rhs).unwrap_or_else(|| {
        // Overflow only happens when both operands share a sign.
        let clamped = if rhs.is_sign_negative() { Decimal::MIN } else { Decimal::MAX };
        warn!(%lhs, %rhs, %clamped, "amount sum out of range, clamping");
        clamped
    })
}

/// Subtracts `rhs` from `lhs`, clamping like [`saturating_add`].
pub fn saturating_sub(
    lhs: Decimal,
    rhs: Decimal,
) -> Decimal {
    lhs.checked_sub(rhs).unwrap_or_else(|| {
        let clamped = if rhs.is_sign_negative() { Decimal::MAX } else { Decimal::MIN };
        warn!(%lhs, %rhs, %clamped, "amount difference out of range, clamping");
        clamped
    })
}

/// Sums amounts with [`saturating_add`], starting from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use fsr_core::calculations::common::saturating_sum;
///
/// assert_eq!(saturating_sum([dec!(100.25), dec!(-0.25)]), dec!(100.00));
/// assert_eq!(saturating_sum([Decimal::MAX, Decimal::ONE]), Decimal::MAX);
/// ```
pub fn saturating_sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values.into_iter().fold(Decimal::ZERO, saturating_add)
}
