//! Checked integer helpers.
//!
//! All payout arithmetic in the workspace is unsigned and truncating. Products
//! are widened to `u128` before division so `total * elapsed` cannot wrap for
//! any pair of `u64` operands.

use crate::CommonError;

/// Basis-point denominator (1 bp = 0.01 %).
pub const BPS_DENOMINATOR: u64 = 10_000;

/// `value * numerator / denominator`, truncating toward zero.
///
/// Fails with `InvalidInput` on a zero denominator and `Overflow` when the
/// quotient does not fit back into a `u64`.
pub fn mul_div_floor(value: u64, numerator: u64, denominator: u64) -> Result<u64, CommonError> {
    if denominator == 0 {
        return Err(CommonError::InvalidInput);
    }
    let product = (value as u128)
        .checked_mul(numerator as u128)
        .ok_or(CommonError::Overflow)?;
    u64::try_from(product / denominator as u128).map_err(|_| CommonError::Overflow)
}

/// Fee of `bps` basis points on `amount`, rounded down.
pub fn bps_of(amount: u64, bps: u64) -> Result<u64, CommonError> {
    mul_div_floor(amount, bps, BPS_DENOMINATOR)
}

/// Checked sum of a sequence of amounts.
pub fn checked_sum<I>(amounts: I) -> Result<u64, CommonError>
where
    I: IntoIterator<Item = u64>,
{
    amounts.into_iter().try_fold(0u64, |acc, a| {
        acc.checked_add(a).ok_or(CommonError::Overflow)
    })
}

/// Widen a ledger amount to the `i128` unit used by SEP-41 token clients.
pub fn to_token_amount(amount: u64) -> i128 {
    amount as i128
}
