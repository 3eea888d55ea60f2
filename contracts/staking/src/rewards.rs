//! Reward-accrual arithmetic.
//!
//! `reward = amount × base_rate × multiplier × elapsed / ACCRUAL_DENOMINATOR`
//! with truncating division. The whole product is carried in `i128` and every
//! step is checked; an out-of-range intermediate fails with
//! `ArithmeticOverflow` instead of wrapping.

use crate::ContractError;

/// Blocks-per-year times the basis-point normalization of `base_rate` and
/// `multiplier` (both expressed x100).
pub const ACCRUAL_DENOMINATOR: i128 = 14_400_000;

/// Rewards earned by a position of `amount` over `elapsed` time units.
pub fn accrued(
    amount: i128,
    base_rate: i128,
    multiplier: i128,
    elapsed: u64,
) -> Result<i128, ContractError> {
    let product = amount
        .checked_mul(base_rate)
        .and_then(|v| v.checked_mul(multiplier))
        .and_then(|v| v.checked_mul(elapsed as i128))
        .ok_or(ContractError::ArithmeticOverflow)?;
    Ok(product / ACCRUAL_DENOMINATOR)
}
