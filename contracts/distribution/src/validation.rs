//! Input checks shared by the create and append paths.
//!
//! Shape errors (`InvalidParameter`) are always reported before schedule
//! errors (`InvalidSchedule`).

use common::checked_sum;
use soroban_sdk::{Address, Vec};

use crate::errors::{map_common_error, DistributionError};
use crate::policy::MIN_DURATION;
use crate::types::LinearWindow;

/// Non-empty, equal-length recipient and amount lists with positive amounts.
/// Returns the sum of `amounts`.
pub fn validate_allocation_inputs(
    recipients: &Vec<Address>,
    amounts: &Vec<u64>,
) -> Result<u64, DistributionError> {
    if recipients.is_empty() || recipients.len() != amounts.len() {
        return Err(DistributionError::InvalidParameter);
    }
    if amounts.iter().any(|a| a == 0) {
        return Err(DistributionError::InvalidParameter);
    }
    checked_sum(amounts.iter()).map_err(map_common_error)
}

/// Rejects a recipient listed more than once.
pub fn validate_unique(recipients: &Vec<Address>) -> Result<(), DistributionError> {
    for i in 0..recipients.len() {
        for j in (i + 1)..recipients.len() {
            if recipients.get(i) == recipients.get(j) {
                return Err(DistributionError::InvalidParameter);
            }
        }
    }
    Ok(())
}

/// `to > from + MIN_DURATION` and every cliff strictly inside the window.
pub fn validate_linear(
    window: &LinearWindow,
    cliffs: &Vec<u64>,
    recipient_count: u32,
) -> Result<(), DistributionError> {
    if cliffs.len() != recipient_count {
        return Err(DistributionError::InvalidParameter);
    }
    let earliest_end = window
        .from
        .checked_add(MIN_DURATION)
        .ok_or(DistributionError::InvalidSchedule)?;
    if window.to <= earliest_end {
        return Err(DistributionError::InvalidSchedule);
    }
    let span = window.to - window.from;
    if cliffs.iter().any(|c| c >= span) {
        return Err(DistributionError::InvalidSchedule);
    }
    Ok(())
}

/// A lock must unlock strictly in the future.
pub fn validate_unlock(unlock_time: u64, now: u64) -> Result<(), DistributionError> {
    if unlock_time <= now {
        return Err(DistributionError::InvalidSchedule);
    }
    Ok(())
}

/// An expiring airdrop must expire strictly in the future.
pub fn validate_expiry(expire_at: u64, now: u64) -> Result<(), DistributionError> {
    if expire_at != 0 && expire_at <= now {
        return Err(DistributionError::InvalidSchedule);
    }
    Ok(())
}
