//! Release-policy evaluators.
//!
//! Every function here is a pure function of the policy, the caller's
//! allocation and the ledger time. Nothing reads or writes storage, so the
//! ledger can evaluate a claim completely before it touches the vault.

use common::mul_div_floor;

use crate::types::{Allocation, LinearWindow, ReleasePolicy};

/// Minimum length of a linear vesting window, in seconds.
pub const MIN_DURATION: u64 = 60;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PolicyError {
    NotQualified,
    StillInCliff,
    Expired,
    NotExpired,
    NothingToClaim,
    Unsupported,
    Overflow,
}

/// Cumulative amount a linear allocation has earned at `now`.
///
/// `total * elapsed / duration`, truncated, where both `elapsed` and
/// `duration` are measured from the end of the recipient's cliff. Reaches
/// exactly `total` at `window.to`.
pub fn linear_entitled(
    window: &LinearWindow,
    allocation: &Allocation,
    now: u64,
) -> Result<u64, PolicyError> {
    let start = window
        .from
        .checked_add(allocation.cliff)
        .ok_or(PolicyError::Overflow)?;
    if now < start {
        return Err(PolicyError::StillInCliff);
    }
    if now >= window.to {
        return Ok(allocation.total);
    }

    let duration = window.to - start;
    let elapsed = now - start;
    let entitled =
        mul_div_floor(allocation.total, elapsed, duration).map_err(|_| PolicyError::Overflow)?;
    Ok(entitled.min(allocation.total))
}

impl ReleasePolicy {
    /// Amount `allocation` may claim at `now`, never zero.
    pub fn claimable(&self, allocation: Option<&Allocation>, now: u64) -> Result<u64, PolicyError> {
        let claimable = match self {
            ReleasePolicy::Linear(window) => {
                let allocation = allocation.ok_or(PolicyError::NotQualified)?;
                let entitled = linear_entitled(window, allocation, now)?;
                entitled.saturating_sub(allocation.claimed)
            }
            ReleasePolicy::FixedAllocation(expire_at) => {
                let allocation = allocation.ok_or(PolicyError::NotQualified)?;
                if is_expired(*expire_at, now) {
                    return Err(PolicyError::Expired);
                }
                allocation.remaining()
            }
            ReleasePolicy::TimeLock(_) => return Err(PolicyError::NotQualified),
        };

        if claimable == 0 {
            return Err(PolicyError::NothingToClaim);
        }
        Ok(claimable)
    }

    /// Whether the owner may drain the reserve at `now`.
    ///
    /// Linear schedules are reclaimable at any time; outstanding recipient
    /// allocations are forfeited.
    pub fn check_reclaim(&self, now: u64) -> Result<(), PolicyError> {
        match self {
            ReleasePolicy::Linear(_) => Ok(()),
            ReleasePolicy::TimeLock(unlock_time) => {
                if now >= *unlock_time {
                    Ok(())
                } else {
                    Err(PolicyError::NotExpired)
                }
            }
            ReleasePolicy::FixedAllocation(expire_at) => {
                if *expire_at != 0 && now > *expire_at {
                    Ok(())
                } else {
                    Err(PolicyError::NotExpired)
                }
            }
        }
    }

    /// Whether new allocations may be appended at `now`.
    pub fn check_append(&self, now: u64) -> Result<(), PolicyError> {
        match self {
            ReleasePolicy::FixedAllocation(expire_at) => {
                if is_expired(*expire_at, now) {
                    Err(PolicyError::Expired)
                } else {
                    Ok(())
                }
            }
            _ => Err(PolicyError::Unsupported),
        }
    }

    /// One-shot policies remove the allocation entry once it is paid.
    pub fn consumes_allocation(&self) -> bool {
        matches!(self, ReleasePolicy::FixedAllocation(_))
    }
}

fn is_expired(expire_at: u64, now: u64) -> bool {
    expire_at != 0 && now > expire_at
}
