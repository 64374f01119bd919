use common::CommonError;
use soroban_sdk::contracterror;

use crate::policy::PolicyError;
use crate::vault::VaultError;

/// Errors returned by the distribution engine.
///
/// Codes follow the ranges documented on [`common::CommonError`].
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum DistributionError {
    // ── Lifecycle (1–9) ──────────────────────────────────────
    NotInitialized = 1,
    AlreadyInitialized = 2,
    // ── Permission (10–19) ───────────────────────────────────
    /// Caller is not the owner of the distribution.
    NotOwner = 10,
    /// Caller may not perform an owner or fee-collector action.
    NoPermission = 11,
    // ── Not found (20–29) ────────────────────────────────────
    NotFound = 20,
    /// Caller holds no allocation in the distribution.
    NotQualified = 21,
    // ── Validation (30–39) ───────────────────────────────────
    /// Empty, length-mismatched, duplicate or zero-valued inputs.
    InvalidParameter = 30,
    /// Bad time window, cliff, unlock time or expiry.
    InvalidSchedule = 31,
    /// Operation does not apply to this release policy.
    UnsupportedPolicy = 32,
    Overflow = 33,
    // ── State (40–49) ────────────────────────────────────────
    AlreadyWithdrawn = 40,
    // ── Timing gates (50–59) ─────────────────────────────────
    StillInCliff = 50,
    Expired = 51,
    NotExpired = 52,
    // ── Amounts (60–69) ──────────────────────────────────────
    NothingToClaim = 60,
    InsufficientBalance = 61,
    /// Ledger bookkeeping and vault reserve disagree.
    CustodyMismatch = 62,
}

pub fn map_common_error(e: CommonError) -> DistributionError {
    match e {
        CommonError::NotInitialized => DistributionError::NotInitialized,
        CommonError::AlreadyInitialized => DistributionError::AlreadyInitialized,
        CommonError::AccessDenied => DistributionError::NoPermission,
        CommonError::RecordNotFound => DistributionError::NotFound,
        CommonError::InvalidInput => DistributionError::InvalidParameter,
        CommonError::Overflow => DistributionError::Overflow,
        CommonError::InsufficientBalance => DistributionError::InsufficientBalance,
    }
}

pub fn map_policy_error(e: PolicyError) -> DistributionError {
    match e {
        PolicyError::NotQualified => DistributionError::NotQualified,
        PolicyError::StillInCliff => DistributionError::StillInCliff,
        PolicyError::Expired => DistributionError::Expired,
        PolicyError::NotExpired => DistributionError::NotExpired,
        PolicyError::NothingToClaim => DistributionError::NothingToClaim,
        PolicyError::Unsupported => DistributionError::UnsupportedPolicy,
        PolicyError::Overflow => DistributionError::Overflow,
    }
}

pub fn map_vault_error(e: VaultError) -> DistributionError {
    match e {
        VaultError::ReserveNotFound => DistributionError::NotFound,
        VaultError::InsufficientBalance => DistributionError::InsufficientBalance,
        VaultError::ReserveExists | VaultError::NotEmpty => DistributionError::CustodyMismatch,
        VaultError::Overflow => DistributionError::Overflow,
    }
}
