//! Shared utilities and error types for the custody contract suite.
//!
//! This crate provides:
//! - [`CommonError`]: standardised error codes shared by the contracts.
//! - [`math`]: checked integer helpers for proportional payouts and fees.
//! - [`ttl`]: storage time-to-live extension helpers.
//!
//! Contract-specific errors reuse the same code ranges so that an error code
//! read off-chain can be classified without knowing which contract raised it.

#![no_std]
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod math;
pub mod ttl;

pub use math::*;
pub use ttl::*;

// ── Shared error enum ────────────────────────────────────────────────────────

/// Standardised error codes shared by every contract in the workspace.
///
/// # Code ranges
/// | Range   | Purpose                        |
/// |---------|--------------------------------|
/// | 1 – 9   | Lifecycle / initialisation     |
/// | 10 – 19 | Authentication & authorisation |
/// | 20 – 29 | Resource not found             |
/// | 30 – 39 | Validation / input             |
/// | 40 – 49 | Contract state                 |
/// | 50 – 59 | Timing gates                   |
/// | 60 – 69 | Amounts & balances             |
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum CommonError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    AccessDenied = 10,
    RecordNotFound = 20,
    InvalidInput = 30,
    /// Arithmetic would leave the representable range.
    Overflow = 33,
    InsufficientBalance = 61,
}
