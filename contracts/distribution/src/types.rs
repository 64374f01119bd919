use soroban_sdk::{contracttype, Address};

/// Vesting window for a linear schedule, in ledger seconds.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LinearWindow {
    pub from: u64,
    pub to: u64,
}

/// How the escrowed value of one distribution is released.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReleasePolicy {
    /// Pro-rata release over `[from, to]`, gated by a per-recipient cliff.
    Linear(LinearWindow),
    /// Owner-only payout once the ledger reaches the unlock time.
    TimeLock(u64),
    /// One-shot claims of a fixed amount until the expiry (0 = never).
    FixedAllocation(u64),
}

/// A single recipient's entitlement within a distribution.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Allocation {
    pub total: u64,
    pub claimed: u64,
    /// Seconds after the window start before the first claim. Linear only.
    pub cliff: u64,
}

impl Allocation {
    pub fn new(total: u64, cliff: u64) -> Self {
        Allocation {
            total,
            claimed: 0,
            cliff,
        }
    }

    /// Amount still owed to the recipient.
    pub fn remaining(&self) -> u64 {
        self.total.saturating_sub(self.claimed)
    }
}

/// One deposit's full record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Distribution {
    pub id: u64,
    pub owner: Address,
    /// Token contract of the escrowed asset.
    pub asset: Address,
    pub created_at: u64,
    /// Value still held in custody for this record.
    pub amount: u64,
    pub withdrawn_at: Option<u64>,
    pub policy: ReleasePolicy,
    /// Live entries in the allocation table (0 for time-locks).
    pub recipient_count: u32,
}

impl Distribution {
    pub fn is_withdrawn(&self) -> bool {
        self.withdrawn_at.is_some()
    }
}

/// Engine parameters fixed at bootstrap; only `price` changes afterwards.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EngineConfig {
    /// Treasury contract receiving every fee.
    pub treasury: Address,
    /// Token in which flat fees (`price`) are paid.
    pub fee_token: Address,
    /// Flat fee charged per vesting or lock creation.
    pub price: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Distribution(u64),
    Allocations(u64),
    Reserve(u64),
    Owned(Address),
}
