//! # Distribution Ledger
//!
//! Authoritative record store: one [`Distribution`] per deposit plus its
//! allocation table, both keyed by id.
//!
//! Create, append and ownership transfer are split into a `prepare_*` step
//! that validates everything and computes the new state without writing, and
//! a `commit_*` step that performs the writes together with the matching
//! vault movement. The entry point charges fees in between, so every error is
//! raised before the first mutation.
//!
//! Claims and withdrawals carry no fee and run as a single call each.

use common::extend_persistent_ttl;
use soroban_sdk::{Address, Env, Map, Vec};

use crate::config;
use crate::errors::{map_policy_error, map_vault_error, DistributionError};
use crate::owner_index;
use crate::types::{Allocation, DataKey, Distribution, LinearWindow, ReleasePolicy};
use crate::validation;
use crate::vault::{self, CustodyAuthority};

/// Release schedule requested at creation time.
#[derive(Clone, Debug)]
pub enum Schedule {
    Linear { window: LinearWindow, cliffs: Vec<u64> },
    TimeLock { unlock_time: u64 },
    FixedAllocation { expire_at: u64 },
}

/// A validated distribution that has not been written yet.
pub struct Draft {
    pub owner: Address,
    pub asset: Address,
    pub policy: ReleasePolicy,
    pub total: u64,
    pub allocations: Map<Address, Allocation>,
}

/// A validated append that has not been written yet.
pub struct AppendDraft {
    pub record: Distribution,
    pub allocations: Map<Address, Allocation>,
    pub added: u64,
}

/// Outcome of a successful claim.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Payout {
    pub amount: u64,
    /// Cumulative amount the recipient has received from this distribution.
    pub claimed_total: u64,
}

// ── Storage helpers ───────────────────────────────────────────────────────────

pub fn load(env: &Env, id: u64) -> Result<Distribution, DistributionError> {
    env.storage()
        .persistent()
        .get(&DataKey::Distribution(id))
        .ok_or(DistributionError::NotFound)
}

fn save(env: &Env, record: &Distribution) {
    let key = DataKey::Distribution(record.id);
    env.storage().persistent().set(&key, record);
    extend_persistent_ttl(env, &key);
}

pub fn allocations(env: &Env, id: u64) -> Map<Address, Allocation> {
    env.storage()
        .persistent()
        .get(&DataKey::Allocations(id))
        .unwrap_or(Map::new(env))
}

fn save_allocations(env: &Env, id: u64, table: &Map<Address, Allocation>) {
    let key = DataKey::Allocations(id);
    env.storage().persistent().set(&key, table);
    extend_persistent_ttl(env, &key);
}

/// Fold `amounts` into `table`, summing onto existing entries.
fn merge_into(
    table: &mut Map<Address, Allocation>,
    recipients: &Vec<Address>,
    amounts: &Vec<u64>,
) -> Result<(), DistributionError> {
    for (recipient, amount) in recipients.iter().zip(amounts.iter()) {
        let entry = match table.get(recipient.clone()) {
            Some(mut existing) => {
                existing.total = existing
                    .total
                    .checked_add(amount)
                    .ok_or(DistributionError::Overflow)?;
                existing
            }
            None => Allocation::new(amount, 0),
        };
        table.set(recipient, entry);
    }
    Ok(())
}

// ── Create ────────────────────────────────────────────────────────────────────

pub fn prepare_create(
    env: &Env,
    owner: &Address,
    asset: &Address,
    recipients: &Vec<Address>,
    amounts: &Vec<u64>,
    schedule: Schedule,
) -> Result<Draft, DistributionError> {
    let total = validation::validate_allocation_inputs(recipients, amounts)?;
    let now = env.ledger().timestamp();
    let mut table = Map::new(env);

    let policy = match schedule {
        Schedule::Linear { window, cliffs } => {
            validation::validate_unique(recipients)?;
            validation::validate_linear(&window, &cliffs, recipients.len())?;
            for i in 0..recipients.len() {
                let recipient = recipients.get(i).ok_or(DistributionError::InvalidParameter)?;
                let amount = amounts.get(i).ok_or(DistributionError::InvalidParameter)?;
                let cliff = cliffs.get(i).ok_or(DistributionError::InvalidParameter)?;
                table.set(recipient, Allocation::new(amount, cliff));
            }
            ReleasePolicy::Linear(window)
        }
        Schedule::TimeLock { unlock_time } => {
            if recipients.len() != 1 {
                return Err(DistributionError::InvalidParameter);
            }
            validation::validate_unlock(unlock_time, now)?;
            ReleasePolicy::TimeLock(unlock_time)
        }
        Schedule::FixedAllocation { expire_at } => {
            validation::validate_expiry(expire_at, now)?;
            merge_into(&mut table, recipients, amounts)?;
            ReleasePolicy::FixedAllocation(expire_at)
        }
    };

    Ok(Draft {
        owner: owner.clone(),
        asset: asset.clone(),
        policy,
        total,
        allocations: table,
    })
}

pub fn commit_create(
    env: &Env,
    auth: &CustodyAuthority,
    draft: Draft,
) -> Result<Distribution, DistributionError> {
    let id = config::next_index(env)?;

    vault::open(env, auth, id, &draft.asset).map_err(map_vault_error)?;
    vault::deposit(env, auth, id, &draft.owner, draft.total).map_err(map_vault_error)?;

    let record = Distribution {
        id,
        owner: draft.owner,
        asset: draft.asset,
        created_at: env.ledger().timestamp(),
        amount: draft.total,
        withdrawn_at: None,
        policy: draft.policy,
        recipient_count: draft.allocations.len(),
    };
    save(env, &record);
    if !draft.allocations.is_empty() {
        save_allocations(env, id, &draft.allocations);
    }
    owner_index::add(env, &record.owner, id);

    Ok(record)
}

// ── Append ────────────────────────────────────────────────────────────────────

pub fn prepare_append(
    env: &Env,
    caller: &Address,
    id: u64,
    recipients: &Vec<Address>,
    amounts: &Vec<u64>,
) -> Result<AppendDraft, DistributionError> {
    let mut record = load(env, id)?;
    if record.owner != *caller {
        return Err(DistributionError::NoPermission);
    }
    if record.is_withdrawn() {
        return Err(DistributionError::AlreadyWithdrawn);
    }
    record
        .policy
        .check_append(env.ledger().timestamp())
        .map_err(map_policy_error)?;

    let added = validation::validate_allocation_inputs(recipients, amounts)?;
    let mut table = allocations(env, id);
    merge_into(&mut table, recipients, amounts)?;

    record.amount = record
        .amount
        .checked_add(added)
        .ok_or(DistributionError::Overflow)?;
    record.recipient_count = table.len();

    Ok(AppendDraft {
        record,
        allocations: table,
        added,
    })
}

pub fn commit_append(
    env: &Env,
    auth: &CustodyAuthority,
    draft: AppendDraft,
) -> Result<Distribution, DistributionError> {
    let record = draft.record;
    // A fully claimed-out airdrop has had its reserve destroyed.
    if !vault::exists(env, record.id) {
        vault::open(env, auth, record.id, &record.asset).map_err(map_vault_error)?;
    }
    vault::deposit(env, auth, record.id, &record.owner, draft.added).map_err(map_vault_error)?;

    save_allocations(env, record.id, &draft.allocations);
    save(env, &record);
    Ok(record)
}

// ── Claim ─────────────────────────────────────────────────────────────────────

pub fn claim(
    env: &Env,
    auth: &CustodyAuthority,
    caller: &Address,
    id: u64,
) -> Result<Payout, DistributionError> {
    let mut record = load(env, id)?;
    if record.is_withdrawn() {
        return Err(DistributionError::AlreadyWithdrawn);
    }

    let mut table = allocations(env, id);
    let allocation = table.get(caller.clone());
    let now = env.ledger().timestamp();
    let amount = record
        .policy
        .claimable(allocation.as_ref(), now)
        .map_err(map_policy_error)?;
    let mut allocation = allocation.ok_or(DistributionError::NotQualified)?;

    allocation.claimed = allocation
        .claimed
        .checked_add(amount)
        .ok_or(DistributionError::Overflow)?;
    if allocation.claimed > allocation.total {
        return Err(DistributionError::CustodyMismatch);
    }
    record.amount = record
        .amount
        .checked_sub(amount)
        .ok_or(DistributionError::CustodyMismatch)?;

    vault::extract(env, auth, id, caller, amount).map_err(map_vault_error)?;
    if vault::balance(env, id) == 0 {
        vault::destroy(env, auth, id).map_err(map_vault_error)?;
    }

    if record.policy.consumes_allocation() {
        table.remove(caller.clone());
    } else {
        table.set(caller.clone(), allocation.clone());
    }
    record.recipient_count = table.len();
    save_allocations(env, id, &table);
    save(env, &record);

    Ok(Payout {
        amount,
        claimed_total: allocation.claimed,
    })
}

/// What `claim` would pay `recipient` right now, or zero.
pub fn quote(env: &Env, id: u64, recipient: &Address) -> u64 {
    let record = match load(env, id) {
        Ok(r) if !r.is_withdrawn() => r,
        _ => return 0,
    };
    let allocation = allocations(env, id).get(recipient.clone());
    record
        .policy
        .claimable(allocation.as_ref(), env.ledger().timestamp())
        .unwrap_or(0)
}

// ── Withdraw ──────────────────────────────────────────────────────────────────

/// Owner reclaim of everything left in the reserve. Terminal.
pub fn withdraw(
    env: &Env,
    auth: &CustodyAuthority,
    caller: &Address,
    id: u64,
) -> Result<(Distribution, u64), DistributionError> {
    let mut record = load(env, id)?;
    if record.owner != *caller {
        return Err(DistributionError::NotOwner);
    }
    if record.is_withdrawn() {
        return Err(DistributionError::AlreadyWithdrawn);
    }
    let now = env.ledger().timestamp();
    record.policy.check_reclaim(now).map_err(map_policy_error)?;

    let paid = if vault::exists(env, id) {
        let paid = vault::extract_all(env, auth, id, &record.owner).map_err(map_vault_error)?;
        vault::destroy(env, auth, id).map_err(map_vault_error)?;
        paid
    } else {
        0
    };
    if paid != record.amount {
        return Err(DistributionError::CustodyMismatch);
    }

    record.amount = 0;
    record.withdrawn_at = Some(now);
    save(env, &record);
    Ok((record, paid))
}

// ── Ownership transfer ────────────────────────────────────────────────────────

pub fn prepare_transfer(
    env: &Env,
    caller: &Address,
    id: u64,
    new_owner: &Address,
) -> Result<Distribution, DistributionError> {
    let record = load(env, id)?;
    if record.owner != *caller {
        return Err(DistributionError::NotOwner);
    }
    if record.is_withdrawn() {
        return Err(DistributionError::AlreadyWithdrawn);
    }
    if !matches!(record.policy, ReleasePolicy::TimeLock(_)) {
        return Err(DistributionError::UnsupportedPolicy);
    }
    if record.owner == *new_owner {
        return Err(DistributionError::InvalidParameter);
    }
    Ok(record)
}

pub fn commit_transfer(env: &Env, mut record: Distribution, new_owner: &Address) -> Distribution {
    owner_index::remove(env, &record.owner, record.id);
    owner_index::add(env, new_owner, record.id);
    record.owner = new_owner.clone();
    save(env, &record);
    record
}
