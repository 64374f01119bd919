//! Events emitted by the distribution engine.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::types::ReleasePolicy;

// ── Internal helper ───────────────────────────────────────────────────────────

fn emit<T: soroban_sdk::IntoVal<Env, soroban_sdk::Val>>(env: &Env, topic: &str, data: T) {
    #[allow(deprecated)]
    env.events()
        .publish((symbol_short!("DIST"), Symbol::new(env, topic)), data);
}

// ── Event structs ─────────────────────────────────────────────────────────────

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributionCreatedEvent {
    pub id: u64,
    pub owner: Address,
    pub asset: Address,
    pub amount: u64,
    pub policy: ReleasePolicy,
    pub recipients: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AllocationAppendedEvent {
    pub id: u64,
    pub added: u64,
    pub new_amount: u64,
    pub recipients: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimedEvent {
    pub id: u64,
    pub recipient: Address,
    pub amount: u64,
    pub claimed_total: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub id: u64,
    pub owner: Address,
    pub amount: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipTransferredEvent {
    pub id: u64,
    pub previous_owner: Address,
    pub new_owner: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeChargedEvent {
    pub payer: Address,
    pub token: Address,
    pub amount: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceUpdatedEvent {
    pub old_price: u64,
    pub new_price: u64,
    pub timestamp: u64,
}

// ── Publishers ────────────────────────────────────────────────────────────────

pub fn publish_created(
    env: &Env,
    id: u64,
    owner: Address,
    asset: Address,
    amount: u64,
    policy: ReleasePolicy,
    recipients: u32,
) {
    emit(
        env,
        "Created",
        DistributionCreatedEvent {
            id,
            owner,
            asset,
            amount,
            policy,
            recipients,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_appended(env: &Env, id: u64, added: u64, new_amount: u64, recipients: u32) {
    emit(
        env,
        "Appended",
        AllocationAppendedEvent {
            id,
            added,
            new_amount,
            recipients,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_claimed(env: &Env, id: u64, recipient: Address, amount: u64, claimed_total: u64) {
    emit(
        env,
        "Claimed",
        ClaimedEvent {
            id,
            recipient,
            amount,
            claimed_total,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(env: &Env, id: u64, owner: Address, amount: u64) {
    emit(
        env,
        "Withdrawn",
        WithdrawnEvent {
            id,
            owner,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_ownership_transferred(env: &Env, id: u64, previous_owner: Address, new_owner: Address) {
    emit(
        env,
        "OwnerXfer",
        OwnershipTransferredEvent {
            id,
            previous_owner,
            new_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_fee_charged(env: &Env, payer: Address, token: Address, amount: u64) {
    emit(
        env,
        "FeeCharged",
        FeeChargedEvent {
            payer,
            token,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_price_updated(env: &Env, old_price: u64, new_price: u64) {
    emit(
        env,
        "PriceSet",
        PriceUpdatedEvent {
            old_price,
            new_price,
            timestamp: env.ledger().timestamp(),
        },
    );
}
