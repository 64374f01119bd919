//! # Token Distribution Engine
//!
//! Escrows SEP-41 tokens on behalf of an owner and releases them under one of
//! three policies: linear vesting with per-recipient cliffs, an owner-only
//! time-lock, or a fixed-allocation airdrop with optional expiry.
//!
//! Every distribution has its own reserve inside the engine's custody; the
//! record's `amount` always equals that reserve's balance. Creation,
//! appends and lock transfers pay a protocol fee into the treasury contract.
#![no_std]

pub mod config;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod owner_index;
pub mod policy;
pub mod treasury;
pub mod types;
pub mod validation;
pub mod vault;


pub use errors::DistributionError;
pub use types::{Allocation, Distribution, EngineConfig, LinearWindow, ReleasePolicy};
pub use vault::Reserve;

use ledger::Schedule;
use soroban_sdk::{contract, contractimpl, log, vec, Address, Env, Map, Vec};

#[contract]
pub struct DistributionContract;

#[contractimpl]
impl DistributionContract {
    pub fn initialize(env: Env, admin: Address, config: EngineConfig) -> Result<(), DistributionError> {
        admin.require_auth();
        config::bootstrap(&env, &admin, &config)
    }

    // ── Creation ──────────────────────────────────────────────────────────────

    /// Escrow `sum(amounts)` of `asset` for linear release over `[from, to]`.
    /// `cliffs[i]` delays the first claim of `recipients[i]` by that many
    /// seconds past `from`.
    #[allow(clippy::too_many_arguments)]
    pub fn create_vesting(
        env: Env,
        owner: Address,
        asset: Address,
        recipients: Vec<Address>,
        amounts: Vec<u64>,
        cliffs: Vec<u64>,
        from: u64,
        to: u64,
    ) -> Result<u64, DistributionError> {
        owner.require_auth();
        let auth = config::authority(&env)?;
        let cfg = config::load(&env)?;

        let schedule = Schedule::Linear {
            window: LinearWindow { from, to },
            cliffs,
        };
        let draft = ledger::prepare_create(&env, &owner, &asset, &recipients, &amounts, schedule)?;

        treasury::charge(&env, &cfg, &owner, &cfg.fee_token, cfg.price);
        let record = ledger::commit_create(&env, &auth, draft)?;
        Self::announce_created(&env, &record);
        Ok(record.id)
    }

    /// Lock `amount` of `asset` until `unlock_time`; only the owner can take
    /// it out.
    pub fn create_lock(
        env: Env,
        owner: Address,
        asset: Address,
        amount: u64,
        unlock_time: u64,
    ) -> Result<u64, DistributionError> {
        owner.require_auth();
        let auth = config::authority(&env)?;
        let cfg = config::load(&env)?;

        let draft = ledger::prepare_create(
            &env,
            &owner,
            &asset,
            &vec![&env, owner.clone()],
            &vec![&env, amount],
            Schedule::TimeLock { unlock_time },
        )?;

        treasury::charge(&env, &cfg, &owner, &cfg.fee_token, cfg.price);
        let record = ledger::commit_create(&env, &auth, draft)?;
        Self::announce_created(&env, &record);
        Ok(record.id)
    }

    /// Escrow fixed per-recipient allocations claimable until `expire_at`
    /// (0 = never). Duplicate recipients are summed.
    pub fn create_airdrop(
        env: Env,
        owner: Address,
        asset: Address,
        recipients: Vec<Address>,
        amounts: Vec<u64>,
        expire_at: u64,
    ) -> Result<u64, DistributionError> {
        owner.require_auth();
        let auth = config::authority(&env)?;
        let cfg = config::load(&env)?;

        let draft = ledger::prepare_create(
            &env,
            &owner,
            &asset,
            &recipients,
            &amounts,
            Schedule::FixedAllocation { expire_at },
        )?;

        let fee = treasury::airdrop_fee(draft.total)?;
        treasury::charge(&env, &cfg, &owner, &asset, fee);
        let record = ledger::commit_create(&env, &auth, draft)?;
        Self::announce_created(&env, &record);
        Ok(record.id)
    }

    /// Add recipients (or top up existing ones) on a live airdrop.
    pub fn append(
        env: Env,
        owner: Address,
        id: u64,
        recipients: Vec<Address>,
        amounts: Vec<u64>,
    ) -> Result<(), DistributionError> {
        owner.require_auth();
        let auth = config::authority(&env)?;
        let cfg = config::load(&env)?;

        let draft = ledger::prepare_append(&env, &owner, id, &recipients, &amounts)?;
        let fee = treasury::airdrop_fee(draft.added)?;
        let asset = draft.record.asset.clone();
        let added = draft.added;

        treasury::charge(&env, &cfg, &owner, &asset, fee);
        let record = ledger::commit_append(&env, &auth, draft)?;
        events::publish_appended(&env, id, added, record.amount, record.recipient_count);
        Ok(())
    }

    // ── Release ───────────────────────────────────────────────────────────────

    /// Pay `recipient` everything currently claimable and return the amount.
    pub fn claim(env: Env, recipient: Address, id: u64) -> Result<u64, DistributionError> {
        recipient.require_auth();
        let auth = config::authority(&env)?;

        let payout = ledger::claim(&env, &auth, &recipient, id)?;
        log!(&env, "claim", id, payout.amount);
        events::publish_claimed(&env, id, recipient, payout.amount, payout.claimed_total);
        Ok(payout.amount)
    }

    /// Return whatever is left in custody to the owner. Terminal.
    pub fn withdraw(env: Env, owner: Address, id: u64) -> Result<u64, DistributionError> {
        owner.require_auth();
        let auth = config::authority(&env)?;

        let (record, paid) = ledger::withdraw(&env, &auth, &owner, id)?;
        log!(&env, "withdraw", id, paid);
        events::publish_withdrawn(&env, id, record.owner, paid);
        Ok(paid)
    }

    /// Hand a time-lock to `new_owner`. Costs a tenth of the flat price.
    pub fn transfer_ownership(
        env: Env,
        owner: Address,
        id: u64,
        new_owner: Address,
    ) -> Result<(), DistributionError> {
        owner.require_auth();
        config::authority(&env)?;
        let cfg = config::load(&env)?;

        let record = ledger::prepare_transfer(&env, &owner, id, &new_owner)?;
        treasury::charge(&env, &cfg, &owner, &cfg.fee_token, treasury::transfer_fee(&cfg));
        ledger::commit_transfer(&env, record, &new_owner);
        events::publish_ownership_transferred(&env, id, owner, new_owner);
        Ok(())
    }

    // ── Fees ──────────────────────────────────────────────────────────────────

    /// Reprice vesting and lock creation. Only the treasury's fee collector
    /// may call this.
    pub fn set_price(env: Env, caller: Address, price: u64) -> Result<(), DistributionError> {
        caller.require_auth();
        config::authority(&env)?;
        let cfg = config::load(&env)?;
        if treasury::fee_collector(&env, &cfg) != caller {
            return Err(DistributionError::NoPermission);
        }

        let old_price = cfg.price;
        config::set_price(&env, price)?;
        events::publish_price_updated(&env, old_price, price);
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    pub fn get_config(env: Env) -> Result<EngineConfig, DistributionError> {
        config::load(&env)
    }

    pub fn get_admin(env: Env) -> Result<Address, DistributionError> {
        config::admin(&env)
    }

    pub fn get_price(env: Env) -> Result<u64, DistributionError> {
        Ok(config::load(&env)?.price)
    }

    pub fn get_distribution(env: Env, id: u64) -> Result<Distribution, DistributionError> {
        ledger::load(&env, id)
    }

    pub fn get_allocation(env: Env, id: u64, recipient: Address) -> Option<Allocation> {
        ledger::allocations(&env, id).get(recipient)
    }

    pub fn get_allocations(env: Env, id: u64) -> Map<Address, Allocation> {
        ledger::allocations(&env, id)
    }

    /// Ids currently owned by `owner`, in creation order.
    pub fn get_owned(env: Env, owner: Address) -> Vec<u64> {
        owner_index::list(&env, &owner)
    }

    pub fn get_reserve(env: Env, id: u64) -> Option<Reserve> {
        vault::reserve(&env, id)
    }

    pub fn reserve_balance(env: Env, id: u64) -> u64 {
        vault::balance(&env, id)
    }

    /// Amount `claim` would pay `recipient` right now; zero when it would fail.
    pub fn claimable(env: Env, id: u64, recipient: Address) -> u64 {
        ledger::quote(&env, id, &recipient)
    }

    /// Id the next created distribution will receive.
    pub fn next_id(env: Env) -> u64 {
        config::peek_index(&env)
    }
}

impl DistributionContract {
    fn announce_created(env: &Env, record: &Distribution) {
        log!(env, "created", record.id, record.amount);
        events::publish_created(
            env,
            record.id,
            record.owner.clone(),
            record.asset.clone(),
            record.amount,
            record.policy.clone(),
            record.recipient_count,
        );
    }
}
