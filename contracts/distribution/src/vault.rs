//! # Asset Custody Vault
//!
//! One reserve per distribution id, scoped to the token being escrowed. All
//! reserves share the engine's own token balance; the per-id `balance` is the
//! share of that pool backing the id's outstanding allocations.
//!
//! Every mutating call takes a [`CustodyAuthority`], which only the engine
//! can construct, so no code path outside the ledger's orchestration can move
//! reserve funds.

use common::{extend_persistent_ttl, to_token_amount};
use soroban_sdk::{contracttype, token, Address, Env};

use crate::types::DataKey;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reserve {
    pub asset: Address,
    pub balance: u64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum VaultError {
    ReserveExists,
    ReserveNotFound,
    InsufficientBalance,
    NotEmpty,
    Overflow,
}

/// Capability to move escrowed funds. Not constructible outside the crate.
pub struct CustodyAuthority {
    holder: Address,
}

impl CustodyAuthority {
    /// The engine's own contract address holds every reserve. Built fresh for
    /// each invocation rather than stored, so it never outlives the call.
    pub(crate) fn assume(env: &Env) -> Self {
        CustodyAuthority {
            holder: env.current_contract_address(),
        }
    }

    fn holder(&self) -> &Address {
        &self.holder
    }
}

fn key(id: u64) -> DataKey {
    DataKey::Reserve(id)
}

fn load(env: &Env, id: u64) -> Result<Reserve, VaultError> {
    env.storage()
        .persistent()
        .get(&key(id))
        .ok_or(VaultError::ReserveNotFound)
}

fn store(env: &Env, id: u64, reserve: &Reserve) {
    let k = key(id);
    env.storage().persistent().set(&k, reserve);
    extend_persistent_ttl(env, &k);
}

/// Create an empty reserve for `id`.
pub fn open(env: &Env, _auth: &CustodyAuthority, id: u64, asset: &Address) -> Result<(), VaultError> {
    if exists(env, id) {
        return Err(VaultError::ReserveExists);
    }
    store(
        env,
        id,
        &Reserve {
            asset: asset.clone(),
            balance: 0,
        },
    );
    Ok(())
}

/// Pull `amount` of the reserve's asset from `from` into custody.
pub fn deposit(
    env: &Env,
    auth: &CustodyAuthority,
    id: u64,
    from: &Address,
    amount: u64,
) -> Result<(), VaultError> {
    let mut reserve = load(env, id)?;
    if amount == 0 {
        return Ok(());
    }
    reserve.balance = reserve
        .balance
        .checked_add(amount)
        .ok_or(VaultError::Overflow)?;

    token::Client::new(env, &reserve.asset).transfer(from, auth.holder(), &to_token_amount(amount));
    store(env, id, &reserve);
    Ok(())
}

/// Pay `amount` out of the reserve to `to`.
pub fn extract(
    env: &Env,
    auth: &CustodyAuthority,
    id: u64,
    to: &Address,
    amount: u64,
) -> Result<(), VaultError> {
    let mut reserve = load(env, id)?;
    if amount > reserve.balance {
        return Err(VaultError::InsufficientBalance);
    }
    reserve.balance -= amount;

    token::Client::new(env, &reserve.asset).transfer(auth.holder(), to, &to_token_amount(amount));
    store(env, id, &reserve);
    Ok(())
}

/// Pay the whole reserve out to `to` and return the amount moved.
pub fn extract_all(env: &Env, auth: &CustodyAuthority, id: u64, to: &Address) -> Result<u64, VaultError> {
    let balance = load(env, id)?.balance;
    extract(env, auth, id, to, balance)?;
    Ok(balance)
}

/// Remove an empty reserve.
pub fn destroy(env: &Env, _auth: &CustodyAuthority, id: u64) -> Result<(), VaultError> {
    let reserve = load(env, id)?;
    if reserve.balance != 0 {
        return Err(VaultError::NotEmpty);
    }
    env.storage().persistent().remove(&key(id));
    Ok(())
}

pub fn exists(env: &Env, id: u64) -> bool {
    env.storage().persistent().has(&key(id))
}

/// Reserve balance for `id`, zero once destroyed.
pub fn balance(env: &Env, id: u64) -> u64 {
    env.storage()
        .persistent()
        .get::<_, Reserve>(&key(id))
        .map(|r| r.balance)
        .unwrap_or(0)
}

pub fn reserve(env: &Env, id: u64) -> Option<Reserve> {
    env.storage().persistent().get(&key(id))
}
