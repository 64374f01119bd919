//! Engine configuration and the distribution id counter.
//!
//! Both live in instance storage and are written once by `initialize`;
//! afterwards only the price (via the fee collector) and the counter change.

use common::extend_instance_ttl;
use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::errors::DistributionError;
use crate::types::EngineConfig;
use crate::vault::CustodyAuthority;

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const CONFIG: Symbol = symbol_short!("CONFIG");
const INDEX: Symbol = symbol_short!("INDEX");

/// First id handed out by a fresh engine.
pub const FIRST_ID: u64 = 1;

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INITIALIZED)
}

pub fn bootstrap(env: &Env, admin: &Address, config: &EngineConfig) -> Result<(), DistributionError> {
    if is_initialized(env) {
        return Err(DistributionError::AlreadyInitialized);
    }
    env.storage().instance().set(&ADMIN, admin);
    env.storage().instance().set(&CONFIG, config);
    env.storage().instance().set(&INDEX, &FIRST_ID);
    env.storage().instance().set(&INITIALIZED, &true);
    extend_instance_ttl(env);
    Ok(())
}

/// Custody capability for the current invocation, once the engine is set up.
pub fn authority(env: &Env) -> Result<CustodyAuthority, DistributionError> {
    if !is_initialized(env) {
        return Err(DistributionError::NotInitialized);
    }
    extend_instance_ttl(env);
    Ok(CustodyAuthority::assume(env))
}

pub fn load(env: &Env) -> Result<EngineConfig, DistributionError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(DistributionError::NotInitialized)
}

pub fn admin(env: &Env) -> Result<Address, DistributionError> {
    env.storage()
        .instance()
        .get(&ADMIN)
        .ok_or(DistributionError::NotInitialized)
}

pub fn set_price(env: &Env, price: u64) -> Result<EngineConfig, DistributionError> {
    let mut config = load(env)?;
    config.price = price;
    env.storage().instance().set(&CONFIG, &config);
    Ok(config)
}

/// Id the next `create` will receive.
pub fn peek_index(env: &Env) -> u64 {
    env.storage().instance().get(&INDEX).unwrap_or(FIRST_ID)
}

/// Hand out the next id and advance the counter by one.
pub fn next_index(env: &Env) -> Result<u64, DistributionError> {
    let id = peek_index(env);
    let next = id.checked_add(1).ok_or(DistributionError::Overflow)?;
    env.storage().instance().set(&INDEX, &next);
    Ok(id)
}
