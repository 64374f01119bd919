//! # Protocol Treasury
//!
//! Receives fee payments from the distribution engine in any SEP-41 token and
//! names the fee collector, the only address allowed to reprice engine
//! operations and to sweep collected fees.
#![no_std]

use common::{extend_instance_ttl, extend_persistent_ttl, CommonError};
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol,
};

// ── Storage keys ──────────────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const COLLECTOR: Symbol = symbol_short!("COLLECT");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Running total of fees received per token.
    Collected(Address),
}

// ── Events ────────────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeReceivedEvent {
    pub from: Address,
    pub token: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeSweptEvent {
    pub token: Address,
    pub to: Address,
    pub amount: i128,
    pub timestamp: u64,
}

fn emit<T: soroban_sdk::IntoVal<Env, soroban_sdk::Val>>(env: &Env, topic: &str, data: T) {
    #[allow(deprecated)]
    env.events()
        .publish((symbol_short!("TREASURY"), Symbol::new(env, topic)), data);
}

// ── Contract ──────────────────────────────────────────────────────────────────

#[contract]
pub struct TreasuryContract;

#[contractimpl]
impl TreasuryContract {
    pub fn initialize(env: Env, admin: Address, fee_collector: Address) -> Result<(), CommonError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(CommonError::AlreadyInitialized);
        }
        admin.require_auth();

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&COLLECTOR, &fee_collector);
        env.storage().instance().set(&INITIALIZED, &true);
        extend_instance_ttl(&env);
        Ok(())
    }

    /// Accept a fee payment of `amount` units of `token` from `from`.
    pub fn deposit(env: Env, from: Address, token: Address, amount: i128) -> Result<(), CommonError> {
        Self::require_initialized(&env)?;
        from.require_auth();
        if amount <= 0 {
            return Err(CommonError::InvalidInput);
        }

        token::Client::new(&env, &token).transfer(&from, &env.current_contract_address(), &amount);

        let key = DataKey::Collected(token.clone());
        let collected: i128 = env.storage().persistent().get(&key).unwrap_or(0);
        let collected = collected.checked_add(amount).ok_or(CommonError::Overflow)?;
        env.storage().persistent().set(&key, &collected);
        extend_persistent_ttl(&env, &key);

        emit(
            &env,
            "FeeRecv",
            FeeReceivedEvent {
                from,
                token,
                amount,
                timestamp: env.ledger().timestamp(),
            },
        );
        Ok(())
    }

    /// Address authorised to change fee parameters of the engines paying in.
    pub fn get_fee_collector(env: Env) -> Result<Address, CommonError> {
        env.storage()
            .instance()
            .get(&COLLECTOR)
            .ok_or(CommonError::NotInitialized)
    }

    /// Replace the fee collector. Admin only.
    pub fn set_fee_collector(env: Env, caller: Address, new_collector: Address) -> Result<(), CommonError> {
        caller.require_auth();
        Self::require_admin(&env, &caller)?;
        env.storage().instance().set(&COLLECTOR, &new_collector);
        extend_instance_ttl(&env);
        Ok(())
    }

    /// Total fees still held for `token`.
    pub fn collected(env: Env, token: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Collected(token))
            .unwrap_or(0)
    }

    /// Move collected fees out of the treasury. Fee collector only.
    pub fn sweep(
        env: Env,
        caller: Address,
        token: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), CommonError> {
        caller.require_auth();
        let collector = Self::get_fee_collector(env.clone())?;
        if caller != collector {
            return Err(CommonError::AccessDenied);
        }
        if amount <= 0 {
            return Err(CommonError::InvalidInput);
        }

        let key = DataKey::Collected(token.clone());
        let collected: i128 = env.storage().persistent().get(&key).unwrap_or(0);
        if amount > collected {
            return Err(CommonError::InsufficientBalance);
        }

        token::Client::new(&env, &token).transfer(&env.current_contract_address(), &to, &amount);
        env.storage().persistent().set(&key, &(collected - amount));
        extend_persistent_ttl(&env, &key);

        emit(
            &env,
            "FeeSwept",
            FeeSweptEvent {
                token,
                to,
                amount,
                timestamp: env.ledger().timestamp(),
            },
        );
        Ok(())
    }

    fn require_initialized(env: &Env) -> Result<(), CommonError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(CommonError::NotInitialized);
        }
        Ok(())
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), CommonError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(CommonError::NotInitialized)?;
        if *caller != admin {
            return Err(CommonError::AccessDenied);
        }
        Ok(())
    }
}
