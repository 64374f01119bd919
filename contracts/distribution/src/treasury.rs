//! Client side of the protocol treasury and the fee schedule.

use common::{bps_of, to_token_amount, CommonError};
use soroban_sdk::{Address, Env};

use crate::errors::{map_common_error, DistributionError};
use crate::events;
use crate::types::EngineConfig;

/// Airdrop fee, in basis points of the airdropped total (0.1 %).
pub const AIRDROP_FEE_BPS: u64 = 10;

/// Ownership transfers of a lock cost this fraction of the flat price.
pub const TRANSFER_FEE_DIVISOR: u64 = 10;

#[soroban_sdk::contractclient(name = "TreasuryClient")]
#[allow(dead_code)]
pub trait TreasuryInterface {
    fn deposit(env: Env, from: Address, token: Address, amount: i128) -> Result<(), CommonError>;

    fn get_fee_collector(env: Env) -> Result<Address, CommonError>;
}

pub fn airdrop_fee(total: u64) -> Result<u64, DistributionError> {
    bps_of(total, AIRDROP_FEE_BPS).map_err(map_common_error)
}

pub fn transfer_fee(config: &EngineConfig) -> u64 {
    config.price / TRANSFER_FEE_DIVISOR
}

/// Move `amount` of `token` from `payer` into the treasury. Zero is a no-op.
pub fn charge(
    env: &Env,
    config: &EngineConfig,
    payer: &Address,
    token: &Address,
    amount: u64,
) {
    if amount == 0 {
        return;
    }
    TreasuryClient::new(env, &config.treasury).deposit(payer, token, &to_token_amount(amount));
    events::publish_fee_charged(env, payer.clone(), token.clone(), amount);
}

pub fn fee_collector(env: &Env, config: &EngineConfig) -> Address {
    TreasuryClient::new(env, &config.treasury).get_fee_collector()
}
