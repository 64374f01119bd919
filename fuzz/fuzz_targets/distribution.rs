#![no_main]

use arbitrary::Arbitrary;
use distribution::{DistributionContract, DistributionContractClient, EngineConfig};
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{StellarAssetClient, TokenClient},
    Address, Env, Vec as SorobanVec,
};
use treasury::{TreasuryContract, TreasuryContractClient};

/// Actions modelling every engine entry point.
///
/// Amounts are narrow integers so the pre-funded balances always cover
/// them; user and distribution selectors are reduced modulo the pools.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    CreateVesting { recipients: Vec<u8>, amount: u32, cliff: u16, window: u32 },
    CreateLock { amount: u32, lock_for: u32 },
    CreateAirdrop { recipients: Vec<u8>, amount: u32, expire_in: Option<u32> },
    Append { id: u8, recipient: u8, amount: u32 },
    Claim { id: u8 },
    Withdraw { id: u8 },
    TransferOwnership { id: u8, to: u8 },
    SetPrice { price: u16 },
    AdvanceTime { delta: u32 },
}

const USERS: usize = 5;

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_000_000);

    let admin = Address::generate(&env);
    let collector = Address::generate(&env);
    let asset = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let fee_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let treasury_id = env.register(TreasuryContract, ());
    TreasuryContractClient::new(&env, &treasury_id).initialize(&admin, &collector);

    let contract_id = env.register(DistributionContract, ());
    let client = DistributionContractClient::new(&env, &contract_id);
    let config = EngineConfig {
        treasury: treasury_id,
        fee_token: fee_token.clone(),
        price: 100,
    };
    if client.try_initialize(&admin, &config).is_err() {
        return;
    }

    let mut users = Vec::new();
    for _ in 0..USERS {
        let u = Address::generate(&env);
        StellarAssetClient::new(&env, &asset).mint(&u, &1_000_000_000_000_000i128);
        StellarAssetClient::new(&env, &fee_token).mint(&u, &1_000_000_000_000_000i128);
        users.push(u);
    }
    let pick = |list: &[u8]| {
        let mut out = SorobanVec::new(&env);
        for i in list.iter().take(8) {
            out.push_back(users[*i as usize % USERS].clone());
        }
        out
    };
    let repeat = |value: u64, n: u32| {
        let mut out = SorobanVec::new(&env);
        for _ in 0..n {
            out.push_back(value);
        }
        out
    };
    let resolve = |id: u8| id as u64 % (client.next_id() + 1);

    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % USERS];
        let now = env.ledger().timestamp();
        match action {
            FuzzAction::CreateVesting { recipients, amount, cliff, window } => {
                let r = pick(&recipients);
                let n = r.len();
                let _ = client.try_create_vesting(
                    caller,
                    &asset,
                    &r,
                    &repeat(amount as u64, n),
                    &repeat(cliff as u64, n),
                    &now,
                    &(now + window as u64),
                );
            }
            FuzzAction::CreateLock { amount, lock_for } => {
                let _ = client.try_create_lock(caller, &asset, &(amount as u64), &(now + lock_for as u64));
            }
            FuzzAction::CreateAirdrop { recipients, amount, expire_in } => {
                let r = pick(&recipients);
                let n = r.len();
                let expire_at = expire_in.map_or(0, |d| now + d as u64);
                let _ = client.try_create_airdrop(caller, &asset, &r, &repeat(amount as u64, n), &expire_at);
            }
            FuzzAction::Append { id, recipient, amount } => {
                let _ = client.try_append(caller, &resolve(id), &pick(&[recipient]), &repeat(amount as u64, 1));
            }
            FuzzAction::Claim { id } => {
                let _ = client.try_claim(caller, &resolve(id));
            }
            FuzzAction::Withdraw { id } => {
                let _ = client.try_withdraw(caller, &resolve(id));
            }
            FuzzAction::TransferOwnership { id, to } => {
                let _ = client.try_transfer_ownership(caller, &resolve(id), &users[to as usize % USERS]);
            }
            FuzzAction::SetPrice { price } => {
                let _ = client.try_set_price(&collector, &(price as u64));
            }
            FuzzAction::AdvanceTime { delta } => {
                env.ledger().set_timestamp(now.saturating_add(delta as u64));
            }
        }

        // ── Post-action invariant checks ──
        let mut reserves: i128 = 0;
        for id in 1..client.next_id() {
            let record = client.get_distribution(&id);
            let reserve = client.reserve_balance(&id);
            assert_eq!(
                record.amount, reserve,
                "INVARIANT VIOLATION: distribution {} amount != reserve", id
            );
            if record.withdrawn_at.is_some() {
                assert_eq!(record.amount, 0, "INVARIANT VIOLATION: withdrawn {} not empty", id);
            }
            for (_, a) in client.get_allocations(&id).iter() {
                assert!(a.claimed <= a.total, "INVARIANT VIOLATION: over-claim on {}", id);
            }
            reserves += reserve as i128;
        }
        let custody = TokenClient::new(&env, &asset).balance(&contract_id);
        assert_eq!(custody, reserves, "INVARIANT VIOLATION: custody != sum(reserves)");
    }
});
