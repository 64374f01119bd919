//! Reverse index from an owner to the distribution ids it holds.
//!
//! Only used for enumeration; claims and withdrawals address records by id.

use common::extend_persistent_ttl;
use soroban_sdk::{Address, Env, Vec};

use crate::types::DataKey;

fn key(owner: &Address) -> DataKey {
    DataKey::Owned(owner.clone())
}

pub fn list(env: &Env, owner: &Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&key(owner))
        .unwrap_or(Vec::new(env))
}

/// Record `id` under `owner`. Adding an id twice is a no-op.
pub fn add(env: &Env, owner: &Address, id: u64) {
    let mut ids = list(env, owner);
    if ids.iter().any(|x| x == id) {
        return;
    }
    ids.push_back(id);

    let k = key(owner);
    env.storage().persistent().set(&k, &ids);
    extend_persistent_ttl(env, &k);
}

/// Drop `id` from `owner`'s set. Returns whether it was present.
pub fn remove(env: &Env, owner: &Address, id: u64) -> bool {
    let mut ids = list(env, owner);
    let position = match ids.iter().position(|x| x == id) {
        Some(p) => p as u32,
        None => return false,
    };
    ids.remove(position);

    let k = key(owner);
    if ids.is_empty() {
        env.storage().persistent().remove(&k);
    } else {
        env.storage().persistent().set(&k, &ids);
        extend_persistent_ttl(env, &k);
    }
    true
}
