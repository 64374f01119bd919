use soroban_sdk::{Env, IntoVal, Val};

/// 5,184,000 ledgers ~= 300 days (@ ~5s/ledger).
pub const TTL_THRESHOLD: u32 = 5_184_000;
/// 10,368,000 ledgers ~= 600 days (@ ~5s/ledger).
pub const TTL_EXTEND_TO: u32 = 10_368_000;

/// Keeps the contract instance (and its instance storage) alive.
pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Keeps a persistent entry alive. The key must exist.
pub fn extend_persistent_ttl<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
