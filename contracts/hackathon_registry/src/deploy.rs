//! Instance deployment.
//!
//! Every hackathon the registry tracks lives at an address derived from the
//! registry itself and a caller-chosen salt. No other deployer can create a
//! contract at such an address, so tracked instances always run the code
//! registered with [`crate::HackathonRegistry::initialize`].

use soroban_sdk::{Address, BytesN, Env};

/// Address the instance deployed with `salt` lives at.
pub fn instance_address(env: &Env, salt: &BytesN<32>) -> Address {
    env.deployer()
        .with_current_contract(salt.clone())
        .deployed_address()
}

#[cfg(not(test))]
pub fn deploy_instance(env: &Env, wasm_hash: BytesN<32>, salt: BytesN<32>) -> Address {
    env.deployer()
        .with_current_contract(salt)
        .deploy_v2(wasm_hash, ())
}

/// Native test builds carry no compiled instance code. Tests install the
/// instance contract at [`instance_address`] before creating the hackathon.
#[cfg(test)]
pub fn deploy_instance(env: &Env, _wasm_hash: BytesN<32>, salt: BytesN<32>) -> Address {
    instance_address(env, &salt)
}
