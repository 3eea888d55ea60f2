//! Protocol-wide pause switch.
//!
//! A single global flag flipped by the owner. Only `stake` consults it;
//! unstaking and governance stay live while paused so users can always exit.
//! `emergency_mode` is reserved storage with no transition wired to it.

use crate::ContractError;
use soroban_sdk::{symbol_short, Env, Symbol};

const PAUSED: Symbol = symbol_short!("PAUSED");
const EMERGENCY: Symbol = symbol_short!("EMERG");

pub fn require_not_paused(env: &Env) -> Result<(), ContractError> {
    if is_paused(env) {
        return Err(ContractError::Paused);
    }
    Ok(())
}

pub fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&PAUSED).unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&PAUSED, &paused);
}

pub fn is_emergency_mode(env: &Env) -> bool {
    env.storage().instance().get(&EMERGENCY).unwrap_or(false)
}

pub fn set_emergency_mode(env: &Env, active: bool) {
    env.storage().instance().set(&EMERGENCY, &active);
}
