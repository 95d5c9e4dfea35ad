use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use lazy_static::lazy_static;
use rand_core::OsRng;

// Argon2id parameters, roughly 50-150ms per hash
const ARGON2_M_COST: u32 = 19456; // 19 MB
const ARGON2_T_COST: u32 = 2;
const ARGON2_P_COST: u32 = 1;

lazy_static! {
    // Verified against when no account matches, so both login failures cost one verify.
    static ref UNKNOWN_ACCOUNT_HASH: Result<String, argon2::password_hash::Error> =
        hash_password("insight-unknown-account");
}

fn hasher() -> Result<Argon2<'static>, argon2::password_hash::Error> {
    let params = Params::new(ARGON2_M_COST, ARGON2_T_COST, ARGON2_P_COST, None)
        .map_err(argon2::password_hash::Error::from)?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes with a fresh random salt and returns the PHC string.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = hasher()?.hash_password(password.as_bytes(), &salt)?;
    Ok(password_hash.to_string())
}

/// `Ok(false)` on mismatch; `Err` only when `hash` is not a valid PHC string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match hasher()?.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(_) => Ok(false),
    }
}

/// Runs a full verification against a fixed hash built with the same parameters
/// as stored ones. `Err` only when that hash could not be built.
pub fn verify_unknown_account(password: &str) -> Result<bool, argon2::password_hash::Error> {
    match UNKNOWN_ACCOUNT_HASH.as_ref() {
        Ok(hash) => verify_password(password, hash),
        Err(e) => Err(e.clone()),
    }
}
