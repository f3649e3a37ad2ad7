// RSA Block Cipher
// The atomic permutation both chaining modes are built on: one modular
// exponentiation per block

use num_bigint::BigUint;

use super::bigint::mod_pow;
use super::error::{CipherError, CipherResult};

/// Encrypt one block: m^e mod n.
///
/// Fails with [`CipherError::BlockOverflow`] when `m >= n`, since RSA is
/// only a permutation on [0, n).
pub fn encrypt_block(m: &BigUint, e: &BigUint, n: &BigUint) -> CipherResult<BigUint> {
    if m >= n {
        return Err(CipherError::BlockOverflow);
    }
    Ok(mod_pow(m, e, n))
}

/// Decrypt one block: c^d mod n. The result is always below n, so no
/// range check is needed.
pub fn decrypt_block(c: &BigUint, d: &BigUint, n: &BigUint) -> BigUint {
    mod_pow(c, d, n)
}
