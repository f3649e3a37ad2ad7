// RSA Key Generation
// Builds an (e, d, n) triple from two freshly drawn random primes

use log::debug;
use num_bigint::BigUint;
use num_traits::Zero;

use super::bigint::{mod_inverse, random_prime};
use super::error::{CipherError, CipherResult};

/// The fixed public exponent.
pub const PUBLIC_EXPONENT: u64 = 65537;

/// An RSA keypair: public exponent, private exponent and modulus.
///
/// Immutable once generated; the prime factors are not retained. Safe to
/// share read-only across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keypair {
    /// Public exponent (always 65537)
    pub e: BigUint,
    /// Private exponent
    pub d: BigUint,
    /// Modulus
    pub n: BigUint,
}

impl Keypair {
    /// Bit length of the modulus
    pub fn modulus_bits(&self) -> u64 {
        self.n.bits()
    }
}

/// Generate an RSA keypair from two distinct random primes of
/// `bit_length` bits each. `bit_length` must be at least 2.
///
/// Fails with [`CipherError::UnluckyPrimes`] when φ(n) happens to be
/// divisible by the public exponent; the caller is expected to call again
/// with fresh randomness.
pub fn generate_keypair(bit_length: u64) -> CipherResult<Keypair> {
    assert!(bit_length >= 2, "prime bit length must be at least 2");

    let p = random_prime(bit_length);
    let mut q = random_prime(bit_length);
    while q == p {
        q = random_prime(bit_length);
    }

    let keypair = derive_keypair(&p, &q)?;
    debug!(
        "generated keypair with {}-bit modulus from {}-bit primes",
        keypair.modulus_bits(),
        bit_length
    );
    Ok(keypair)
}

/// Derive the keypair from two primes. Split out so the arithmetic can be
/// checked against known primes.
fn derive_keypair(p: &BigUint, q: &BigUint) -> CipherResult<Keypair> {
    let n = p * q;

    // Euler's totient for a product of two primes
    let phi = (p - 1u8) * (q - 1u8);

    let e = BigUint::from(PUBLIC_EXPONENT);

    // e is prime, so e and phi fail to be coprime exactly when e divides phi
    if (&phi % &e).is_zero() {
        return Err(CipherError::UnluckyPrimes);
    }

    let d = mod_inverse(&e, &phi).ok_or(CipherError::UnluckyPrimes)?;

    Ok(Keypair { e, d, n })
}
