// Big Integer Operations
// Wrapper around num-bigint for the RSA-specific arithmetic

use num_bigint::{BigInt, BigUint, RandBigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use rand::thread_rng;

/// Miller-Rabin rounds used for key material.
const PRIME_TEST_ROUNDS: u32 = 25;

/// Modular exponentiation: base^exp mod modulus
/// Uses square-and-multiply
pub fn mod_pow(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> BigUint {
    if modulus.is_one() {
        return BigUint::zero();
    }

    let mut result = BigUint::one();
    let mut base = base % modulus;
    let mut exp = exp.clone();

    while !exp.is_zero() {
        if exp.is_odd() {
            result = (&result * &base) % modulus;
        }
        base = (&base * &base) % modulus;
        exp >>= 1;
    }

    result
}

/// Extended Euclidean Algorithm over signed integers
/// Returns (gcd, x, y) such that a*x + b*y = gcd(a, b)
fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    if b.is_zero() {
        return (a.clone(), BigInt::one(), BigInt::zero());
    }

    let (gcd, x1, y1) = extended_gcd(b, &(a % b));
    let x = y1.clone();
    let y = x1 - (a / b) * y1;

    (gcd, x, y)
}

/// Compute the modular inverse a^(-1) mod m
/// Returns None if the inverse doesn't exist
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    let a_signed = BigInt::from_biguint(Sign::Plus, a.clone());
    let m_signed = BigInt::from_biguint(Sign::Plus, m.clone());

    let (gcd, x, _) = extended_gcd(&a_signed, &m_signed);
    if !gcd.is_one() {
        return None;
    }

    // Normalize x into [0, m)
    let mut inverse = x % &m_signed;
    if inverse.is_negative() {
        inverse += &m_signed;
    }

    inverse.to_biguint()
}

/// Miller-Rabin primality test
/// Returns true if n is probably prime
pub fn is_probable_prime(n: &BigUint, iterations: u32) -> bool {
    if n < &BigUint::from(2u8) {
        return false;
    }
    if n == &BigUint::from(2u8) || n == &BigUint::from(3u8) {
        return true;
    }
    if n.is_even() {
        return false;
    }

    // Write n-1 as d * 2^s with d odd
    let mut d = n - 1u8;
    let mut s = 0u32;
    while d.is_even() {
        d >>= 1;
        s += 1;
    }

    // Witness loop
    let mut rng = thread_rng();
    let two = BigUint::from(2u8);
    let n_minus_two = n - &two;

    for _ in 0..iterations {
        // Pick a random witness in [2, n-2]
        let a = rng.gen_biguint_range(&two, &n_minus_two);

        let mut x = mod_pow(&a, &d, n);
        if x.is_one() || x == n - 1u8 {
            continue;
        }

        let mut witnessed = true;
        for _ in 1..s {
            x = mod_pow(&x, &two, n);
            if x == n - 1u8 {
                witnessed = false;
                break;
            }
        }

        if witnessed {
            // Composite
            return false;
        }
    }

    true
}

/// Generate a random probable prime of exactly `bit_length` bits.
/// `bit_length` must be at least 2.
pub fn random_prime(bit_length: u64) -> BigUint {
    assert!(bit_length >= 2, "primes need at least 2 bits");

    let mut rng = thread_rng();
    loop {
        let mut candidate = rng.gen_biguint(bit_length);

        // Force the top bit so the candidate has the full width
        candidate |= BigUint::one() << (bit_length - 1);

        // Force odd, except at 2 bits where 2 itself is a valid draw
        if bit_length > 2 {
            candidate |= BigUint::one();
        }

        if is_probable_prime(&candidate, PRIME_TEST_ROUNDS) {
            return candidate;
        }
    }
}

/// Generate a uniform random integer in [0, 2^bit_width)
pub fn random_biguint(bit_width: u64) -> BigUint {
    thread_rng().gen_biguint(bit_width)
}
