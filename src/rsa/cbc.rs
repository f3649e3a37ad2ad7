// CBC Mode (Cipher Block Chaining)
// XOR feedback chaining over the RSA block permutation, seeded by a
// public random initialization vector

use log::debug;
use num_bigint::BigUint;
use num_traits::One;

use super::bigint::random_biguint;
use super::blocks::{self, Block};
use super::cipher::{decrypt_block, encrypt_block};
use super::error::CipherResult;

/// Mask covering exactly `block_size` bytes: 2^(block_size*8) - 1.
///
/// The IV and every chaining value are truncated with this mask so the
/// XOR can never produce more than block_size bytes. Together with
/// `validate_block_size` that keeps every mixed block below the modulus.
fn block_mask(block_size: usize) -> BigUint {
    (BigUint::one() << (block_size as u64 * 8)) - 1u8
}

/// Draw a fresh initialization vector, uniform over [0, 2^(block_size*8)).
///
/// The IV is public: it must travel with the ciphertext, but it needs no
/// protection.
pub fn generate_iv(block_size: usize) -> BigUint {
    random_biguint(block_size as u64 * 8)
}

/// Encrypt a block sequence with CBC chaining.
///
/// Each plaintext block is XORed with the previous ciphertext block
/// (masked to `block_size` bytes) before the RSA permutation; the IV
/// seeds the chain.
pub fn encrypt(
    plain_blocks: &[Block],
    e: &BigUint,
    n: &BigUint,
    iv: &BigUint,
    block_size: usize,
) -> CipherResult<Vec<Block>> {
    debug!("CBC encrypting {} blocks", plain_blocks.len());

    let mask = block_mask(block_size);
    let mut prev = iv & &mask;
    let mut encrypted = Vec::with_capacity(plain_blocks.len());

    for m in plain_blocks {
        let mixed = m ^ &prev;
        let c = encrypt_block(&mixed, e, n)?;
        prev = &c & &mask;
        encrypted.push(c);
    }

    Ok(encrypted)
}

/// Decrypt a CBC-chained block sequence with the IV that encrypted it.
///
/// The chaining variable follows the ciphertext block just consumed, not
/// the recovered mixed value — the same quantity the encrypt side chained
/// on, which is what makes the round trip work. A wrong IV garbles every
/// plaintext block but never fails here.
pub fn decrypt(
    encrypted_blocks: &[Block],
    d: &BigUint,
    n: &BigUint,
    iv: &BigUint,
    block_size: usize,
) -> Vec<Block> {
    let mask = block_mask(block_size);
    let mut prev = iv & &mask;
    let mut plain = Vec::with_capacity(encrypted_blocks.len());

    for c in encrypted_blocks {
        let mixed = decrypt_block(c, d, n) & &mask;
        plain.push(&mixed ^ &prev);
        prev = c & &mask;
    }

    plain
}

/// Validate, encode and encrypt a UTF-8 string under a fresh IV.
/// Returns the IV alongside the ciphertext; both are needed to decrypt.
pub fn encrypt_text(
    text: &str,
    e: &BigUint,
    n: &BigUint,
    block_size: usize,
) -> CipherResult<(BigUint, Vec<Block>)> {
    blocks::validate_block_size(block_size, n)?;
    let iv = generate_iv(block_size);
    let plain_blocks = blocks::encode_text(text, block_size)?;
    let encrypted = encrypt(&plain_blocks, e, n, &iv, block_size)?;
    Ok((iv, encrypted))
}

/// Decrypt and decode back into a UTF-8 string, given the IV returned by
/// [`encrypt_text`].
pub fn decrypt_text(
    encrypted_blocks: &[Block],
    d: &BigUint,
    n: &BigUint,
    iv: &BigUint,
    block_size: usize,
) -> CipherResult<String> {
    let plain_blocks = decrypt(encrypted_blocks, d, n, iv, block_size);
    blocks::decode_text(&plain_blocks, block_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::keygen::generate_keypair;
    use num_traits::Zero;

    #[test]
    fn test_iv_width() {
        let bound = BigUint::one() << 32;
        for _ in 0..50 {
            assert!(generate_iv(4) < bound);
        }
    }

    #[test]
    fn test_block_sequence_roundtrip() {
        let keypair = generate_keypair(24).unwrap();
        let plain: Vec<Block> = [0u32, 7, 7, 0xFFFFFF, 42]
            .iter()
            .map(|&v| BigUint::from(v))
            .collect();

        let iv = generate_iv(3);
        let encrypted = encrypt(&plain, &keypair.e, &keypair.n, &iv, 3).unwrap();
        let decrypted = decrypt(&encrypted, &keypair.d, &keypair.n, &iv, 3);
        assert_eq!(decrypted, plain);
    }

    #[test]
    fn test_equal_blocks_do_not_leak() {
        // Unlike ECB, chaining hides repeated plaintext blocks
        let keypair = generate_keypair(24).unwrap();
        let plain = vec![BigUint::from(7u8), BigUint::from(7u8)];

        let iv = generate_iv(3);
        let encrypted = encrypt(&plain, &keypair.e, &keypair.n, &iv, 3).unwrap();
        assert_ne!(encrypted[0], encrypted[1]);
    }

    #[test]
    fn test_iv_diffusion() {
        let keypair = generate_keypair(24).unwrap();
        let plain = vec![BigUint::from(1234u16), BigUint::from(5678u16)];

        let iv_a = BigUint::from(1u8);
        let iv_b = BigUint::from(2u8);
        let ct_a = encrypt(&plain, &keypair.e, &keypair.n, &iv_a, 3).unwrap();
        let ct_b = encrypt(&plain, &keypair.e, &keypair.n, &iv_b, 3).unwrap();

        // A different IV already changes the first ciphertext block
        assert_ne!(ct_a[0], ct_b[0]);
    }

    #[test]
    fn test_shared_prefix_divergence() {
        let keypair = generate_keypair(24).unwrap();
        let iv = generate_iv(3);

        let msg_a: Vec<Block> = [10u32, 20, 30].iter().map(|&v| BigUint::from(v)).collect();
        let msg_b: Vec<Block> = [10u32, 20, 31].iter().map(|&v| BigUint::from(v)).collect();

        let ct_a = encrypt(&msg_a, &keypair.e, &keypair.n, &iv, 3).unwrap();
        let ct_b = encrypt(&msg_b, &keypair.e, &keypair.n, &iv, 3).unwrap();

        // Identical up to the first differing plaintext block, then apart
        assert_eq!(ct_a[0], ct_b[0]);
        assert_eq!(ct_a[1], ct_b[1]);
        assert_ne!(ct_a[2], ct_b[2]);
    }

    #[test]
    fn test_wrong_iv_garbles_without_panic() {
        let keypair = generate_keypair(24).unwrap();
        let plain: Vec<Block> = [111u32, 222, 333].iter().map(|&v| BigUint::from(v)).collect();

        let iv = BigUint::from(0xABCDEFu32);
        let wrong_iv = BigUint::from(0x123456u32);

        let encrypted = encrypt(&plain, &keypair.e, &keypair.n, &iv, 3).unwrap();
        let garbled = decrypt(&encrypted, &keypair.d, &keypair.n, &wrong_iv, 3);

        // First block differs; the chain repairs itself afterwards since
        // later blocks depend only on the ciphertext
        assert_ne!(garbled[0], plain[0]);
        assert_eq!(garbled[1..], plain[1..]);
    }

    #[test]
    fn test_text_roundtrip() {
        let keypair = generate_keypair(24).unwrap();
        let text = "Chaining makes repeated words look different: same same";

        let (iv, encrypted) = encrypt_text(text, &keypair.e, &keypair.n, 4).unwrap();
        let decrypted = decrypt_text(&encrypted, &keypair.d, &keypair.n, &iv, 4).unwrap();
        assert_eq!(decrypted, text);
    }

    #[test]
    fn test_hi_scenario_with_zero_iv() {
        // Fixed keys p = 65521, q = 65479 and IV 0x00000000
        let e = BigUint::from(65537u32);
        let d = BigUint::from(1492772993u64);
        let n = BigUint::from(4290249559u64);
        let iv = BigUint::zero();

        let plain_blocks = blocks::encode_text("HI", 4).unwrap();
        let encrypted = encrypt(&plain_blocks, &e, &n, &iv, 4).unwrap();
        let decrypted = decrypt(&encrypted, &d, &n, &iv, 4);
        assert_eq!(blocks::decode_text(&decrypted, 4).unwrap(), "HI");
    }

    #[test]
    fn test_mask_keeps_mixed_blocks_in_range() {
        // With a validated block size the XOR can never overflow the
        // modulus, whatever the IV
        let keypair = generate_keypair(24).unwrap();
        blocks::validate_block_size(3, &keypair.n).unwrap();

        let plain: Vec<Block> = vec![block_mask(3); 8];
        let iv = block_mask(3);
        let encrypted = encrypt(&plain, &keypair.e, &keypair.n, &iv, 3).unwrap();
        let decrypted = decrypt(&encrypted, &keypair.d, &keypair.n, &iv, 3);
        assert_eq!(decrypted, plain);
    }
}
