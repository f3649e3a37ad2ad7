// ECB Mode (Electronic Codebook)
// Applies the RSA block permutation to every block independently

use log::debug;
use num_bigint::BigUint;

use super::blocks::{self, Block};
use super::cipher::{decrypt_block, encrypt_block};
use super::error::CipherResult;

/// Encrypt each block independently, preserving order.
///
/// Identical plaintext blocks produce identical ciphertext blocks under
/// the same key. That leak is the defining property of ECB and is kept
/// here on purpose; use CBC when it matters.
pub fn encrypt(blocks: &[Block], e: &BigUint, n: &BigUint) -> CipherResult<Vec<Block>> {
    debug!("ECB encrypting {} blocks", blocks.len());
    blocks.iter().map(|m| encrypt_block(m, e, n)).collect()
}

/// Decrypt each block independently, preserving order.
pub fn decrypt(encrypted_blocks: &[Block], d: &BigUint, n: &BigUint) -> Vec<Block> {
    encrypted_blocks
        .iter()
        .map(|c| decrypt_block(c, d, n))
        .collect()
}

/// Validate, encode and encrypt a UTF-8 string.
pub fn encrypt_text(
    text: &str,
    e: &BigUint,
    n: &BigUint,
    block_size: usize,
) -> CipherResult<Vec<Block>> {
    blocks::validate_block_size(block_size, n)?;
    let plain_blocks = blocks::encode_text(text, block_size)?;
    encrypt(&plain_blocks, e, n)
}

/// Decrypt and decode back into a UTF-8 string.
pub fn decrypt_text(
    encrypted_blocks: &[Block],
    d: &BigUint,
    n: &BigUint,
    block_size: usize,
) -> CipherResult<String> {
    let plain_blocks = decrypt(encrypted_blocks, d, n);
    blocks::decode_text(&plain_blocks, block_size)
}
