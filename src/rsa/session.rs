// Session
// Owns a keypair and a validated block size so callers don't juggle the
// raw parameters between calls

use num_bigint::BigUint;

use super::blocks::{validate_block_size, Block};
use super::error::CipherResult;
use super::keygen::{generate_keypair, Keypair};
use super::{cbc, ecb};

/// A keypair plus a block size that has been validated against it.
///
/// Replaces ad-hoc global key state on the caller's side: build one per
/// logical session, then share it read-only. The core stays stateless
/// between calls; the only transient state is CBC's chaining value, which
/// lives inside a single call.
#[derive(Debug, Clone)]
pub struct Session {
    keypair: Keypair,
    block_size: usize,
}

impl Session {
    /// Generate a fresh keypair and validate `block_size` against it.
    pub fn new(bit_length: u64, block_size: usize) -> CipherResult<Self> {
        let keypair = generate_keypair(bit_length)?;
        Self::with_keypair(keypair, block_size)
    }

    /// Wrap an existing keypair, validating `block_size` against its
    /// modulus up front so later calls cannot hit a block-size failure.
    pub fn with_keypair(keypair: Keypair, block_size: usize) -> CipherResult<Self> {
        validate_block_size(block_size, &keypair.n)?;
        Ok(Self {
            keypair,
            block_size,
        })
    }

    pub fn keypair(&self) -> &Keypair {
        &self.keypair
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// ECB-encrypt a string with the session key.
    pub fn encrypt_ecb(&self, text: &str) -> CipherResult<Vec<Block>> {
        ecb::encrypt_text(text, &self.keypair.e, &self.keypair.n, self.block_size)
    }

    /// Decrypt an ECB ciphertext produced with the session key.
    pub fn decrypt_ecb(&self, encrypted_blocks: &[Block]) -> CipherResult<String> {
        ecb::decrypt_text(
            encrypted_blocks,
            &self.keypair.d,
            &self.keypair.n,
            self.block_size,
        )
    }

    /// CBC-encrypt a string with the session key under a fresh IV.
    pub fn encrypt_cbc(&self, text: &str) -> CipherResult<(BigUint, Vec<Block>)> {
        cbc::encrypt_text(text, &self.keypair.e, &self.keypair.n, self.block_size)
    }

    /// Decrypt a CBC ciphertext with the IV it was encrypted under.
    pub fn decrypt_cbc(&self, encrypted_blocks: &[Block], iv: &BigUint) -> CipherResult<String> {
        cbc::decrypt_text(
            encrypted_blocks,
            &self.keypair.d,
            &self.keypair.n,
            iv,
            self.block_size,
        )
    }
}
