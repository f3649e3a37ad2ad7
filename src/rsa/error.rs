// Error types shared across the crate

use thiserror::Error;

/// Errors produced by key generation, the block codec and the two modes.
#[derive(Debug, Error)]
pub enum CipherError {
    /// φ(n) turned out to be divisible by the fixed public exponent, so no
    /// private exponent exists. Recoverable: generate a fresh keypair.
    #[error("unlucky primes: totient is divisible by e=65537, regenerate the keypair")]
    UnluckyPrimes,

    /// Block width would allow block values to reach or exceed the modulus.
    #[error("block size {block_size} too large for a {modulus_bits}-bit modulus")]
    BlockSizeTooLarge {
        block_size: usize,
        modulus_bits: u64,
    },

    /// Padding length must fit in a single byte, so block sizes outside
    /// 1..=255 cannot be padded.
    #[error("block size {0} is outside the representable padding range 1..=255")]
    PaddingRange(usize),

    /// A plaintext (or IV-mixed) block was not strictly below the modulus.
    #[error("block value is not smaller than the modulus")]
    BlockOverflow,

    /// A decoded block did not fit back into its fixed byte width. Seen
    /// when ciphertext is decoded with mismatched keys or parameters.
    #[error("block value does not fit in {0} bytes")]
    BlockTooWide(usize),

    /// The trailing padding-length byte was zero or larger than the
    /// decoded payload. Usually means wrong keys, wrong IV or corruption.
    #[error("decoded payload carries a corrupt padding length")]
    CorruptPadding,

    /// The unpadded bytes were not valid UTF-8.
    #[error("decrypted bytes are not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Result type for all fallible operations in this crate.
pub type CipherResult<T> = Result<T, CipherError>;
