// RSA Module - Main module file
// Exports keygen, the block codec, the block cipher and both chaining modes

pub mod bigint;
pub mod blocks;
pub mod cbc;
pub mod cipher;
pub mod ecb;
pub mod error;
pub mod keygen;
pub mod session;

pub use blocks::{decode, decode_text, encode, encode_text, validate_block_size, Block};
pub use cipher::{decrypt_block, encrypt_block};
pub use error::{CipherError, CipherResult};
pub use keygen::{generate_keypair, Keypair, PUBLIC_EXPONENT};
pub use session::Session;
