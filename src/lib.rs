//! Textbook RSA as a block cipher, in ECB and CBC chaining modes.
//!
//! This crate reproduces the classic classroom construction: RSA modular
//! exponentiation applied directly to fixed-width integer blocks, with
//! the block stream driven either independently (ECB) or with XOR
//! feedback chaining (CBC). It is deliberately NOT a secure cryptosystem.
//! Textbook RSA without OAEP is malleable and not IND-CPA secure, and RSA
//! is never used as a block cipher in practice. Use it to study the
//! mechanics, not to protect data.
//!
//! Key material and intermediate values are never logged; the `log`
//! facade only ever receives sizes and counts.

pub mod rsa;

pub use rsa::{
    blocks, cbc, cipher, ecb, generate_keypair, CipherError, CipherResult, Keypair, Session,
    PUBLIC_EXPONENT,
};
