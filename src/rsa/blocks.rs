// Block Codec
// Converts byte payloads to fixed-width big-endian integer blocks and back,
// with reversible length padding

use num_bigint::BigUint;

use super::error::{CipherError, CipherResult};

/// A payload chunk interpreted as a big-endian unsigned integer.
pub type Block = BigUint;

/// Check that `block_size`-byte blocks always stay below the modulus.
///
/// A block of `block_size` bytes can take any value up to
/// 2^(block_size*8) - 1, so the modulus must be strictly wider. Every
/// caller must run this check before encoding for encryption.
pub fn validate_block_size(block_size: usize, modulus: &BigUint) -> CipherResult<()> {
    if (block_size as u64) * 8 >= modulus.bits() {
        return Err(CipherError::BlockSizeTooLarge {
            block_size,
            modulus_bits: modulus.bits(),
        });
    }
    Ok(())
}

/// Pad the message to a multiple of `block_size` by appending k bytes of
/// value k, k in 1..=block_size. An aligned message receives a full extra
/// block so the padding is always unambiguous.
fn pad_message(message: &[u8], block_size: usize) -> CipherResult<Vec<u8>> {
    // The padding length must be expressible in the trailing byte
    if block_size == 0 || block_size > 255 {
        return Err(CipherError::PaddingRange(block_size));
    }

    let padding_len = block_size - (message.len() % block_size);
    let mut padded = Vec::with_capacity(message.len() + padding_len);
    padded.extend_from_slice(message);
    padded.extend(std::iter::repeat(padding_len as u8).take(padding_len));
    Ok(padded)
}

/// Strip the padding appended by [`pad_message`]: read the trailing byte
/// as the padding length and drop that many bytes.
fn unpad_message(message: &[u8]) -> CipherResult<&[u8]> {
    let padding_len = match message.last() {
        Some(&len) => len as usize,
        None => return Err(CipherError::CorruptPadding),
    };
    if padding_len == 0 || padding_len > message.len() {
        return Err(CipherError::CorruptPadding);
    }
    Ok(&message[..message.len() - padding_len])
}

/// Pad `payload` and split it into `block_size`-byte big-endian blocks.
pub fn encode(payload: &[u8], block_size: usize) -> CipherResult<Vec<Block>> {
    let padded = pad_message(payload, block_size)?;

    let blocks = padded
        .chunks_exact(block_size)
        .map(BigUint::from_bytes_be)
        .collect();
    Ok(blocks)
}

/// Serialize every block back to exactly `block_size` bytes, concatenate
/// and strip the padding.
pub fn decode(blocks: &[Block], block_size: usize) -> CipherResult<Vec<u8>> {
    if block_size == 0 || block_size > 255 {
        return Err(CipherError::PaddingRange(block_size));
    }

    let mut message = Vec::with_capacity(blocks.len() * block_size);
    for block in blocks {
        let bytes = block.to_bytes_be();
        if bytes.len() > block_size {
            return Err(CipherError::BlockTooWide(block_size));
        }
        // Left-pad with zeros to the fixed width
        message.extend(std::iter::repeat(0u8).take(block_size - bytes.len()));
        message.extend_from_slice(&bytes);
    }

    Ok(unpad_message(&message)?.to_vec())
}

/// Encode a UTF-8 string.
pub fn encode_text(text: &str, block_size: usize) -> CipherResult<Vec<Block>> {
    encode(text.as_bytes(), block_size)
}

/// Decode blocks back into a UTF-8 string. Fails with
/// [`CipherError::InvalidUtf8`] rather than substituting replacement
/// characters, since bad UTF-8 here means wrong keys, wrong IV or
/// corrupted ciphertext.
pub fn decode_text(blocks: &[Block], block_size: usize) -> CipherResult<String> {
    let bytes = decode(blocks, block_size)?;
    Ok(String::from_utf8(bytes)?)
}

/// Render a block sequence as fixed-width hex strings for display or
/// transport. Ciphertext and IVs are public, so this needs no guard.
pub fn blocks_to_hex(blocks: &[Block], block_size: usize) -> Vec<String> {
    blocks
        .iter()
        .map(|block| {
            let bytes = block.to_bytes_be();
            let mut fixed = vec![0u8; block_size.saturating_sub(bytes.len())];
            fixed.extend_from_slice(&bytes);
            hex::encode(fixed)
        })
        .collect()
}

/// Parse blocks previously rendered with [`blocks_to_hex`].
pub fn blocks_from_hex(encoded: &[String]) -> Result<Vec<Block>, hex::FromHexError> {
    encoded
        .iter()
        .map(|s| Ok(BigUint::from_bytes_be(&hex::decode(s)?)))
        .collect()
}
