//! ABI encoding of outbound payloads
//!
//! Produces the same bytes as Solidity
//! `abi.encode(uint32 routingTag, address sender, address target, bytes data)`,
//! i.e. a method call encoding with the 4-byte selector stripped.
//!
//! # Byte Layout
//! - Bytes 0-31:    routingTag (uint32, left-padded)
//! - Bytes 32-63:   sender (address, left-padded)
//! - Bytes 64-95:   target (address, left-padded)
//! - Bytes 96-127:  offset of `data` (always 0x80)
//! - Bytes 128-159: length of `data`
//! - Bytes 160-:    `data`, right-padded to a multiple of 32 bytes

use cosmwasm_std::{StdError, StdResult};

const WORD: usize = 32;
const HEAD_LEN: usize = 4 * WORD;
const DATA_OFFSET: u64 = HEAD_LEN as u64;

/// Decoded form of an outbound payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgePayload {
    pub routing_tag: u32,
    pub sender: [u8; 20],
    pub target: [u8; 20],
    pub data: Vec<u8>,
}

/// Encode an outbound payload for the EVM forwarder.
pub fn encode_bridge_payload(
    routing_tag: u32,
    sender: &[u8; 20],
    target: &[u8; 20],
    data: &[u8],
) -> Vec<u8> {
    let data_words_len = padded_len(data.len());
    let mut out = vec![0u8; HEAD_LEN + WORD + data_words_len];

    // uint32 routingTag - 4 bytes at the end of the first word
    out[WORD - 4..WORD].copy_from_slice(&routing_tag.to_be_bytes());

    // address sender / target - 20 bytes at the end of their words
    out[2 * WORD - 20..2 * WORD].copy_from_slice(sender);
    out[3 * WORD - 20..3 * WORD].copy_from_slice(target);

    // offset of the dynamic `bytes` argument
    out[4 * WORD - 8..4 * WORD].copy_from_slice(&DATA_OFFSET.to_be_bytes());

    // length word, then the data itself
    out[5 * WORD - 8..5 * WORD].copy_from_slice(&(data.len() as u64).to_be_bytes());
    out[5 * WORD..5 * WORD + data.len()].copy_from_slice(data);

    out
}

/// Decode bytes produced by [`encode_bridge_payload`].
pub fn decode_bridge_payload(encoded: &[u8]) -> StdResult<BridgePayload> {
    if encoded.len() < HEAD_LEN + WORD || encoded.len() % WORD != 0 {
        return Err(StdError::generic_err(format!(
            "Invalid payload length: {}",
            encoded.len()
        )));
    }

    let routing_tag = u32::try_from(read_uint(word(encoded, 0))?)
        .map_err(|_| StdError::generic_err("routing tag exceeds uint32"))?;
    let sender = read_address(word(encoded, 1))?;
    let target = read_address(word(encoded, 2))?;

    if read_uint(word(encoded, 3))? != DATA_OFFSET {
        return Err(StdError::generic_err("Unexpected offset for bytes argument"));
    }

    let data_len = usize::try_from(read_uint(word(encoded, 4))?)
        .map_err(|_| StdError::generic_err("bytes length overflow"))?;
    let data_start = HEAD_LEN + WORD;
    let available = encoded.len() - data_start;
    if data_len > available || padded_len(data_len) != available {
        return Err(StdError::generic_err(format!(
            "bytes length {} does not match payload size",
            data_len
        )));
    }

    Ok(BridgePayload {
        routing_tag,
        sender,
        target,
        data: encoded[data_start..data_start + data_len].to_vec(),
    })
}

fn padded_len(len: usize) -> usize {
    ((len + WORD - 1) / WORD) * WORD
}

fn word(encoded: &[u8], index: usize) -> &[u8] {
    &encoded[index * WORD..(index + 1) * WORD]
}

/// Read a uint256 word that must fit in 64 bits.
fn read_uint(word: &[u8]) -> StdResult<u64> {
    if word[..WORD - 8].iter().any(|b| *b != 0) {
        return Err(StdError::generic_err("uint value exceeds 64 bits"));
    }
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&word[WORD - 8..]);
    Ok(u64::from_be_bytes(bytes))
}

fn read_address(word: &[u8]) -> StdResult<[u8; 20]> {
    if word[..WORD - 20].iter().any(|b| *b != 0) {
        return Err(StdError::generic_err("address word has non-zero padding"));
    }
    let mut address = [0u8; 20];
    address.copy_from_slice(&word[WORD - 20..]);
    Ok(address)
}
