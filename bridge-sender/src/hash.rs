//! Hash computation for outbound messages
//!
//! # Message Hash
//! keccak256 over the concatenation of:
//! - block time in nanoseconds (8 bytes, big-endian)
//! - outbound nonce (8 bytes, big-endian)
//! - sender canonical address bytes
//! - target contract string (UTF-8)
//! - raw payload bytes
//!
//! The nonce makes two identical sends in the same block hash differently.

use tiny_keccak::{Hasher, Keccak};

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Compute the tracking hash of an outbound message.
pub fn compute_message_hash(
    timestamp_nanos: u64,
    nonce: u64,
    sender: &[u8],
    target_contract: &str,
    data: &[u8],
) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(&timestamp_nanos.to_be_bytes());
    hasher.update(&nonce.to_be_bytes());
    hasher.update(sender);
    hasher.update(target_contract.as_bytes());
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// 20-byte EVM form of a local canonical address.
///
/// 20-byte canonical addresses are used as-is; longer ones (e.g. 32-byte
/// contract addresses) map to the last 20 bytes of their keccak256 hash.
pub fn evm_sender_address(canonical: &[u8]) -> [u8; 20] {
    let mut result = [0u8; 20];
    if canonical.len() == 20 {
        result.copy_from_slice(canonical);
    } else {
        result.copy_from_slice(&keccak256(canonical)[12..]);
    }
    result
}
