//! Bridge Sender Contract - Outbound Cross-Chain Messages
//!
//! Contracts on this chain call `SendMessage` to hand a payload to the bridge.
//! Each message is stored under a unique keccak256 hash, with its payload
//! ABI-encoded for the destination EVM forwarder:
//!
//! ```text
//! abi.encode(uint32 routingTag, address sender, address target, bytes data)
//! ```
//!
//! The off-chain forwarder lists message hashes, reads each record and
//! submits the encoded payload on the destination chain.

pub mod abi;
pub mod address_codec;
pub mod contract;
pub mod error;
pub mod hash;
pub mod msg;
pub mod state;

pub use crate::abi::{decode_bridge_payload, encode_bridge_payload, BridgePayload};
pub use crate::error::ContractError;
pub use crate::hash::{compute_message_hash, evm_sender_address, keccak256};
