//! State definitions for the bridge sender contract

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, Timestamp};
use cw_storage_plus::{Item, Map};

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Routing tag written as the first word of every encoded payload
    pub routing_tag: u32,
}

/// Outbound message record. Immutable once stored.
#[cw_serde]
pub struct OutboundMessage {
    /// Destination chain id
    pub target_chain_id: u64,
    /// Destination contract (0x-prefixed EVM address, as submitted)
    pub target_contract: String,
    /// ABI-encoded payload for the destination forwarder
    pub data: Binary,
    /// Contract or account that sent the message
    pub sender: Addr,
    /// Sequence number of this message within the contract
    pub nonce: u64,
    /// Block time of submission
    pub created_at: Timestamp,
}

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:bridge-sender";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Routing tag expected by the EVM forwarder
pub const DEFAULT_ROUTING_TAG: u32 = 61_998;

pub const CONFIG: Item<Config> = Item::new("config");

/// Number of messages sent so far; the next message's nonce
pub const OUTBOUND_NONCE: Item<u64> = Item::new("outbound_nonce");

/// Key: message hash (64 lowercase hex chars), Value: OutboundMessage
pub const OUTBOUND_MESSAGES: Map<&str, OutboundMessage> = Map::new("outbound_messages");
