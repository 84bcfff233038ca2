//! State definitions for the bridge receiver contract
//!
//! Four tables back the contract: relayer authorizations, the message store,
//! per-recipient pending queues and (push mode only) failed dispatches.

use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, Timestamp};
use cw_storage_plus::{Item, Map};

use common::BridgeMessage;

// ============================================================================
// Core Configuration
// ============================================================================

/// How received messages reach their recipient. Fixed at instantiation.
#[cw_serde]
#[derive(Copy)]
pub enum DeliveryMode {
    /// Messages queue until the recipient claims them
    Pull,
    /// Messages are dispatched to the recipient on receipt
    Push,
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryMode::Pull => write!(f, "pull"),
            DeliveryMode::Push => write!(f, "push"),
        }
    }
}

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Owner allowed to manage relayers and transfer ownership
    pub owner: Addr,
    /// Delivery mode of this deployment
    pub delivery_mode: DeliveryMode,
}

/// Receiver statistics
#[cw_serde]
#[derive(Default)]
pub struct Stats {
    pub total_received: u64,
    pub total_claimed: u64,
    pub total_dispatch_failures: u64,
}

// ============================================================================
// Message Records
// ============================================================================

/// A received message. Never deleted; doubles as the replay-protection record.
#[cw_serde]
pub struct StoredMessage {
    pub message_id: String,
    pub source_chain_id: u64,
    pub source_sender: String,
    /// Recipient as submitted by the relayer
    pub target_contract: String,
    pub data: Binary,
    /// Only ever flips false -> true, and only in pull mode
    pub claimed: bool,
    pub received_at: Timestamp,
}

impl StoredMessage {
    /// Payload handed to the recipient.
    pub fn to_bridge_message(&self) -> BridgeMessage {
        BridgeMessage {
            message_id: self.message_id.clone(),
            source_chain_id: self.source_chain_id,
            source_sender: self.source_sender.clone(),
            data: self.data.clone(),
        }
    }
}

/// Dead-letter record for a push dispatch the recipient rejected
#[cw_serde]
pub struct DispatchFailure {
    /// Recipient contract the dispatch was sent to
    pub recipient: Addr,
    /// Error returned by the recipient
    pub error: String,
    /// Number of dispatch attempts made so far
    pub attempts: u32,
    /// Block time of the most recent failure
    pub failed_at: Timestamp,
}

/// Push dispatch awaiting its reply
#[cw_serde]
pub struct InFlightDispatch {
    pub message_id: String,
    pub recipient: Addr,
    /// 1 for the dispatch made on receipt, incremented by each retry
    pub attempt: u32,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:bridge-receiver";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Storage
// ============================================================================

pub const CONFIG: Item<Config> = Item::new("config");

pub const STATS: Item<Stats> = Item::new("stats");

/// Key: normalized relayer address, Value: whether authorized
pub const RELAYERS: Map<&str, bool> = Map::new("relayers");

/// Key: message_id, Value: StoredMessage
pub const MESSAGES: Map<&str, StoredMessage> = Map::new("messages");

/// Key: normalized recipient, Value: message ids in arrival order
pub const PENDING: Map<&str, Vec<String>> = Map::new("pending");

/// Key: message_id, Value: most recent dispatch failure
pub const DISPATCH_FAILURES: Map<&str, DispatchFailure> = Map::new("dispatch_failures");

/// Last reply id handed to a dispatch sub-message
pub const DISPATCH_SEQ: Item<u64> = Item::new("dispatch_seq");

/// Key: reply id, Value: dispatch awaiting its reply.
/// A recipient may trigger further dispatches before its own reply arrives,
/// so each dispatch owns a separate entry.
pub const DISPATCH_IN_FLIGHT: Map<u64, InFlightDispatch> = Map::new("dispatch_in_flight");
