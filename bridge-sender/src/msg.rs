//! Message types for the bridge sender contract

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Timestamp};

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct InstantiateMsg {
    /// Routing tag for encoded payloads (defaults to 61998)
    pub routing_tag: Option<u32>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Register an outbound message
    ///
    /// Authorization: Anyone; the caller is recorded as the message sender
    ///
    /// Returns `SendMessageResponse` in the response data.
    SendMessage {
        /// Destination chain id
        target_chain_id: u64,
        /// Destination contract as a 0x-prefixed EVM address
        target_contract: String,
        /// Application payload
        data: Binary,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    /// Single message by hash (with or without 0x prefix)
    #[returns(MessageResponse)]
    Message { message_hash: String },

    /// Full records, paginated by hash
    #[returns(MessagesResponse)]
    Messages {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    /// Message hashes only, paginated
    #[returns(MessageHashesResponse)]
    MessageHashes {
        start_after: Option<String>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct SendMessageResponse {
    pub message_hash: String,
}

#[cw_serde]
pub struct ConfigResponse {
    pub routing_tag: u32,
    pub total_messages: u64,
}

#[cw_serde]
pub struct OutboundMessageResponse {
    pub message_hash: String,
    pub target_chain_id: u64,
    pub target_contract: String,
    /// ABI-encoded payload
    pub data: Binary,
    pub sender: Addr,
    pub nonce: u64,
    pub created_at: Timestamp,
}

#[cw_serde]
pub struct MessageResponse {
    pub message: Option<OutboundMessageResponse>,
}

#[cw_serde]
pub struct MessagesResponse {
    pub messages: Vec<OutboundMessageResponse>,
}

#[cw_serde]
pub struct MessageHashesResponse {
    pub hashes: Vec<String>,
}
