//! Message types for the bridge receiver contract

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Timestamp};

use crate::state::DeliveryMode;
use common::BridgeMessage;

// ============================================================================
// Instantiate & Migrate
// ============================================================================

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct InstantiateMsg {
    /// Owner address (defaults to the instantiating account)
    pub owner: Option<String>,
    /// Push or pull delivery; cannot be changed later
    pub delivery_mode: DeliveryMode,
    /// Relayers authorized from the start
    pub relayers: Vec<String>,
}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Message Delivery
    // ========================================================================
    /// Record an inbound message and deliver it per the delivery mode
    ///
    /// Authorization: Authorized relayer only
    ReceiveMessage {
        message_id: String,
        source_chain_id: u64,
        source_sender: String,
        target_contract: String,
        data: Binary,
    },

    /// Claim a single pending message (pull mode)
    ///
    /// Authorization: Anyone who knows the message id
    ///
    /// The payload is returned as `ClaimMessageResponse` in the response data.
    ClaimMessage { message_id: String },

    /// Claim every pending message of a recipient (pull mode)
    ///
    /// The payloads are returned as `ClaimAllMessagesResponse` in the response data.
    ClaimAllMessages { target_contract: String },

    /// Re-dispatch a message whose push delivery failed (push mode)
    ///
    /// Authorization: Owner or authorized relayer
    RetryDispatch { message_id: String },

    // ========================================================================
    // Admin Operations
    // ========================================================================
    /// Authorization: Owner only
    SetAuthorizedRelayer { relayer: String, authorized: bool },

    /// Authorization: Owner only
    TransferOwnership { new_owner: String },
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(OwnerResponse)]
    Owner {},

    #[returns(StatsResponse)]
    Stats {},

    #[returns(IsRelayerAuthorizedResponse)]
    IsRelayerAuthorized { relayer: String },

    /// Authorized relayers, paginated by normalized address
    #[returns(RelayersResponse)]
    Relayers {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    #[returns(IsMessageProcessedResponse)]
    IsMessageProcessed { message_id: String },

    #[returns(IsMessageClaimedResponse)]
    IsMessageClaimed { message_id: String },

    /// Stored message, `None` if never received
    #[returns(MessageResponse)]
    Message { message_id: String },

    /// Unclaimed message ids queued for a recipient, in arrival order
    #[returns(PendingMessagesResponse)]
    PendingMessages { target_contract: String },

    #[returns(PendingCountResponse)]
    PendingCount { target_contract: String },

    #[returns(DispatchFailureResponse)]
    DispatchFailure { message_id: String },

    #[returns(DispatchFailuresResponse)]
    DispatchFailures {
        start_after: Option<String>,
        limit: Option<u32>,
    },
}

// ============================================================================
// Execute Response Data
// ============================================================================

#[cw_serde]
pub struct ClaimMessageResponse {
    pub message: BridgeMessage,
}

#[cw_serde]
pub struct ClaimAllMessagesResponse {
    pub messages: Vec<BridgeMessage>,
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Addr,
    pub delivery_mode: DeliveryMode,
}

#[cw_serde]
pub struct OwnerResponse {
    pub owner: Addr,
}

#[cw_serde]
pub struct StatsResponse {
    pub total_received: u64,
    pub total_claimed: u64,
    pub total_dispatch_failures: u64,
}

#[cw_serde]
pub struct IsRelayerAuthorizedResponse {
    pub authorized: bool,
}

#[cw_serde]
pub struct RelayersResponse {
    pub relayers: Vec<String>,
}

#[cw_serde]
pub struct IsMessageProcessedResponse {
    pub processed: bool,
}

#[cw_serde]
pub struct IsMessageClaimedResponse {
    pub claimed: bool,
}

#[cw_serde]
pub struct MessageInfoResponse {
    pub message_id: String,
    pub source_chain_id: u64,
    pub source_sender: String,
    pub target_contract: String,
    pub data: Binary,
    pub claimed: bool,
    pub received_at: Timestamp,
}

#[cw_serde]
pub struct MessageResponse {
    pub message: Option<MessageInfoResponse>,
}

#[cw_serde]
pub struct PendingMessagesResponse {
    pub message_ids: Vec<String>,
}

#[cw_serde]
pub struct PendingCountResponse {
    pub count: u32,
}

#[cw_serde]
pub struct DispatchFailureEntry {
    pub message_id: String,
    pub recipient: Addr,
    pub error: String,
    pub attempts: u32,
    pub failed_at: Timestamp,
}

#[cw_serde]
pub struct DispatchFailureResponse {
    pub failure: Option<DispatchFailureEntry>,
}

#[cw_serde]
pub struct DispatchFailuresResponse {
    pub failures: Vec<DispatchFailureEntry>,
}
