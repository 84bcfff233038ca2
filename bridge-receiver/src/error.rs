//! Error types for the bridge receiver contract

use cosmwasm_std::StdError;
use thiserror::Error;

use crate::state::DeliveryMode;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only owner can perform this action")]
    Unauthorized,

    #[error("Unauthorized relayer: {relayer}")]
    UnauthorizedRelayer { relayer: String },

    // ========================================================================
    // Message Errors
    // ========================================================================

    #[error("Message already received: {message_id}")]
    DuplicateMessage { message_id: String },

    #[error("Message not found: {message_id}")]
    MessageNotFound { message_id: String },

    #[error("Message already claimed: {message_id}")]
    AlreadyClaimed { message_id: String },

    #[error("Invalid message id: must not be empty")]
    InvalidMessageId,

    #[error("Invalid address: {reason}")]
    InvalidAddress { reason: String },

    // ========================================================================
    // Delivery Errors
    // ========================================================================

    #[error("Operation requires {expected} delivery mode")]
    DeliveryModeMismatch { expected: DeliveryMode },

    #[error("No failed dispatch recorded for message: {message_id}")]
    NoDispatchFailure { message_id: String },

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },
}
