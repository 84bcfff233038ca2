//! Inbound message handlers.
//!
//! Every inbound message is authorized and deduplicated before anything is
//! written. What happens next depends on the deployment's delivery mode:
//! pull deployments queue the id for the recipient, push deployments send the
//! payload to the recipient as a sub-message.
//!
//! A failed push dispatch does not undo the receipt. The sub-message is sent
//! with `reply_always`, so the recipient's error lands in `handle_dispatch_reply`,
//! which records it as a `DispatchFailure` while the message record commits.
//! Redelivery goes through `RetryDispatch`, never through a second
//! `ReceiveMessage` (that would be rejected as a duplicate).

use cosmwasm_std::{
    Addr, Binary, DepsMut, Env, MessageInfo, Response, StdError, Storage, SubMsg, SubMsgResult,
};

use common::normalize_address;

use super::admin::is_authorized_relayer;
use crate::error::ContractError;
use crate::state::{
    DeliveryMode, DispatchFailure, InFlightDispatch, StoredMessage, CONFIG, DISPATCH_FAILURES,
    DISPATCH_IN_FLIGHT, DISPATCH_SEQ, MESSAGES, PENDING, STATS,
};

// ============================================================================
// ReceiveMessage
// ============================================================================

#[allow(clippy::too_many_arguments)]
pub fn execute_receive_message(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    message_id: String,
    source_chain_id: u64,
    source_sender: String,
    target_contract: String,
    data: Binary,
) -> Result<Response, ContractError> {
    if !is_authorized_relayer(deps.storage, info.sender.as_str())? {
        return Err(ContractError::UnauthorizedRelayer {
            relayer: normalize_address(info.sender.as_str()),
        });
    }

    if message_id.is_empty() {
        return Err(ContractError::InvalidMessageId);
    }

    if MESSAGES.has(deps.storage, &message_id) {
        return Err(ContractError::DuplicateMessage { message_id });
    }

    let config = CONFIG.load(deps.storage)?;
    let recipient = normalize_address(&target_contract);

    // Push recipients must be valid contract addresses; check before any write
    let dispatch_to = match config.delivery_mode {
        DeliveryMode::Push => Some(deps.api.addr_validate(&recipient).map_err(|e| {
            ContractError::InvalidAddress {
                reason: format!("target_contract: {}", e),
            }
        })?),
        DeliveryMode::Pull => None,
    };

    let message = StoredMessage {
        message_id: message_id.clone(),
        source_chain_id,
        source_sender,
        target_contract,
        data,
        claimed: false,
        received_at: env.block.time,
    };
    MESSAGES.save(deps.storage, &message_id, &message)?;

    STATS.update(deps.storage, |mut stats| -> Result<_, StdError> {
        stats.total_received += 1;
        Ok(stats)
    })?;

    let response = Response::new()
        .add_attribute("method", "receive_message")
        .add_attribute("message_id", &message_id)
        .add_attribute("source_chain_id", source_chain_id.to_string())
        .add_attribute("source_sender", &message.source_sender)
        .add_attribute("target_contract", &recipient);

    match dispatch_to {
        None => {
            let mut queue = PENDING
                .may_load(deps.storage, &recipient)?
                .unwrap_or_default();
            queue.push(message_id);
            PENDING.save(deps.storage, &recipient, &queue)?;

            Ok(response.add_attribute("delivery", "queued"))
        }
        Some(recipient_addr) => {
            let dispatch = dispatch_sub_msg(deps.storage, &message, recipient_addr, 1)?;

            Ok(response
                .add_attribute("delivery", "dispatched")
                .add_submessage(dispatch))
        }
    }
}

// ============================================================================
// RetryDispatch
// ============================================================================

/// Re-send a message whose last push dispatch failed.
pub fn execute_retry_dispatch(
    deps: DepsMut,
    info: MessageInfo,
    message_id: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.delivery_mode != DeliveryMode::Push {
        return Err(ContractError::DeliveryModeMismatch {
            expected: DeliveryMode::Push,
        });
    }

    if info.sender != config.owner && !is_authorized_relayer(deps.storage, info.sender.as_str())?
    {
        return Err(ContractError::Unauthorized);
    }

    let failure = DISPATCH_FAILURES
        .may_load(deps.storage, &message_id)?
        .ok_or_else(|| ContractError::NoDispatchFailure {
            message_id: message_id.clone(),
        })?;
    let message = MESSAGES
        .may_load(deps.storage, &message_id)?
        .ok_or_else(|| ContractError::MessageNotFound {
            message_id: message_id.clone(),
        })?;

    let attempt = failure.attempts + 1;
    let dispatch = dispatch_sub_msg(deps.storage, &message, failure.recipient, attempt)?;

    Ok(Response::new()
        .add_attribute("method", "retry_dispatch")
        .add_attribute("message_id", message_id)
        .add_attribute("attempt", attempt.to_string())
        .add_submessage(dispatch))
}

// ============================================================================
// Dispatch
// ============================================================================

fn dispatch_sub_msg(
    storage: &mut dyn Storage,
    message: &StoredMessage,
    recipient: Addr,
    attempt: u32,
) -> Result<SubMsg, ContractError> {
    let msg = message
        .to_bridge_message()
        .into_cosmos_msg(recipient.as_str())?;

    let reply_id = DISPATCH_SEQ.may_load(storage)?.unwrap_or_default() + 1;
    DISPATCH_SEQ.save(storage, &reply_id)?;

    DISPATCH_IN_FLIGHT.save(
        storage,
        reply_id,
        &InFlightDispatch {
            message_id: message.message_id.clone(),
            recipient,
            attempt,
        },
    )?;

    Ok(SubMsg::reply_always(msg, reply_id))
}

/// Settle the dispatch started by `dispatch_sub_msg` under `reply_id`.
pub fn handle_dispatch_reply(
    deps: DepsMut,
    env: Env,
    reply_id: u64,
    result: SubMsgResult,
) -> Result<Response, ContractError> {
    let in_flight = DISPATCH_IN_FLIGHT
        .may_load(deps.storage, reply_id)?
        .ok_or(ContractError::UnknownReplyId { id: reply_id })?;
    DISPATCH_IN_FLIGHT.remove(deps.storage, reply_id);

    let response = Response::new()
        .add_attribute("method", "dispatch_reply")
        .add_attribute("message_id", &in_flight.message_id)
        .add_attribute("attempt", in_flight.attempt.to_string());

    match result {
        SubMsgResult::Ok(_) => {
            DISPATCH_FAILURES.remove(deps.storage, &in_flight.message_id);
            Ok(response.add_attribute("dispatch_status", "delivered"))
        }
        SubMsgResult::Err(error) => {
            let failure = DispatchFailure {
                recipient: in_flight.recipient,
                error: error.clone(),
                attempts: in_flight.attempt,
                failed_at: env.block.time,
            };
            DISPATCH_FAILURES.save(deps.storage, &in_flight.message_id, &failure)?;

            STATS.update(deps.storage, |mut stats| -> Result<_, StdError> {
                stats.total_dispatch_failures += 1;
                Ok(stats)
            })?;

            Ok(response
                .add_attribute("dispatch_status", "failed")
                .add_attribute("dispatch_error", error))
        }
    }
}
