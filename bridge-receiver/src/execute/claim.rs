//! Pull-mode claim handlers.
//!
//! Claims are authorized by knowledge of the message id: neither handler checks
//! who the caller is. Claimed payloads are returned in the response data so a
//! calling contract can read them from its reply.

use cosmwasm_std::{to_json_binary, DepsMut, Response, StdError, Storage};

use common::normalize_address;

use crate::error::ContractError;
use crate::msg::{ClaimAllMessagesResponse, ClaimMessageResponse};
use crate::state::{DeliveryMode, CONFIG, MESSAGES, PENDING, STATS};

fn ensure_pull_mode(storage: &dyn Storage) -> Result<(), ContractError> {
    let config = CONFIG.load(storage)?;
    if config.delivery_mode != DeliveryMode::Pull {
        return Err(ContractError::DeliveryModeMismatch {
            expected: DeliveryMode::Pull,
        });
    }
    Ok(())
}

/// Claim one message. Fails on every call after the first.
///
/// The id is also dropped from its recipient's queue, so queues only ever hold
/// unclaimed ids.
pub fn execute_claim_message(
    deps: DepsMut,
    message_id: String,
) -> Result<Response, ContractError> {
    ensure_pull_mode(deps.storage)?;

    let mut message = MESSAGES
        .may_load(deps.storage, &message_id)?
        .ok_or_else(|| ContractError::MessageNotFound {
            message_id: message_id.clone(),
        })?;

    if message.claimed {
        return Err(ContractError::AlreadyClaimed { message_id });
    }

    message.claimed = true;
    MESSAGES.save(deps.storage, &message_id, &message)?;

    let recipient = normalize_address(&message.target_contract);
    if let Some(mut queue) = PENDING.may_load(deps.storage, &recipient)? {
        let queued = queue.len();
        queue.retain(|id| id != &message_id);
        if queue.len() != queued {
            PENDING.save(deps.storage, &recipient, &queue)?;
        }
    }

    STATS.update(deps.storage, |mut stats| -> Result<_, StdError> {
        stats.total_claimed += 1;
        Ok(stats)
    })?;

    let data = to_json_binary(&ClaimMessageResponse {
        message: message.to_bridge_message(),
    })?;

    Ok(Response::new()
        .set_data(data)
        .add_attribute("method", "claim_message")
        .add_attribute("message_id", message_id)
        .add_attribute("target_contract", recipient))
}

/// Claim every unclaimed message queued for `target_contract`, oldest first,
/// and leave the recipient with an empty queue.
pub fn execute_claim_all_messages(
    deps: DepsMut,
    target_contract: String,
) -> Result<Response, ContractError> {
    ensure_pull_mode(deps.storage)?;

    let recipient = normalize_address(&target_contract);
    let queue = PENDING
        .may_load(deps.storage, &recipient)?
        .unwrap_or_default();

    let mut claimed = Vec::with_capacity(queue.len());
    for message_id in &queue {
        // Queues written before single claims pruned them may still hold claimed ids
        let Some(mut message) = MESSAGES.may_load(deps.storage, message_id)? else {
            continue;
        };
        if message.claimed {
            continue;
        }
        message.claimed = true;
        MESSAGES.save(deps.storage, message_id, &message)?;
        claimed.push(message.to_bridge_message());
    }

    if !queue.is_empty() {
        PENDING.save(deps.storage, &recipient, &Vec::new())?;
    }

    let claimed_count = claimed.len() as u64;
    if claimed_count > 0 {
        STATS.update(deps.storage, |mut stats| -> Result<_, StdError> {
            stats.total_claimed += claimed_count;
            Ok(stats)
        })?;
    }

    let data = to_json_binary(&ClaimAllMessagesResponse { messages: claimed })?;

    Ok(Response::new()
        .set_data(data)
        .add_attribute("method", "claim_all_messages")
        .add_attribute("target_contract", recipient)
        .add_attribute("claimed_count", claimed_count.to_string()))
}
