//! Query handlers for the bridge receiver contract.

use cosmwasm_std::{Deps, Order, StdResult};
use cw_storage_plus::Bound;

use common::normalize_address;

use crate::msg::{
    ConfigResponse, DispatchFailureEntry, DispatchFailureResponse, DispatchFailuresResponse,
    IsMessageClaimedResponse, IsMessageProcessedResponse, IsRelayerAuthorizedResponse,
    MessageInfoResponse, MessageResponse, OwnerResponse, PendingCountResponse,
    PendingMessagesResponse, RelayersResponse, StatsResponse,
};
use crate::state::{DispatchFailure, CONFIG, DISPATCH_FAILURES, MESSAGES, PENDING, RELAYERS, STATS};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 50;

// ============================================================================
// Core Queries
// ============================================================================

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: config.owner,
        delivery_mode: config.delivery_mode,
    })
}

pub fn query_owner(deps: Deps) -> StdResult<OwnerResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(OwnerResponse {
        owner: config.owner,
    })
}

pub fn query_stats(deps: Deps) -> StdResult<StatsResponse> {
    let stats = STATS.load(deps.storage)?;
    Ok(StatsResponse {
        total_received: stats.total_received,
        total_claimed: stats.total_claimed,
        total_dispatch_failures: stats.total_dispatch_failures,
    })
}

// ============================================================================
// Relayer Queries
// ============================================================================

pub fn query_is_relayer_authorized(
    deps: Deps,
    relayer: String,
) -> StdResult<IsRelayerAuthorizedResponse> {
    let authorized = RELAYERS
        .may_load(deps.storage, &normalize_address(&relayer))?
        .unwrap_or(false);
    Ok(IsRelayerAuthorizedResponse { authorized })
}

/// Paginated list of currently authorized relayers (revoked entries skipped).
pub fn query_relayers(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<RelayersResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start_after = start_after.map(|s| normalize_address(&s));
    let start = start_after.as_deref().map(Bound::exclusive);

    let relayers = RELAYERS
        .range(deps.storage, start, None, Order::Ascending)
        .filter(|item| !matches!(item, Ok((_, false))))
        .take(limit)
        .map(|item| item.map(|(relayer, _)| relayer))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(RelayersResponse { relayers })
}

// ============================================================================
// Message Queries
// ============================================================================

pub fn query_is_message_processed(
    deps: Deps,
    message_id: String,
) -> StdResult<IsMessageProcessedResponse> {
    Ok(IsMessageProcessedResponse {
        processed: MESSAGES.has(deps.storage, &message_id),
    })
}

pub fn query_is_message_claimed(
    deps: Deps,
    message_id: String,
) -> StdResult<IsMessageClaimedResponse> {
    let claimed = MESSAGES
        .may_load(deps.storage, &message_id)?
        .map(|message| message.claimed)
        .unwrap_or(false);
    Ok(IsMessageClaimedResponse { claimed })
}

pub fn query_message(deps: Deps, message_id: String) -> StdResult<MessageResponse> {
    let message = MESSAGES
        .may_load(deps.storage, &message_id)?
        .map(|message| MessageInfoResponse {
            message_id: message.message_id,
            source_chain_id: message.source_chain_id,
            source_sender: message.source_sender,
            target_contract: message.target_contract,
            data: message.data,
            claimed: message.claimed,
            received_at: message.received_at,
        });
    Ok(MessageResponse { message })
}

// ============================================================================
// Pending Queue Queries
// ============================================================================

fn pending_message_ids(deps: Deps, target_contract: &str) -> StdResult<Vec<String>> {
    let queue = PENDING
        .may_load(deps.storage, &normalize_address(target_contract))?
        .unwrap_or_default();

    let mut pending = Vec::with_capacity(queue.len());
    for message_id in queue {
        let unclaimed = MESSAGES
            .may_load(deps.storage, &message_id)?
            .map(|message| !message.claimed)
            .unwrap_or(false);
        if unclaimed {
            pending.push(message_id);
        }
    }
    Ok(pending)
}

pub fn query_pending_messages(
    deps: Deps,
    target_contract: String,
) -> StdResult<PendingMessagesResponse> {
    Ok(PendingMessagesResponse {
        message_ids: pending_message_ids(deps, &target_contract)?,
    })
}

pub fn query_pending_count(deps: Deps, target_contract: String) -> StdResult<PendingCountResponse> {
    let count = pending_message_ids(deps, &target_contract)?.len() as u32;
    Ok(PendingCountResponse { count })
}

// ============================================================================
// Dispatch Failure Queries
// ============================================================================

fn failure_entry(message_id: String, failure: DispatchFailure) -> DispatchFailureEntry {
    DispatchFailureEntry {
        message_id,
        recipient: failure.recipient,
        error: failure.error,
        attempts: failure.attempts,
        failed_at: failure.failed_at,
    }
}

pub fn query_dispatch_failure(
    deps: Deps,
    message_id: String,
) -> StdResult<DispatchFailureResponse> {
    let failure = DISPATCH_FAILURES
        .may_load(deps.storage, &message_id)?
        .map(|failure| failure_entry(message_id, failure));
    Ok(DispatchFailureResponse { failure })
}

pub fn query_dispatch_failures(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<DispatchFailuresResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    let failures = DISPATCH_FAILURES
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(message_id, failure)| failure_entry(message_id, failure)))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(DispatchFailuresResponse { failures })
}
