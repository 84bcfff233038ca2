//! Bridge Receiver Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult,
};
use cw2::set_contract_version;

use common::normalize_address;

use crate::error::ContractError;
use crate::execute::{
    execute_claim_all_messages, execute_claim_message, execute_receive_message,
    execute_retry_dispatch, execute_set_authorized_relayer, execute_transfer_ownership,
    handle_dispatch_reply,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_config, query_dispatch_failure, query_dispatch_failures, query_is_message_claimed,
    query_is_message_processed, query_is_relayer_authorized, query_message, query_owner,
    query_pending_count, query_pending_messages, query_relayers, query_stats,
};
use crate::state::{Config, Stats, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, RELAYERS, STATS};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = match msg.owner {
        Some(owner) => deps.api.addr_validate(&owner)?,
        None => info.sender,
    };

    let config = Config {
        owner,
        delivery_mode: msg.delivery_mode,
    };
    CONFIG.save(deps.storage, &config)?;
    STATS.save(deps.storage, &Stats::default())?;

    let mut relayer_count = 0u32;
    for relayer in msg.relayers {
        let relayer = normalize_address(&relayer);
        if relayer.is_empty() {
            return Err(ContractError::InvalidAddress {
                reason: "relayer address must not be empty".to_string(),
            });
        }
        RELAYERS.save(deps.storage, &relayer, &true)?;
        relayer_count += 1;
    }

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", config.owner)
        .add_attribute("delivery_mode", config.delivery_mode.to_string())
        .add_attribute("relayer_count", relayer_count.to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Message delivery
        ExecuteMsg::ReceiveMessage {
            message_id,
            source_chain_id,
            source_sender,
            target_contract,
            data,
        } => execute_receive_message(
            deps,
            env,
            info,
            message_id,
            source_chain_id,
            source_sender,
            target_contract,
            data,
        ),
        ExecuteMsg::ClaimMessage { message_id } => execute_claim_message(deps, message_id),
        ExecuteMsg::ClaimAllMessages { target_contract } => {
            execute_claim_all_messages(deps, target_contract)
        }
        ExecuteMsg::RetryDispatch { message_id } => {
            execute_retry_dispatch(deps, info, message_id)
        }

        // Admin operations
        ExecuteMsg::SetAuthorizedRelayer {
            relayer,
            authorized,
        } => execute_set_authorized_relayer(deps, info, relayer, authorized),
        ExecuteMsg::TransferOwnership { new_owner } => {
            execute_transfer_ownership(deps, info, new_owner)
        }
    }
}

// ============================================================================
// Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, env: Env, msg: Reply) -> Result<Response, ContractError> {
    handle_dispatch_reply(deps, env, msg.id, msg.result)
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Owner {} => to_json_binary(&query_owner(deps)?),
        QueryMsg::Stats {} => to_json_binary(&query_stats(deps)?),

        // Relayer registry
        QueryMsg::IsRelayerAuthorized { relayer } => {
            to_json_binary(&query_is_relayer_authorized(deps, relayer)?)
        }
        QueryMsg::Relayers { start_after, limit } => {
            to_json_binary(&query_relayers(deps, start_after, limit)?)
        }

        // Message store
        QueryMsg::IsMessageProcessed { message_id } => {
            to_json_binary(&query_is_message_processed(deps, message_id)?)
        }
        QueryMsg::IsMessageClaimed { message_id } => {
            to_json_binary(&query_is_message_claimed(deps, message_id)?)
        }
        QueryMsg::Message { message_id } => to_json_binary(&query_message(deps, message_id)?),

        // Pending queue
        QueryMsg::PendingMessages { target_contract } => {
            to_json_binary(&query_pending_messages(deps, target_contract)?)
        }
        QueryMsg::PendingCount { target_contract } => {
            to_json_binary(&query_pending_count(deps, target_contract)?)
        }

        // Dispatch failures
        QueryMsg::DispatchFailure { message_id } => {
            to_json_binary(&query_dispatch_failure(deps, message_id)?)
        }
        QueryMsg::DispatchFailures { start_after, limit } => {
            to_json_binary(&query_dispatch_failures(deps, start_after, limit)?)
        }
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if STATS.may_load(deps.storage)?.is_none() {
        STATS.save(deps.storage, &Stats::default())?;
    }

    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
