//! Bridge Sender Contract - Entry Points

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Order, Response,
    StdResult,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;

use crate::abi::encode_bridge_payload;
use crate::address_codec::parse_evm_address;
use crate::error::ContractError;
use crate::hash::{compute_message_hash, evm_sender_address};
use crate::msg::{
    ConfigResponse, ExecuteMsg, InstantiateMsg, MessageHashesResponse, MessageResponse,
    MessagesResponse, MigrateMsg, OutboundMessageResponse, QueryMsg, SendMessageResponse,
};
use crate::state::{
    Config, OutboundMessage, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, DEFAULT_ROUTING_TAG,
    OUTBOUND_MESSAGES, OUTBOUND_NONCE,
};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 50;

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = Config {
        routing_tag: msg.routing_tag.unwrap_or(DEFAULT_ROUTING_TAG),
    };
    CONFIG.save(deps.storage, &config)?;
    OUTBOUND_NONCE.save(deps.storage, &0)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("routing_tag", config.routing_tag.to_string()))
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
        ExecuteMsg::SendMessage {
            target_chain_id,
            target_contract,
            data,
        } => execute_send_message(deps, env, info, target_chain_id, target_contract, data),
    }
}

fn execute_send_message(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    target_chain_id: u64,
    target_contract: String,
    data: Binary,
) -> Result<Response, ContractError> {
    let target = parse_evm_address(&target_contract).map_err(|e| ContractError::InvalidAddress {
        reason: format!("target_contract: {}", e),
    })?;

    let config = CONFIG.load(deps.storage)?;
    let sender_canonical = deps.api.addr_canonicalize(info.sender.as_str())?;
    let sender_evm = evm_sender_address(sender_canonical.as_slice());

    let payload = encode_bridge_payload(config.routing_tag, &sender_evm, &target, &data);

    let nonce = OUTBOUND_NONCE.may_load(deps.storage)?.unwrap_or_default();
    OUTBOUND_NONCE.save(deps.storage, &(nonce + 1))?;

    let hash = compute_message_hash(
        env.block.time.nanos(),
        nonce,
        sender_canonical.as_slice(),
        &target_contract,
        &data,
    );
    let message_hash = hex::encode(hash);

    let message = OutboundMessage {
        target_chain_id,
        target_contract,
        data: Binary::from(payload),
        sender: info.sender,
        nonce,
        created_at: env.block.time,
    };
    OUTBOUND_MESSAGES.save(deps.storage, &message_hash, &message)?;

    let response = SendMessageResponse {
        message_hash: message_hash.clone(),
    };

    Ok(Response::new()
        .set_data(to_json_binary(&response)?)
        .add_attribute("method", "send_message")
        .add_attribute("message_hash", message_hash)
        .add_attribute("sender", message.sender)
        .add_attribute("target_chain_id", target_chain_id.to_string())
        .add_attribute("target_contract", message.target_contract)
        .add_attribute("nonce", nonce.to_string()))
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Message { message_hash } => to_json_binary(&query_message(deps, message_hash)?),
        QueryMsg::Messages { start_after, limit } => {
            to_json_binary(&query_messages(deps, start_after, limit)?)
        }
        QueryMsg::MessageHashes { start_after, limit } => {
            to_json_binary(&query_message_hashes(deps, start_after, limit)?)
        }
    }
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    let total_messages = OUTBOUND_NONCE.may_load(deps.storage)?.unwrap_or_default();
    Ok(ConfigResponse {
        routing_tag: config.routing_tag,
        total_messages,
    })
}

fn query_message(deps: Deps, message_hash: String) -> StdResult<MessageResponse> {
    let key = normalize_hash(&message_hash);
    let message = OUTBOUND_MESSAGES
        .may_load(deps.storage, &key)?
        .map(|m| to_response(key, m));
    Ok(MessageResponse { message })
}

fn query_messages(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<MessagesResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(|s| normalize_hash(&s));
    let start = start.as_deref().map(Bound::exclusive);

    let messages = OUTBOUND_MESSAGES
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(hash, m)| to_response(hash, m)))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(MessagesResponse { messages })
}

fn query_message_hashes(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<MessageHashesResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(|s| normalize_hash(&s));
    let start = start.as_deref().map(Bound::exclusive);

    let hashes = OUTBOUND_MESSAGES
        .keys(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .collect::<StdResult<Vec<_>>>()?;

    Ok(MessageHashesResponse { hashes })
}

/// Stored keys are lowercase hex without a 0x prefix.
fn normalize_hash(hash: &str) -> String {
    let trimmed = hash.trim();
    trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed)
        .to_ascii_lowercase()
}

fn to_response(message_hash: String, m: OutboundMessage) -> OutboundMessageResponse {
    OutboundMessageResponse {
        message_hash,
        target_chain_id: m.target_chain_id,
        target_contract: m.target_contract,
        data: m.data,
        sender: m.sender,
        nonce: m.nonce,
        created_at: m.created_at,
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
