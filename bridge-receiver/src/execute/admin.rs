//! Admin operations handlers.
//!
//! This module handles:
//! - Relayer authorization (grant/revoke)
//! - Ownership transfer

use cosmwasm_std::{DepsMut, MessageInfo, Response, StdResult, Storage};

use common::normalize_address;

use crate::error::ContractError;
use crate::state::{CONFIG, RELAYERS};

/// Grant or revoke a relayer. Revocation keeps the entry with `false`.
pub fn execute_set_authorized_relayer(
    deps: DepsMut,
    info: MessageInfo,
    relayer: String,
    authorized: bool,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    let relayer = normalize_address(&relayer);
    if relayer.is_empty() {
        return Err(ContractError::InvalidAddress {
            reason: "relayer address must not be empty".to_string(),
        });
    }
    RELAYERS.save(deps.storage, &relayer, &authorized)?;

    Ok(Response::new()
        .add_attribute("method", "set_authorized_relayer")
        .add_attribute("relayer", relayer)
        .add_attribute("authorized", authorized.to_string()))
}

/// Hand the owner role to `new_owner` immediately.
pub fn execute_transfer_ownership(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    let new_owner = deps.api.addr_validate(&new_owner)?;
    let previous_owner = std::mem::replace(&mut config.owner, new_owner);
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "transfer_ownership")
        .add_attribute("previous_owner", previous_owner)
        .add_attribute("new_owner", config.owner))
}

/// Whether `sender` is currently an authorized relayer.
pub(crate) fn is_authorized_relayer(storage: &dyn Storage, sender: &str) -> StdResult<bool> {
    let relayer = normalize_address(sender);
    Ok(RELAYERS.may_load(storage, &relayer)?.unwrap_or(false))
}
