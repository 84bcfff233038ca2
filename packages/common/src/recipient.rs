//! Recipient interface for bridged messages.
//!
//! A contract that accepts pushed messages from a bridge receiver must handle
//! `RecipientExecuteMsg::ProcessBridgeMessage` in its own `ExecuteMsg`. The same
//! `BridgeMessage` payload is returned to recipients that claim messages in
//! pull mode.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_binary, Binary, CosmosMsg, StdResult, WasmMsg};

/// Payload delivered to a recipient, either pushed or claimed.
#[cw_serde]
pub struct BridgeMessage {
    /// Identifier assigned on the source chain
    pub message_id: String,
    /// Numeric identifier of the source chain
    pub source_chain_id: u64,
    /// Sender address on the source chain
    pub source_sender: String,
    /// Opaque application payload
    pub data: Binary,
}

impl BridgeMessage {
    /// Serializes the message wrapped in the recipient execute enum.
    pub fn into_json_binary(self) -> StdResult<Binary> {
        let msg = RecipientExecuteMsg::ProcessBridgeMessage(self);
        to_json_binary(&msg)
    }

    /// Creates an execute message delivering this payload to `contract_addr`.
    pub fn into_cosmos_msg<T: Into<String>>(self, contract_addr: T) -> StdResult<CosmosMsg> {
        let msg = self.into_json_binary()?;
        let execute = WasmMsg::Execute {
            contract_addr: contract_addr.into(),
            msg,
            funds: vec![],
        };
        Ok(execute.into())
    }
}

/// Execute variant every push-mode recipient must accept.
#[cw_serde]
pub enum RecipientExecuteMsg {
    ProcessBridgeMessage(BridgeMessage),
}
