//! Bridge Receiver Contract - Inbound Cross-Chain Messages
//!
//! Authorized relayers submit messages observed on a source chain. Each
//! message id is accepted exactly once and kept forever as a replay record.
//!
//! # Pull Mode
//! 1. Relayer calls `ReceiveMessage`; the id is queued for the target contract
//! 2. The recipient calls `ClaimMessage` or `ClaimAllMessages`
//! 3. Claimed payloads are returned in the response data
//!
//! # Push Mode
//! 1. Relayer calls `ReceiveMessage`
//! 2. The contract executes `ProcessBridgeMessage` on the target contract
//! 3. A rejected dispatch is recorded and can be retried with `RetryDispatch`
//!
//! The mode is chosen at instantiation and never changes.

pub mod contract;
pub mod error;
mod execute;
pub mod msg;
mod query;
pub mod state;

pub use crate::error::ContractError;
pub use crate::state::DeliveryMode;
