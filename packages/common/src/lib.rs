//! Common - Shared Types and Utilities for the Message Bridge Contracts
//!
//! This package provides the recipient callback interface and the address
//! canonicalization used by both the bridge contracts and the contracts
//! that consume bridged messages.

pub mod address;
pub mod recipient;

pub use address::normalize_address;
pub use recipient::{BridgeMessage, RecipientExecuteMsg};
