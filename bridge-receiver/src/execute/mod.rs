//! Execute handlers for the bridge receiver contract.
//!
//! - `inbound` - ReceiveMessage, push dispatch and dispatch retries
//! - `claim` - Pull-mode claim handlers
//! - `admin` - Relayer registry and ownership

mod admin;
mod claim;
mod inbound;

pub use admin::*;
pub use claim::*;
pub use inbound::*;
