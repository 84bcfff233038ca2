//! Address canonicalization shared by the bridge contracts.
//!
//! Relayer and recipient identifiers arrive from off-chain services in
//! whatever case the service happened to use (`0xAbC...`, `terra1...`).
//! Every storage key derived from such an identifier goes through
//! [`normalize_address`] on both write and read.

/// Canonical form of an address-like identifier: surrounding whitespace
/// removed and ASCII letters lowercased.
pub fn normalize_address(addr: &str) -> String {
    addr.trim().to_ascii_lowercase()
}
