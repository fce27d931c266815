//! Utility functions for the migration core
//!
//! This module contains common utility functions used throughout the migration core.

use crate::shared::constants::{ADDRESS_HEX_LENGTH, ADDRESS_LENGTH, ADDRESS_PREFIX};
use crate::shared::error::MigrationError;
use ethers::types::Address as H160;
use ethers::utils::to_checksum;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// Generate a unique ID
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Generate a request correlation identifier, `<prefix>-<uuid>`
pub fn generate_identifier(prefix: &str) -> String {
    if prefix.is_empty() {
        generate_id()
    } else {
        format!("{}-{}", prefix, generate_id())
    }
}

/// Get current timestamp in seconds
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| std::time::Duration::from_secs(0))
        .as_secs()
}

/// Validate Ethereum address format.
///
/// Accepts `0x` plus 40 hex digits. All-lowercase and all-uppercase digits
/// are taken as-is; mixed case must match the EIP-55 checksum.
pub fn validate_ethereum_address(address: &str) -> Result<H160, MigrationError> {
    if !address.starts_with(ADDRESS_PREFIX) {
        return Err(MigrationError::validation("Address must start with 0x"));
    }

    if address.len() != ADDRESS_LENGTH {
        return Err(MigrationError::validation("Address must be 42 characters long"));
    }

    let hex_part = &address[ADDRESS_PREFIX.len()..];
    if hex_part.len() != ADDRESS_HEX_LENGTH || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(MigrationError::validation("Address contains invalid hex characters"));
    }

    let parsed = H160::from_str(hex_part)
        .map_err(|e| MigrationError::validation(format!("Invalid address: {}", e)))?;

    let has_upper = hex_part.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = hex_part.chars().any(|c| c.is_ascii_lowercase());
    if has_upper && has_lower && to_checksum(&parsed, None) != address {
        return Err(MigrationError::validation("Address checksum mismatch"));
    }

    Ok(parsed)
}

/// Whether `address` passes [`validate_ethereum_address`]
pub fn is_valid_ethereum_address(address: &str) -> bool {
    validate_ethereum_address(address).is_ok()
}

/// EIP-55 form of a well-formed address
pub fn checksum_address(address: &str) -> Result<String, MigrationError> {
    let parsed = validate_ethereum_address(address)?;
    Ok(to_checksum(&parsed, None))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECKSUMMED: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    #[test]
    fn test_generate_id() {
        let id1 = generate_id();
        let id2 = generate_id();

        assert_ne!(id1, id2);
        assert_eq!(id1.len(), 36);
    }

    #[test]
    fn test_generate_identifier() {
        let identifier = generate_identifier("pool-party");
        assert!(identifier.starts_with("pool-party-"));
        assert_eq!(identifier.len(), "pool-party-".len() + 36);

        assert_eq!(generate_identifier("").len(), 36);
    }

    #[test]
    fn test_current_timestamp() {
        assert!(current_timestamp() > 0);
    }

    #[test]
    fn test_validate_ethereum_address() {
        assert!(validate_ethereum_address(CHECKSUMMED).is_ok());
        assert!(validate_ethereum_address(&CHECKSUMMED.to_lowercase()).is_ok());
        assert!(validate_ethereum_address("0x5AAEB6053F3E94C9B9A09F33669435E7EF1BEAED").is_ok());

        assert!(validate_ethereum_address("5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed").is_err());
        assert!(validate_ethereum_address("0xABC").is_err());
        assert!(validate_ethereum_address("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAeZ").is_err());
    }

    #[test]
    fn test_checksum_mismatch_rejected() {
        let broken = "0x5aaeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
        let err = validate_ethereum_address(broken).unwrap_err();
        assert!(err.to_string().contains("checksum"));
    }

    #[test]
    fn test_checksum_address() {
        let lower = CHECKSUMMED.to_lowercase();
        assert_eq!(checksum_address(&lower).unwrap(), CHECKSUMMED);
    }
}
