//! Constants for the migration core
//!
//! This module contains all constants used throughout the migration core.

// Field validation messages
pub const MSG_NOT_A_NUMBER: &str = "Must be a valid number.";
pub const MSG_NOT_AN_INTEGER: &str = "Must be an integer.";
pub const MSG_NEGATIVE: &str = "Cannot be negative.";
pub const MSG_TOO_LARGE: &str = "Value is too large.";

// Transport error recorded when a running submission is dropped
pub const MSG_SUBMISSION_ABANDONED: &str = "submission abandoned before the deployer answered";

// Address format
pub const ADDRESS_PREFIX: &str = "0x";
pub const ADDRESS_HEX_LENGTH: usize = 40;
pub const ADDRESS_LENGTH: usize = 42;

// Largest exponent accepted in numeric text; u128 has 39 digits
pub const MAX_DECIMAL_EXPONENT: i64 = 64;

// Token defaults
pub const DEFAULT_DECIMALS: u8 = 0;
pub const DEFAULT_TOTAL_SUPPLY: u128 = 0;
pub const DEFAULT_IS_OWNABLE: bool = false;

// Configuration
pub const ENV_EXPECTED_CHAIN_ID: &str = "POOLPARTY_EXPECTED_CHAIN_ID";
pub const ENV_IDENTIFIER_PREFIX: &str = "POOLPARTY_IDENTIFIER_PREFIX";
pub const ENV_STRICT_ADDRESSES: &str = "POOLPARTY_STRICT_ADDRESSES";
pub const ENV_REQUIRE_TOKEN_IDENTITY: &str = "POOLPARTY_REQUIRE_TOKEN_IDENTITY";
pub const DEFAULT_IDENTIFIER_PREFIX: &str = "pool-party";

// Networks
pub const HARDHAT_CHAIN_ID: u64 = 31337;
pub const ETHEREUM_CHAIN_ID: u64 = 1;
pub const SEPOLIA_CHAIN_ID: u64 = 11155111;
pub const BASE_CHAIN_ID: u64 = 8453;
pub const BASE_SEPOLIA_CHAIN_ID: u64 = 84532;
pub const DEFAULT_EXPECTED_CHAIN_ID: u64 = HARDHAT_CHAIN_ID;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_constants() {
        assert_eq!(ADDRESS_PREFIX.len() + ADDRESS_HEX_LENGTH, ADDRESS_LENGTH);
    }

    #[test]
    fn test_exponent_cap_covers_u128() {
        assert!(u128::MAX.to_string().len() as i64 <= MAX_DECIMAL_EXPONENT);
    }
}
