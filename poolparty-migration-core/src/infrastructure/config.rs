//! Configuration loaded from the environment
//!
//! Keys: POOLPARTY_EXPECTED_CHAIN_ID, POOLPARTY_IDENTIFIER_PREFIX,
//!       POOLPARTY_STRICT_ADDRESSES, POOLPARTY_REQUIRE_TOKEN_IDENTITY

use dotenv::dotenv;
use serde::Serialize;
use std::env;

use crate::core::submission::AssemblyPolicy;
use crate::domain::entities::{KnownNetwork, NetworkIdentity};
use crate::shared::constants::{
    DEFAULT_EXPECTED_CHAIN_ID, DEFAULT_IDENTIFIER_PREFIX, ENV_EXPECTED_CHAIN_ID,
    ENV_IDENTIFIER_PREFIX, ENV_REQUIRE_TOKEN_IDENTITY, ENV_STRICT_ADDRESSES,
};
use crate::shared::error::MigrationError;
use crate::shared::types::{ChainId, MigrationResult};
use crate::shared::validation::ValidatedField;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationConfig {
    pub expected_chain_id: ChainId,
    pub identifier_prefix: String,
    pub strict_addresses: bool,
    pub require_token_identity: bool,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            expected_chain_id: DEFAULT_EXPECTED_CHAIN_ID,
            identifier_prefix: DEFAULT_IDENTIFIER_PREFIX.to_string(),
            strict_addresses: false,
            require_token_identity: false,
        }
    }
}

impl MigrationConfig {
    /// Load from .env (if present) and the process environment
    pub fn from_env() -> MigrationResult<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from any key lookup; unset or blank keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> MigrationResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let expected_chain_id = match get(ENV_EXPECTED_CHAIN_ID) {
            Some(raw) => {
                let field = ValidatedField::<ChainId>::parse(raw.as_str());
                field.value().ok_or_else(|| {
                    let reason = field
                        .error()
                        .map(|e| e.message())
                        .unwrap_or("missing value");
                    MigrationError::config(format!("{}={:?}: {}", ENV_EXPECTED_CHAIN_ID, raw, reason))
                })?
            }
            None => defaults.expected_chain_id,
        };

        let identifier_prefix = get(ENV_IDENTIFIER_PREFIX)
            .map(|prefix| prefix.trim().to_string())
            .unwrap_or(defaults.identifier_prefix);

        let strict_addresses = match get(ENV_STRICT_ADDRESSES) {
            Some(raw) => parse_flag(ENV_STRICT_ADDRESSES, &raw)?,
            None => defaults.strict_addresses,
        };

        let require_token_identity = match get(ENV_REQUIRE_TOKEN_IDENTITY) {
            Some(raw) => parse_flag(ENV_REQUIRE_TOKEN_IDENTITY, &raw)?,
            None => defaults.require_token_identity,
        };

        let config = Self {
            expected_chain_id,
            identifier_prefix,
            strict_addresses,
            require_token_identity,
        };
        log::debug!("Loaded migration config: {:?}", config);
        Ok(config)
    }

    pub fn assembly_policy(&self) -> AssemblyPolicy {
        AssemblyPolicy {
            strict_addresses: self.strict_addresses,
            require_token_identity: self.require_token_identity,
        }
    }

    pub fn expected_network(&self) -> Option<KnownNetwork> {
        KnownNetwork::from_chain_id(self.expected_chain_id)
    }

    /// Pair the wallet's chain with the configured target chain
    pub fn network_identity(&self, current_chain_id: ChainId) -> NetworkIdentity {
        NetworkIdentity::new(current_chain_id, self.expected_chain_id)
    }
}

fn parse_flag(key: &str, raw: &str) -> MigrationResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(MigrationError::config(format!("{}={:?}: expected true or false", key, raw))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = MigrationConfig::from_lookup(lookup(&[])).expect("Failed to load config");
        assert_eq!(config, MigrationConfig::default());
        assert_eq!(config.expected_chain_id, 31337);
        assert_eq!(config.expected_network(), Some(KnownNetwork::Hardhat));
    }

    #[test]
    fn test_values_from_lookup() {
        let config = MigrationConfig::from_lookup(lookup(&[
            (ENV_EXPECTED_CHAIN_ID, "84532"),
            (ENV_IDENTIFIER_PREFIX, " party "),
            (ENV_STRICT_ADDRESSES, "TRUE"),
            (ENV_REQUIRE_TOKEN_IDENTITY, "0"),
        ]))
        .expect("Failed to load config");

        assert_eq!(config.expected_chain_id, 84532);
        assert_eq!(config.identifier_prefix, "party");
        assert!(config.strict_addresses);
        assert!(!config.require_token_identity);
        assert_eq!(
            config.assembly_policy(),
            AssemblyPolicy { strict_addresses: true, require_token_identity: false }
        );
    }

    #[test]
    fn test_blank_values_keep_defaults() {
        let config = MigrationConfig::from_lookup(lookup(&[(ENV_EXPECTED_CHAIN_ID, "  ")]))
            .expect("Failed to load config");
        assert_eq!(config.expected_chain_id, DEFAULT_EXPECTED_CHAIN_ID);
    }

    #[test]
    fn test_invalid_values() {
        let err = MigrationConfig::from_lookup(lookup(&[(ENV_EXPECTED_CHAIN_ID, "-1")]))
            .expect_err("negative chain id should fail");
        assert!(matches!(err, MigrationError::Config(_)));
        assert!(err.to_string().contains("Cannot be negative."));

        let err = MigrationConfig::from_lookup(lookup(&[(ENV_STRICT_ADDRESSES, "maybe")]))
            .expect_err("unknown flag should fail");
        assert!(matches!(err, MigrationError::Config(_)));
    }

    #[test]
    fn test_network_identity() {
        let config = MigrationConfig::default();
        let identity = config.network_identity(1);
        assert_eq!(identity.expected_chain_id, 31337);
        assert!(identity.is_mismatched());
    }
}
