//! Network entity for the migration core

use serde::{Deserialize, Serialize};

use crate::shared::constants::{
    BASE_CHAIN_ID, BASE_SEPOLIA_CHAIN_ID, ETHEREUM_CHAIN_ID, HARDHAT_CHAIN_ID, SEPOLIA_CHAIN_ID,
};
use crate::shared::types::ChainId;

// Networks a pool party deployment is expected to run on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum KnownNetwork {
    Hardhat,
    Ethereum,
    Sepolia,
    Base,
    BaseSepolia,
}

impl KnownNetwork {
    pub const ALL: [KnownNetwork; 5] = [
        KnownNetwork::Hardhat,
        KnownNetwork::Ethereum,
        KnownNetwork::Sepolia,
        KnownNetwork::Base,
        KnownNetwork::BaseSepolia,
    ];

    pub fn chain_id(&self) -> ChainId {
        match self {
            KnownNetwork::Hardhat => HARDHAT_CHAIN_ID,
            KnownNetwork::Ethereum => ETHEREUM_CHAIN_ID,
            KnownNetwork::Sepolia => SEPOLIA_CHAIN_ID,
            KnownNetwork::Base => BASE_CHAIN_ID,
            KnownNetwork::BaseSepolia => BASE_SEPOLIA_CHAIN_ID,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            KnownNetwork::Hardhat => "Hardhat",
            KnownNetwork::Ethereum => "Ethereum",
            KnownNetwork::Sepolia => "Sepolia",
            KnownNetwork::Base => "Base",
            KnownNetwork::BaseSepolia => "Base Sepolia",
        }
    }

    pub fn block_explorer(&self) -> Option<&'static str> {
        match self {
            KnownNetwork::Hardhat => None,
            KnownNetwork::Ethereum => Some("https://etherscan.io"),
            KnownNetwork::Sepolia => Some("https://sepolia.etherscan.io"),
            KnownNetwork::Base => Some("https://basescan.org"),
            KnownNetwork::BaseSepolia => Some("https://sepolia.basescan.org"),
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, KnownNetwork::Hardhat)
    }

    pub fn from_chain_id(chain_id: ChainId) -> Option<Self> {
        Self::ALL.into_iter().find(|network| network.chain_id() == chain_id)
    }
}

/// Display name for any chain id
pub fn chain_name(chain_id: ChainId) -> String {
    match KnownNetwork::from_chain_id(chain_id) {
        Some(network) => network.name().to_string(),
        None => format!("chain {}", chain_id),
    }
}

/// Network the wallet is on versus the one the deployment targets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkIdentity {
    pub current_chain_id: ChainId,
    pub expected_chain_id: ChainId,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NetworkStatus {
    Matched,
    Mismatched { current: ChainId, expected: ChainId },
}

impl NetworkIdentity {
    pub fn new(current_chain_id: ChainId, expected_chain_id: ChainId) -> Self {
        Self {
            current_chain_id,
            expected_chain_id,
        }
    }

    pub fn status(&self) -> NetworkStatus {
        if self.current_chain_id == self.expected_chain_id {
            NetworkStatus::Matched
        } else {
            NetworkStatus::Mismatched {
                current: self.current_chain_id,
                expected: self.expected_chain_id,
            }
        }
    }

    pub fn is_mismatched(&self) -> bool {
        self.status() != NetworkStatus::Matched
    }

    /// Banner text for the host, `None` when the networks match
    pub fn notice(&self) -> Option<String> {
        if !self.is_mismatched() {
            return None;
        }

        let expected = KnownNetwork::from_chain_id(self.expected_chain_id);
        let mut notice = if expected.is_some_and(|network| network.is_local()) {
            format!(
                "Target network is not localhost: you are on {}, this migration deploys to {}.",
                chain_name(self.current_chain_id),
                chain_name(self.expected_chain_id)
            )
        } else {
            format!(
                "You are on {}, this migration deploys to {}.",
                chain_name(self.current_chain_id),
                chain_name(self.expected_chain_id)
            )
        };

        if let Some(explorer) =
            KnownNetwork::from_chain_id(self.current_chain_id).and_then(|n| n.block_explorer())
        {
            notice.push_str(&format!(" Block explorer: {}", explorer));
        }
        Some(notice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_chain_ids() {
        assert_eq!(KnownNetwork::Hardhat.chain_id(), 31337);
        assert_eq!(KnownNetwork::BaseSepolia.chain_id(), 84532);
        assert_eq!(KnownNetwork::from_chain_id(8453), Some(KnownNetwork::Base));
        assert_eq!(KnownNetwork::from_chain_id(999), None);
    }

    #[test]
    fn test_chain_names() {
        assert_eq!(chain_name(1), "Ethereum");
        assert_eq!(chain_name(999), "chain 999");
    }

    #[test]
    fn test_matched_identity() {
        let identity = NetworkIdentity::new(31337, 31337);
        assert_eq!(identity.status(), NetworkStatus::Matched);
        assert!(!identity.is_mismatched());
        assert_eq!(identity.notice(), None);
    }

    #[test]
    fn test_mismatch_against_localhost() {
        let identity = NetworkIdentity::new(11155111, 31337);
        assert_eq!(
            identity.status(),
            NetworkStatus::Mismatched { current: 11155111, expected: 31337 }
        );
        let notice = identity.notice().expect("mismatch should produce a notice");
        assert!(notice.starts_with("Target network is not localhost"));
        assert!(notice.contains("Sepolia"));
        assert!(notice.contains("https://sepolia.etherscan.io"));
    }

    #[test]
    fn test_mismatch_against_remote() {
        let identity = NetworkIdentity::new(31337, 8453);
        let notice = identity.notice().expect("mismatch should produce a notice");
        assert_eq!(notice, "You are on Hardhat, this migration deploys to Base.");
    }
}
