//! Migration request payload handed to the deployment operation
//!
//! Field names and JSON types are the contract with the deployer and must
//! not change: integers stay numbers, `sources` keeps row order.

use serde::{Deserialize, Serialize};

use crate::shared::error::MigrationError;
use crate::shared::types::{Address, ChainId, Decimals, Identifier, TokenAmount};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceToken {
    pub address: Address,
    pub chain_id: ChainId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub total_supply: TokenAmount,
    pub decimals: Decimals,
    pub name: String,
    pub symbol: String,
    pub is_ownable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationRequest {
    pub sources: Vec<SourceToken>,
    pub identifier: Identifier,
    pub token_info: TokenInfo,
}

impl MigrationRequest {
    /// JSON text of the payload
    pub fn to_json(&self) -> Result<String, MigrationError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, MigrationError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn sample_request() -> MigrationRequest {
        MigrationRequest {
            sources: vec![
                SourceToken { address: "0xABC".to_string(), chain_id: 1 },
                SourceToken { address: "0xDEF".to_string(), chain_id: 8453 },
            ],
            identifier: "pool-party-1".to_string(),
            token_info: TokenInfo {
                total_supply: 1_000,
                decimals: 18,
                name: "Pool Party".to_string(),
                symbol: "POOL".to_string(),
                is_ownable: true,
            },
        }
    }

    #[test]
    fn test_payload_shape() {
        let json = sample_request().to_json().expect("Failed to serialize request");
        let value: Value = serde_json::from_str(&json).expect("Failed to parse request JSON");

        assert_eq!(
            value,
            json!({
                "sources": [
                    { "address": "0xABC", "chainId": 1 },
                    { "address": "0xDEF", "chainId": 8453 }
                ],
                "identifier": "pool-party-1",
                "tokenInfo": {
                    "totalSupply": 1000,
                    "decimals": 18,
                    "name": "Pool Party",
                    "symbol": "POOL",
                    "isOwnable": true
                }
            })
        );
    }

    #[test]
    fn test_large_supply_stays_numeric() {
        let mut request = sample_request();
        request.token_info.total_supply = 10u128.pow(27);

        let json = request.to_json().expect("Failed to serialize request");
        assert!(json.contains("\"totalSupply\":1000000000000000000000000000"));

        let parsed = MigrationRequest::from_json(&json).expect("Failed to parse request");
        assert_eq!(parsed, request);
    }

    #[test]
    fn test_rejects_string_chain_id() {
        let json = r#"{"sources":[{"address":"0xABC","chainId":"1"}],"identifier":"x",
            "tokenInfo":{"totalSupply":0,"decimals":0,"name":"","symbol":"","isOwnable":false}}"#;
        assert!(matches!(
            MigrationRequest::from_json(json),
            Err(MigrationError::Validation(_))
        ));
    }
}
