//! Burn intent entity for migrating coins into a deployed pool party

use serde::{Deserialize, Serialize};

use crate::shared::types::{Address, TokenAmount};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnIntent {
    pub contract: Address,
    pub amount: TokenAmount,
}
