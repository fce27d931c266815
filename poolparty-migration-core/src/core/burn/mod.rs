//! Burn draft for migrating coins into a deployed pool party

use crate::domain::entities::BurnIntent;
use crate::shared::error::MigrationError;
use crate::shared::types::{MigrationResult, TokenAmount};
use crate::shared::utils::checksum_address;
use crate::shared::validation::{is_address_well_formed, ValidatedField};

/// Raw inputs of the migrate form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BurnDraft {
    contract: String,
    amount: ValidatedField<TokenAmount>,
}

impl BurnDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contract(&self) -> &str {
        &self.contract
    }

    pub fn amount(&self) -> &ValidatedField<TokenAmount> {
        &self.amount
    }

    pub fn update_contract(&mut self, text: impl Into<String>) {
        self.contract = text.into();
    }

    pub fn update_amount(&mut self, text: impl Into<String>) {
        self.amount = ValidatedField::parse(text);
    }

    pub fn is_contract_well_formed(&self) -> bool {
        is_address_well_formed(self.contract.trim())
    }

    /// Turn the draft into something a wallet can sign; the contract comes
    /// back in checksum form
    pub fn to_intent(&self) -> MigrationResult<BurnIntent> {
        let contract = self.contract.trim();
        if !is_address_well_formed(contract) {
            return Err(MigrationError::validation(format!(
                "Invalid party contract address: {:?}",
                contract
            )));
        }

        if let Some(error) = self.amount.error() {
            return Err(MigrationError::validation(format!("Invalid amount: {}", error)));
        }
        match self.amount.value() {
            Some(amount) if amount > 0 => Ok(BurnIntent {
                contract: checksum_address(contract)?,
                amount,
            }),
            Some(_) => Err(MigrationError::validation("Amount must be greater than zero")),
            None => Err(MigrationError::validation("Amount is required")),
        }
    }
}
