//! New token parameters entity

use serde::Serialize;

use crate::domain::entities::migration_request::TokenInfo;
use crate::shared::constants::{DEFAULT_DECIMALS, DEFAULT_IS_OWNABLE, DEFAULT_TOTAL_SUPPLY};
use crate::shared::types::{Decimals, TokenAmount};
use crate::shared::validation::{FieldError, ValidatedField};

/// One edit to the new token parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewTokenField {
    Name(String),
    Symbol(String),
    Decimals(String),
    Supply(String),
    Ownable(bool),
    LogicRef(String),
}

/// Integer fields of the new token, used to label field errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NewTokenFieldName {
    Decimals,
    Supply,
}

/// Parameters describing the token created by the migration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTokenParameters {
    name: String,
    symbol: String,
    decimals: ValidatedField<Decimals>,
    supply: ValidatedField<TokenAmount>,
    is_ownable: bool,
    contract_logic_ref: String,
}

impl NewTokenParameters {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            symbol: String::new(),
            decimals: ValidatedField::new(),
            supply: ValidatedField::new(),
            is_ownable: DEFAULT_IS_OWNABLE,
            contract_logic_ref: String::new(),
        }
    }

    /// Apply one field edit, re-validating integer fields
    pub fn apply(&mut self, field: NewTokenField) {
        match field {
            NewTokenField::Name(name) => self.name = name,
            NewTokenField::Symbol(symbol) => self.symbol = symbol,
            NewTokenField::Decimals(raw) => self.decimals = ValidatedField::parse(raw),
            NewTokenField::Supply(raw) => self.supply = ValidatedField::parse(raw),
            NewTokenField::Ownable(is_ownable) => self.is_ownable = is_ownable,
            NewTokenField::LogicRef(reference) => self.contract_logic_ref = reference,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn decimals(&self) -> &ValidatedField<Decimals> {
        &self.decimals
    }

    pub fn supply(&self) -> &ValidatedField<TokenAmount> {
        &self.supply
    }

    pub fn is_ownable(&self) -> bool {
        self.is_ownable
    }

    pub fn contract_logic_ref(&self) -> Option<&str> {
        let reference = self.contract_logic_ref.trim();
        (!reference.is_empty()).then_some(reference)
    }

    /// Name and symbol both filled in
    pub fn has_identity(&self) -> bool {
        !self.name.trim().is_empty() && !self.symbol.trim().is_empty()
    }

    pub fn field_errors(&self) -> Vec<(NewTokenFieldName, FieldError)> {
        let mut errors = Vec::new();
        if let Some(error) = self.decimals.error() {
            errors.push((NewTokenFieldName::Decimals, error));
        }
        if let Some(error) = self.supply.error() {
            errors.push((NewTokenFieldName::Supply, error));
        }
        errors
    }

    /// Integer fields currently holding an error
    pub fn invalid_fields(&self) -> Vec<NewTokenFieldName> {
        self.field_errors().into_iter().map(|(name, _)| name).collect()
    }

    /// Payload form, unset fields replaced by their defaults.
    ///
    /// Fields holding an error have no value either; callers check
    /// [`invalid_fields`](Self::invalid_fields) first.
    pub fn to_token_info(&self) -> TokenInfo {
        TokenInfo {
            total_supply: self.supply.value_or(DEFAULT_TOTAL_SUPPLY),
            decimals: self.decimals.value_or(DEFAULT_DECIMALS),
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            is_ownable: self.is_ownable,
        }
    }
}

impl Default for NewTokenParameters {
    fn default() -> Self {
        Self::new()
    }
}
