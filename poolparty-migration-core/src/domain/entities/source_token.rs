//! Source token entity: one row of a migration request

use serde::Serialize;
use std::fmt;

use crate::shared::types::ChainId;
use crate::shared::validation::{is_address_well_formed, FieldError, ValidatedField};

/// Stable row identity, never reused within one collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RowId(pub u64);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row-{}", self.0)
    }
}

/// Why a row was left out of `sources`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExclusionReason {
    MissingAddress,
    MissingChainId,
    InvalidChainId(FieldError),
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionReason::MissingAddress => write!(f, "contract address is empty"),
            ExclusionReason::MissingChainId => write!(f, "chain id is empty"),
            ExclusionReason::InvalidChainId(error) => write!(f, "chain id: {}", error),
        }
    }
}

/// One legacy token whose balances will be migrated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceTokenEntry {
    id: RowId,
    address: String,
    chain_id: ValidatedField<ChainId>,
}

impl SourceTokenEntry {
    /// Create an entry with every field unset
    pub fn new(id: RowId) -> Self {
        Self {
            id,
            address: String::new(),
            chain_id: ValidatedField::new(),
        }
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn chain_id(&self) -> &ValidatedField<ChainId> {
        &self.chain_id
    }

    pub fn chain_id_value(&self) -> Option<ChainId> {
        self.chain_id.value()
    }

    pub fn chain_id_error(&self) -> Option<FieldError> {
        self.chain_id.error()
    }

    /// Copy of this entry with new address text
    pub fn with_address(&self, text: impl Into<String>) -> Self {
        Self {
            address: text.into(),
            ..self.clone()
        }
    }

    /// Copy of this entry with the chain id re-validated from `text`
    pub fn with_chain_id(&self, text: impl Into<String>) -> Self {
        Self {
            chain_id: ValidatedField::parse(text),
            ..self.clone()
        }
    }

    pub fn has_address(&self) -> bool {
        !self.address.trim().is_empty()
    }

    pub fn is_address_well_formed(&self) -> bool {
        is_address_well_formed(&self.address)
    }

    /// Nothing typed into the row yet
    pub fn is_untouched(&self) -> bool {
        !self.has_address() && self.chain_id.raw().trim().is_empty()
    }

    /// Address present and chain id parsed
    pub fn is_includable(&self) -> bool {
        self.has_address() && self.chain_id.is_valid()
    }

    /// Reason the row cannot be included, `None` when it can
    pub fn exclusion_reason(&self) -> Option<ExclusionReason> {
        if !self.has_address() {
            return Some(ExclusionReason::MissingAddress);
        }
        match (self.chain_id.value(), self.chain_id.error()) {
            (Some(_), _) => None,
            (None, Some(error)) => Some(ExclusionReason::InvalidChainId(error)),
            (None, None) => Some(ExclusionReason::MissingChainId),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_is_unset() {
        let entry = SourceTokenEntry::new(RowId(3));
        assert_eq!(entry.id(), RowId(3));
        assert_eq!(entry.address(), "");
        assert!(entry.chain_id().is_untouched());
        assert!(entry.is_untouched());
        assert!(!entry.is_includable());
    }

    #[test]
    fn test_with_chain_id_keeps_identity_and_address() {
        let entry = SourceTokenEntry::new(RowId(1)).with_address("0xABC");
        let updated = entry.with_chain_id("-4");

        assert_eq!(updated.id(), RowId(1));
        assert_eq!(updated.address(), "0xABC");
        assert_eq!(updated.chain_id().raw(), "-4");
        assert_eq!(updated.chain_id_error(), Some(FieldError::Negative));
        assert_eq!(updated.chain_id_value(), None);
        // the source row is untouched
        assert!(entry.chain_id().is_untouched());
    }

    #[test]
    fn test_exclusion_reasons() {
        let blank = SourceTokenEntry::new(RowId(0));
        assert_eq!(blank.exclusion_reason(), Some(ExclusionReason::MissingAddress));

        let no_chain = blank.with_address("0xABC");
        assert_eq!(no_chain.exclusion_reason(), Some(ExclusionReason::MissingChainId));

        let bad_chain = no_chain.with_chain_id("1.5");
        assert_eq!(
            bad_chain.exclusion_reason(),
            Some(ExclusionReason::InvalidChainId(FieldError::NotAnInteger))
        );

        let ok = no_chain.with_chain_id("1");
        assert_eq!(ok.exclusion_reason(), None);
        assert!(ok.is_includable());
    }

    #[test]
    fn test_whitespace_address_counts_as_empty() {
        let entry = SourceTokenEntry::new(RowId(0)).with_address("   ").with_chain_id("1");
        assert!(!entry.has_address());
        assert!(!entry.is_includable());
        assert!(!entry.is_untouched());
    }

    #[test]
    fn test_row_id_display() {
        assert_eq!(RowId(7).to_string(), "row-7");
    }
}
