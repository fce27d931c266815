//! Row collection for source tokens
//!
//! Rows are addressed by index, the way the form renders them, and carry a
//! stable [`RowId`] so hosts can key their widgets on identity. Every
//! mutation is copy-on-write: a [`RowCollection::snapshot`] taken before an
//! edit keeps seeing the old rows.

use std::sync::Arc;

use crate::domain::entities::{RowId, SourceTokenEntry};
use crate::shared::error::MigrationError;
use crate::shared::types::MigrationResult;

#[derive(Debug, Clone)]
pub struct RowCollection {
    rows: Arc<Vec<SourceTokenEntry>>,
    next_id: u64,
}

impl RowCollection {
    /// Create a collection holding one empty row
    pub fn new() -> Self {
        Self {
            rows: Arc::new(vec![SourceTokenEntry::new(RowId(0))]),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false; the last row cannot be removed
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[SourceTokenEntry] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&SourceTokenEntry> {
        self.rows.get(index)
    }

    pub fn position(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|row| row.id() == id)
    }

    /// Immutable view of the current rows
    pub fn snapshot(&self) -> Arc<Vec<SourceTokenEntry>> {
        Arc::clone(&self.rows)
    }

    /// Append an empty row
    pub fn add_row(&mut self) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        Arc::make_mut(&mut self.rows).push(SourceTokenEntry::new(id));
        log::debug!("Added source row {} ({} rows)", id, self.rows.len());
        id
    }

    /// Remove the row at `index`.
    ///
    /// Returns `Ok(false)` without touching anything when only one row is
    /// left.
    pub fn remove_row(&mut self, index: usize) -> MigrationResult<bool> {
        if self.rows.len() <= 1 {
            return Ok(false);
        }
        self.check_index(index)?;

        let removed = Arc::make_mut(&mut self.rows).remove(index);
        log::debug!("Removed source row {} ({} rows)", removed.id(), self.rows.len());
        Ok(true)
    }

    pub fn remove_row_by_id(&mut self, id: RowId) -> MigrationResult<bool> {
        match self.position(id) {
            Some(index) => self.remove_row(index),
            None => Err(MigrationError::validation(format!("Unknown source row {}", id))),
        }
    }

    pub fn update_address(&mut self, index: usize, text: impl Into<String>) -> MigrationResult<()> {
        let text = text.into();
        self.replace(index, |row| row.with_address(text))
    }

    /// Re-validate the chain id of the row at `index`
    pub fn update_chain_id(&mut self, index: usize, text: impl Into<String>) -> MigrationResult<()> {
        let text = text.into();
        self.replace(index, |row| row.with_chain_id(text))
    }

    fn replace(
        &mut self,
        index: usize,
        update: impl FnOnce(&SourceTokenEntry) -> SourceTokenEntry,
    ) -> MigrationResult<()> {
        self.check_index(index)?;
        let next = update(&self.rows[index]);
        Arc::make_mut(&mut self.rows)[index] = next;
        Ok(())
    }

    fn check_index(&self, index: usize) -> MigrationResult<()> {
        if index >= self.rows.len() {
            return Err(MigrationError::row_not_found(index, self.rows.len()));
        }
        Ok(())
    }
}

impl Default for RowCollection {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::FieldError;

    #[test]
    fn test_starts_with_one_empty_row() {
        let rows = RowCollection::new();
        assert_eq!(rows.len(), 1);
        assert!(!rows.is_empty());
        assert!(rows.rows()[0].is_untouched());
    }

    #[test]
    fn test_add_rows_are_unset() {
        let mut rows = RowCollection::new();
        let initial = rows.len();
        let first = rows.add_row();
        let second = rows.add_row();

        assert_eq!(rows.len(), initial + 2);
        assert_ne!(first, second);
        for row in &rows.rows()[initial..] {
            assert_eq!(row.address(), "");
            assert!(row.chain_id().is_untouched());
        }
    }

    #[test]
    fn test_remove_last_row_is_noop() {
        let mut rows = RowCollection::new();
        rows.update_address(0, "0xABC").expect("Failed to update address");

        assert_eq!(rows.remove_row(0), Ok(false));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.rows()[0].address(), "0xABC");
    }

    #[test]
    fn test_remove_shifts_indices_and_keeps_ids() {
        let mut rows = RowCollection::new();
        let middle = rows.add_row();
        let last = rows.add_row();
        rows.update_address(2, "0xLAST").expect("Failed to update address");

        assert_eq!(rows.remove_row(0), Ok(true));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows.rows()[0].id(), middle);
        assert_eq!(rows.rows()[1].id(), last);
        assert_eq!(rows.rows()[1].address(), "0xLAST");
        assert_eq!(rows.position(last), Some(1));
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut rows = RowCollection::new();
        let added = rows.add_row();
        rows.remove_row(1).expect("Failed to remove row");
        let again = rows.add_row();
        assert_ne!(added, again);
    }

    #[test]
    fn test_remove_by_id() {
        let mut rows = RowCollection::new();
        let id = rows.add_row();
        assert_eq!(rows.remove_row_by_id(id), Ok(true));
        assert_eq!(rows.position(id), None);
        assert!(rows.remove_row_by_id(id).is_err());
    }

    #[test]
    fn test_out_of_range_index() {
        let mut rows = RowCollection::new();
        rows.add_row();
        assert_eq!(
            rows.update_chain_id(5, "1"),
            Err(MigrationError::RowNotFound { index: 5, len: 2 })
        );
        assert_eq!(rows.remove_row(2), Err(MigrationError::RowNotFound { index: 2, len: 2 }));
    }

    #[test]
    fn test_update_chain_id_stores_triple() {
        let mut rows = RowCollection::new();
        rows.update_chain_id(0, "abc").expect("Failed to update chain id");
        let row = &rows.rows()[0];
        assert_eq!(row.chain_id().raw(), "abc");
        assert_eq!(row.chain_id_value(), None);
        assert_eq!(row.chain_id_error(), Some(FieldError::NotANumber));

        rows.update_chain_id(0, "137").expect("Failed to update chain id");
        let row = &rows.rows()[0];
        assert_eq!(row.chain_id_value(), Some(137));
        assert_eq!(row.chain_id_error(), None);
    }

    #[test]
    fn test_snapshot_is_unaffected_by_edits() {
        let mut rows = RowCollection::new();
        rows.update_address(0, "0xOLD").expect("Failed to update address");
        let snapshot = rows.snapshot();

        rows.update_address(0, "0xNEW").expect("Failed to update address");
        rows.add_row();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].address(), "0xOLD");
        assert_eq!(rows.rows()[0].address(), "0xNEW");
    }
}
