//! # Sale journal
//!
//! A sale touches two files: the catalog (stock goes down) and the sales list
//! (one record appended). Neither write alone is safe to stop after, so a
//! commit first writes the finished outcome of both into `sale.journal`, then
//! applies it, then removes the journal.
//!
//! ## Crash windows
//! - Before the journal is on disk: nothing changed.
//! - After: [`SaleJournal::recover`] replays the entry. Replaying is
//!   idempotent, the catalog is overwritten with the journaled snapshot and
//!   the sale is only appended when its id is missing.
//!
//! The journal itself lands through temp file + rename, so an unreadable
//! journal was damaged after the fact. [`SaleJournal::recover`] reports it and
//! leaves the file in place for an operator to inspect.
use std::{fs, io};

use serde::{Deserialize, Serialize};

use crate::{DataFiles, error::RecordsError, products::Product, sales::Sale, write_json};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct JournalEntry {
    products: Vec<Product>,
    sale: Sale,
}

pub struct SaleJournal<'a> {
    files: &'a DataFiles,
}

impl<'a> SaleJournal<'a> {
    pub fn new(files: &'a DataFiles) -> Self {
        Self { files }
    }

    pub fn is_pending(&self) -> bool {
        self.files.journal().exists()
    }

    /// Persists a checkout outcome: the decremented catalog and the new sale.
    pub fn commit(&self, products: &[Product], sale: &Sale) -> Result<(), RecordsError> {
        let entry = JournalEntry {
            products: products.to_vec(),
            sale: sale.clone(),
        };

        write_json(&self.files.journal(), &entry)?;
        self.apply(&entry)?;
        self.clear()
    }

    /// Replays a journal left behind by an interrupted commit. Returns the
    /// sale that was completed, if any.
    pub fn recover(&self) -> Result<Option<Sale>, RecordsError> {
        let path = self.files.journal();

        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(RecordsError::Io { path, source }),
        };

        let entry: JournalEntry =
            serde_json::from_slice(&data).map_err(|source| RecordsError::Json { path, source })?;

        self.apply(&entry)?;
        self.clear()?;

        Ok(Some(entry.sale))
    }

    fn apply(&self, entry: &JournalEntry) -> Result<(), RecordsError> {
        self.files.write_products(&entry.products)?;

        let mut sales = self.files.read_sales()?;
        if sales.iter().all(|sale| sale.id != entry.sale.id) {
            sales.push(entry.sale.clone());
            self.files.write_sales(&sales)?;
        }

        Ok(())
    }

    fn clear(&self) -> Result<(), RecordsError> {
        let path = self.files.journal();

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(RecordsError::Io { path, source }),
        }
    }
}
