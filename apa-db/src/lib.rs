//! In-memory SQLite dataset store for differential-expression records.
//!
//! The dataset is read once from CSV into an in-memory SQLite table and is
//! never written again. [`DatasetStore`] is a cheap handle (via `Rc`) that
//! is passed to every component that needs row lookups.
//!
//! # Usage
//!
//! ```rust
//! use apa_db::DatasetStore;
//!
//! let store = DatasetStore::from_csv(
//!     "pas_name,gene_name,log2FoldChange,padj,baseMean,Projection_Mean_TPM,Soma_Mean_TPM\n\
//!      A,G1,1.5,0.01,120.0,10.0,5.0\n",
//! )
//! .unwrap();
//!
//! let record = store.get_by_index(0).unwrap();
//! assert_eq!(record.gene_name, "G1");
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the SQL schema.

pub mod schema;
mod loader;
mod queries;
pub mod models;

use apa_core::error::DashError;
use rusqlite::Connection;
use std::rc::Rc;

/// Read-only dataset handle backed by an in-memory SQLite database.
///
/// Cloning shares the same connection. There is no mutating method: rows
/// are inserted by the `from_*` constructors and only read afterwards.
#[derive(Clone)]
pub struct DatasetStore {
    conn: Rc<Connection>,
    len: usize,
}

impl DatasetStore {
    /// Number of source row positions; click indices must fall below this.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

pub(crate) fn storage_error(err: rusqlite::Error) -> DashError {
    DashError::Storage(err.to_string())
}

#[cfg(test)]
pub(crate) mod fixtures {
    /// Three rows: two sites of G1, one of G2.
    pub const THREE_ROWS: &str = "\
pas_name,gene_name,log2FoldChange,padj,baseMean,Projection_Mean_TPM,Soma_Mean_TPM
A,G1,1.5,0.01,120.0,10,5
B,G1,-0.7,0.2,45.5,3,7
C,G2,0.1,0.9,8.25,1,1
";
}
