//! Table-scoped transactions.
//!
//! A handler declares the tables it touches and whether it writes. It gets a
//! [`TxScope`] that only hands out a connection for those tables. Returning
//! `Ok` commits; returning `Err` drops the transaction, which rolls it back.
//!
//! Read-write transactions start `IMMEDIATE`, so SQLite admits one writer at
//! a time and a handler's reads see no concurrent commits before its own.

use rusqlite::{Connection, Transaction, TransactionBehavior};
use tracing::debug;

use crate::{DbError, Result};

/// Every table in the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Meta,
    Tabs,
    Nodes,
    Chunks,
    Oplog,
    Tasks,
    Backups,
    SearchIndex,
}

impl Table {
    pub fn name(self) -> &'static str {
        match self {
            Self::Meta => "meta",
            Self::Tabs => "tabs",
            Self::Nodes => "nodes",
            Self::Chunks => "chunks",
            Self::Oplog => "oplog",
            Self::Tasks => "tasks",
            Self::Backups => "backups",
            Self::SearchIndex => "search_index",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxMode {
    ReadOnly,
    ReadWrite,
}

/// Access to the tables declared for one transaction.
pub struct TxScope<'c> {
    tx: Transaction<'c>,
    tables: Vec<Table>,
    mode: TxMode,
}

impl<'c> TxScope<'c> {
    /// Connection for reading `table`.
    pub fn read(&self, table: Table) -> Result<&Connection> {
        if !self.tables.contains(&table) {
            return Err(DbError::TableNotInScope(table.name()));
        }
        Ok(&*self.tx)
    }

    /// Connection for writing `table`.
    pub fn write(&self, table: Table) -> Result<&Connection> {
        let conn = self.read(table)?;
        if self.mode == TxMode::ReadOnly {
            return Err(DbError::ReadOnly(table.name()));
        }
        Ok(conn)
    }
}

/// Run `handler` inside one transaction spanning `tables`.
///
/// The handler's error type only needs to absorb [`DbError`], so command
/// layers can use their own error enums and still abort with `?`.
pub fn run_transaction<T, E, F>(
    conn: &mut Connection,
    tables: &[Table],
    mode: TxMode,
    handler: F,
) -> std::result::Result<T, E>
where
    F: FnOnce(&TxScope<'_>) -> std::result::Result<T, E>,
    E: From<DbError>,
{
    let behavior = match mode {
        TxMode::ReadOnly => TransactionBehavior::Deferred,
        TxMode::ReadWrite => TransactionBehavior::Immediate,
    };
    let tx = conn
        .transaction_with_behavior(behavior)
        .map_err(DbError::from)?;
    let scope = TxScope {
        tx,
        tables: tables.to_vec(),
        mode,
    };

    match handler(&scope) {
        Ok(value) => {
            scope.tx.commit().map_err(DbError::from)?;
            Ok(value)
        }
        Err(e) => {
            debug!(?tables, "transaction rolled back");
            Err(e)
        }
    }
}
