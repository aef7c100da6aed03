//! # nook-service
//!
//! The notes service: every command runs as one atomic SQLite transaction
//! spanning the tables it touches.
//!
//! ```text
//! invoke -> open transaction -> handler -> commit -> bump rev -> broadcast
//!                                       \-> abort  -> error
//! ```
//!
//! Revision bumps and oplog appends happen inside the same transaction as
//! the mutation they describe. Events are published only after commit, so a
//! listener that re-fetches on `revision-bump` always sees the new state.
//!
//! ## Modules
//!
//! - [`command`]: typed commands, results, and the response envelope.
//! - [`commands`]: one handler per command.
//! - [`events`]: broadcast bus for change events.
//! - [`client`]: in-process request and subscribe entry point.

pub mod client;
pub mod command;
pub mod commands;
pub mod error;
pub mod events;
mod ordering;

use std::sync::Arc;

use nook_db::queries::oplog;
use nook_db::{run_transaction, Table, TxMode, TxScope};
use nook_types::{OplogEntry, OplogState};
use rusqlite::Connection;
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub use client::{ClientError, NotesClient, Subscription};
pub use command::{Command, Response};
pub use error::{NotesError, Result};
pub use events::{EventBus, EventFilter};

use crate::commands::MutationCtx;

/// Tunables for the notes service.
#[derive(Debug, Clone)]
pub struct ServiceOptions {
    /// Characters per stored chunk. Write-time only.
    pub chunk_size: usize,
    /// Maximum preview length in characters.
    pub preview_limit: usize,
    /// Name of the tab created when none exist.
    pub default_tab_name: String,
    /// Title for notes whose text has no non-blank line.
    pub untitled_title: String,
    /// Title for new scratch notes.
    pub scratch_title: String,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            chunk_size: nook_text::DEFAULT_CHUNK_SIZE,
            preview_limit: 200,
            default_tab_name: "Notes".to_string(),
            untitled_title: "Untitled".to_string(),
            scratch_title: "Scratch".to_string(),
        }
    }
}

/// The notes service.
pub struct NotesService {
    db: Arc<Mutex<Connection>>,
    options: ServiceOptions,
    events: EventBus,
}

impl NotesService {
    pub fn new(conn: Connection, options: ServiceOptions, events: EventBus) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            options,
            events,
        }
    }

    /// Service over a fresh in-memory database (for testing).
    pub fn open_memory(options: ServiceOptions) -> Result<Self> {
        let conn = nook_db::open_memory()?;
        Ok(Self::new(conn, options, EventBus::new(1000)))
    }

    pub fn options(&self) -> &ServiceOptions {
        &self.options
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Run a read-only handler over `tables`.
    pub async fn read<T, F>(&self, tables: &[Table], handler: F) -> Result<T>
    where
        F: FnOnce(&TxScope<'_>) -> Result<T>,
    {
        let mut conn = self.db.lock().await;
        run_transaction(&mut conn, tables, TxMode::ReadOnly, handler)
    }

    /// Run a mutating handler, then publish the events it queued.
    ///
    /// Events go out before the connection lock is released, so listeners
    /// see each tab's revisions in commit order.
    pub(crate) async fn mutate<T, F>(&self, tables: &[Table], handler: F) -> Result<T>
    where
        F: FnOnce(&mut MutationCtx<'_, '_>) -> Result<T>,
    {
        let mut conn = self.db.lock().await;
        let (value, events) = run_transaction(&mut conn, tables, TxMode::ReadWrite, |tx| {
            let mut ctx = MutationCtx::new(tx, &self.options);
            let value = handler(&mut ctx)?;
            Ok::<_, NotesError>((value, ctx.into_events()))
        })?;

        for event in events {
            self.events.emit(event);
        }
        drop(conn);
        Ok(value)
    }

    /// Oplog entries after `after_seq`, oldest first.
    pub async fn oplog_since(&self, after_seq: u64, limit: u32) -> Result<Vec<OplogEntry>> {
        self.read(&[Table::Oplog], |tx| {
            Ok(oplog::list_since(tx.read(Table::Oplog)?, after_seq, limit)?)
        })
        .await
    }

    /// Record that a downstream consumer has indexed entry `seq`.
    pub async fn mark_indexed(&self, seq: u64) -> Result<bool> {
        let mut conn = self.db.lock().await;
        run_transaction(&mut conn, &[Table::Oplog], TxMode::ReadWrite, |tx| {
            Ok(oplog::set_state(tx.write(Table::Oplog)?, seq, OplogState::Indexed)?)
        })
    }

    /// Execute one typed command and serialize its result.
    pub async fn execute(&self, command: Command) -> Result<serde_json::Value> {
        debug!(command = command.name(), "executing command");
        let value = match command {
            Command::Init => serde_json::to_value(commands::tabs::init(self).await?)?,
            Command::ListTabs => serde_json::to_value(commands::tabs::list_tabs(self).await?)?,
            Command::CreateTab(p) => {
                serde_json::to_value(commands::tabs::create_tab(self, p).await?)?
            }
            Command::RenameTab(p) => {
                serde_json::to_value(commands::tabs::rename_tab(self, p).await?)?
            }
            Command::UpdateTabPrefs(p) => {
                serde_json::to_value(commands::tabs::update_tab_prefs(self, p).await?)?
            }
            Command::DeleteTab(p) => {
                serde_json::to_value(commands::tabs::delete_tab(self, p).await?)?
            }
            Command::CreateNote(p) => {
                serde_json::to_value(commands::notes::create_note(self, p).await?)?
            }
            Command::GetNote(p) => serde_json::to_value(commands::notes::get_note(self, p).await?)?,
            Command::ListChildren(p) => {
                serde_json::to_value(commands::notes::list_children(self, p).await?)?
            }
            Command::UpdateNoteText(p) => {
                serde_json::to_value(commands::notes::update_note_text(self, p).await?)?
            }
            Command::MoveNote(p) => {
                serde_json::to_value(commands::notes::move_note(self, p).await?)?
            }
            Command::DeleteNote(p) => {
                serde_json::to_value(commands::notes::delete_note(self, p).await?)?
            }
            Command::GetOrCreateScratch(p) => {
                serde_json::to_value(commands::scratch::get_or_create_scratch(self, p).await?)?
            }
        };
        Ok(value)
    }

    /// Execute a command and wrap the outcome in the response envelope.
    pub async fn dispatch(&self, command: Command) -> Response {
        let name = command.name();
        match self.execute(command).await {
            Ok(value) => Response::success(value),
            Err(e) => {
                warn!(command = name, error = %e, "command failed");
                Response::failure(e.to_string())
            }
        }
    }

    /// Parse a raw `{command, payload}` request and dispatch it.
    pub async fn handle_request(&self, request: serde_json::Value) -> Response {
        match Command::from_request(request) {
            Ok(command) => self.dispatch(command).await,
            Err(e) => {
                warn!(error = %e, "rejected malformed request");
                Response::failure(NotesError::InvalidParams(e.to_string()).to_string())
            }
        }
    }
}
