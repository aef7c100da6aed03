//! Command handlers.
//!
//! Each submodule implements the commands for one area. Mutating handlers
//! receive a [`MutationCtx`], which threads the device id, the oplog counter
//! and pending events through the open transaction.

pub mod notes;
pub mod scratch;
pub mod tabs;

use std::collections::VecDeque;

use nook_db::queries::{meta, nodes, oplog, tabs as tab_rows};
use nook_db::{Table, TxScope};
use nook_types::{NotesEvent, OpType, OplogEntry, OplogState, Tab};
use rusqlite::Connection;

use crate::{Result, ServiceOptions};

/// Milliseconds since the Unix epoch.
pub(crate) fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Random 128-bit hex identifier.
pub(crate) fn new_id() -> String {
    let mut id = [0u8; 16];
    rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut id);
    hex::encode(id)
}

/// State carried through one read-write transaction.
pub struct MutationCtx<'s, 'c> {
    tx: &'s TxScope<'c>,
    options: &'s ServiceOptions,
    device_id: Option<String>,
    events: Vec<NotesEvent>,
}

impl<'s, 'c> MutationCtx<'s, 'c> {
    pub(crate) fn new(tx: &'s TxScope<'c>, options: &'s ServiceOptions) -> Self {
        Self {
            tx,
            options,
            device_id: None,
            events: Vec::new(),
        }
    }

    pub(crate) fn options(&self) -> &ServiceOptions {
        self.options
    }

    pub(crate) fn read(&self, table: Table) -> Result<&'s Connection> {
        let tx: &'s TxScope<'c> = self.tx;
        Ok(tx.read(table)?)
    }

    pub(crate) fn write(&self, table: Table) -> Result<&'s Connection> {
        let tx: &'s TxScope<'c> = self.tx;
        Ok(tx.write(table)?)
    }

    /// Device id, generated and persisted on first use.
    pub(crate) fn device_id(&mut self) -> Result<String> {
        if let Some(id) = &self.device_id {
            return Ok(id.clone());
        }
        let conn = self.write(Table::Meta)?;
        let id = match meta::get(conn, meta::DEVICE_ID)? {
            Some(id) => id,
            None => {
                let id = new_id();
                meta::set(conn, meta::DEVICE_ID, &id)?;
                tracing::info!(device_id = %id, "generated device id");
                id
            }
        };
        self.device_id = Some(id.clone());
        Ok(id)
    }

    /// Append one oplog entry for the mutation in progress.
    pub(crate) fn log(&mut self, op_type: OpType, payload: serde_json::Value) -> Result<u64> {
        let device_id = self.device_id()?;
        let seq = meta::next_oplog_seq(self.write(Table::Meta)?)?;
        oplog::append(
            self.write(Table::Oplog)?,
            &OplogEntry {
                seq,
                op_id: new_id(),
                device_id,
                ts: now_millis(),
                op_type,
                payload,
                state: OplogState::PendingIndex,
            },
        )?;
        Ok(seq)
    }

    /// Increment a tab's revision and queue the matching event.
    pub(crate) fn bump(&mut self, tab_id: &str) -> Result<u64> {
        let rev = tab_rows::bump_rev(self.write(Table::Tabs)?, tab_id)?;
        self.events.push(NotesEvent::RevisionBump {
            tab_id: tab_id.to_string(),
            rev,
        });
        Ok(rev)
    }

    pub(crate) fn tabs_changed(&mut self) {
        if !self.events.contains(&NotesEvent::TabsChanged) {
            self.events.push(NotesEvent::TabsChanged);
        }
    }

    /// Oldest tab, creating one named after `default_tab_name` if none exist.
    pub(crate) fn default_tab(&mut self) -> Result<Tab> {
        if let Some(tab) = tab_rows::oldest(self.read(Table::Tabs)?)? {
            return Ok(tab);
        }
        let name = self.options.default_tab_name.clone();
        tabs::insert_tab(self, name)
    }

    pub(crate) fn into_events(self) -> Vec<NotesEvent> {
        self.events
    }
}

/// Every note in the subtree rooted at `root_id`, root first, breadth-first.
///
/// Uses an explicit queue so deep hierarchies cannot exhaust the stack.
pub(crate) fn subtree_ids(conn: &Connection, tab_id: &str, root_id: &str) -> Result<Vec<String>> {
    let mut ids = Vec::new();
    let mut queue = VecDeque::from([root_id.to_string()]);
    while let Some(id) = queue.pop_front() {
        queue.extend(nodes::child_ids(conn, tab_id, &id)?);
        ids.push(id);
    }
    Ok(ids)
}
