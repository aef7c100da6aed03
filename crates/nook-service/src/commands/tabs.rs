//! Tab commands: init, list, create, rename, prefs, delete.

use nook_db::queries::{chunks, nodes, tabs};
use nook_db::Table;
use nook_types::{OpType, Tab};
use serde_json::json;
use tracing::info;

use super::{new_id, now_millis, MutationCtx};
use crate::command::{
    CreateTabParams, DeletedTab, InitResult, RenameTabParams, TabRef, UpdateTabPrefsParams,
};
use crate::{NotesError, NotesService, Result};

const TAB_WRITE: &[Table] = &[Table::Meta, Table::Tabs, Table::Oplog];

fn check_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(NotesError::InvalidParams("tab name must not be blank".to_string()));
    }
    Ok(())
}

/// Insert a tab at `rev = 0` and log it.
pub(crate) fn insert_tab(ctx: &mut MutationCtx<'_, '_>, name: String) -> Result<Tab> {
    check_name(&name)?;
    let now = now_millis();
    let tab = Tab {
        tab_id: new_id(),
        name,
        created_at: now,
        updated_at: now,
        rev: 0,
        ui_prefs: serde_json::Map::new(),
    };
    tabs::insert(ctx.write(Table::Tabs)?, &tab)?;
    ctx.log(
        OpType::CreateTab,
        json!({ "tabId": tab.tab_id, "name": tab.name }),
    )?;
    ctx.tabs_changed();
    info!(tab_id = %tab.tab_id, name = %tab.name, "created tab");
    Ok(tab)
}

/// Ensure a device id and a tab exist.
pub async fn init(svc: &NotesService) -> Result<InitResult> {
    svc.mutate(TAB_WRITE, |ctx| {
        let device_id = ctx.device_id()?;
        let tab = ctx.default_tab()?;
        Ok(InitResult {
            device_id,
            default_tab_id: tab.tab_id,
        })
    })
    .await
}

/// All tabs, oldest first.
pub async fn list_tabs(svc: &NotesService) -> Result<Vec<Tab>> {
    svc.read(&[Table::Tabs], |tx| Ok(tabs::list(tx.read(Table::Tabs)?)?))
        .await
}

pub async fn create_tab(svc: &NotesService, params: CreateTabParams) -> Result<Tab> {
    svc.mutate(TAB_WRITE, |ctx| insert_tab(ctx, params.name))
        .await
}

pub async fn rename_tab(svc: &NotesService, params: RenameTabParams) -> Result<Tab> {
    check_name(&params.name)?;
    svc.mutate(TAB_WRITE, |ctx| {
        let conn = ctx.write(Table::Tabs)?;
        if !tabs::rename(conn, &params.tab_id, &params.name, now_millis())? {
            return Err(NotesError::tab_not_found(&params.tab_id));
        }
        ctx.log(
            OpType::RenameTab,
            json!({ "tabId": params.tab_id, "name": params.name }),
        )?;
        ctx.bump(&params.tab_id)?;
        fetch(ctx, &params.tab_id)
    })
    .await
}

pub async fn update_tab_prefs(svc: &NotesService, params: UpdateTabPrefsParams) -> Result<Tab> {
    svc.mutate(TAB_WRITE, |ctx| {
        let conn = ctx.write(Table::Tabs)?;
        if !tabs::set_ui_prefs(conn, &params.tab_id, &params.ui_prefs, now_millis())? {
            return Err(NotesError::tab_not_found(&params.tab_id));
        }
        ctx.log(
            OpType::UpdateTabPrefs,
            json!({ "tabId": params.tab_id, "uiPrefs": params.ui_prefs }),
        )?;
        ctx.bump(&params.tab_id)?;
        fetch(ctx, &params.tab_id)
    })
    .await
}

/// Delete a tab with every note and chunk in it. The last tab cannot go.
pub async fn delete_tab(svc: &NotesService, params: TabRef) -> Result<DeletedTab> {
    let tables = [
        Table::Meta,
        Table::Tabs,
        Table::Nodes,
        Table::Chunks,
        Table::Oplog,
    ];
    svc.mutate(&tables, |ctx| {
        let tab_conn = ctx.write(Table::Tabs)?;
        if tabs::get(tab_conn, &params.tab_id)?.is_none() {
            return Err(NotesError::tab_not_found(&params.tab_id));
        }
        if tabs::count(tab_conn)? <= 1 {
            return Err(NotesError::InvariantViolation(
                "cannot delete the last tab".to_string(),
            ));
        }

        let ids = nodes::ids_by_tab(ctx.read(Table::Nodes)?, &params.tab_id)?;
        for id in &ids {
            chunks::delete_for_note(ctx.write(Table::Chunks)?, id)?;
            nodes::delete(ctx.write(Table::Nodes)?, id)?;
        }
        tabs::delete(tab_conn, &params.tab_id)?;

        ctx.log(
            OpType::DeleteTab,
            json!({ "tabId": params.tab_id, "deleted": ids }),
        )?;
        ctx.tabs_changed();
        info!(tab_id = %params.tab_id, notes = ids.len(), "deleted tab");
        Ok(DeletedTab {
            tab_id: params.tab_id.clone(),
            deleted_notes: ids.len(),
        })
    })
    .await
}

fn fetch(ctx: &MutationCtx<'_, '_>, tab_id: &str) -> Result<Tab> {
    tabs::get(ctx.read(Table::Tabs)?, tab_id)?.ok_or_else(|| NotesError::tab_not_found(tab_id))
}
