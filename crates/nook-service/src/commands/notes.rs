//! Note commands: create, get, list, update text, move, delete.

use nook_db::queries::{chunks, nodes, tabs};
use nook_db::Table;
use nook_text::{build_preview, build_title, join_chunks, split_text};
use nook_types::{Note, OpType, KIND_CUSTOM};
use serde_json::{json, Value};
use tracing::debug;

use super::{new_id, now_millis, subtree_ids, MutationCtx};
use crate::command::{
    CreateNoteParams, CreatedNote, DeletedNotes, ListChildrenParams, MoveNoteParams, MovedNote,
    NoteRef, NoteWithText, UpdateNoteTextParams, UpdatedNote,
};
use crate::ordering::{place, resolve_index, Placement};
use crate::{NotesError, NotesService, Result};

pub(crate) const NOTE_WRITE: &[Table] = &[
    Table::Meta,
    Table::Tabs,
    Table::Nodes,
    Table::Chunks,
    Table::Oplog,
];

/// Rewrite sibling keys after a rebalance. Returns the `(id, key)` pairs
/// for the oplog.
fn apply_relaid(
    ctx: &MutationCtx<'_, '_>,
    siblings: &[Note],
    placement: &Placement,
) -> Result<Vec<Value>> {
    let Some(relaid) = &placement.relaid else {
        return Ok(Vec::new());
    };
    let conn = ctx.write(Table::Nodes)?;
    let mut log = Vec::with_capacity(siblings.len());
    for (sibling, key) in siblings.iter().zip(relaid) {
        nodes::set_order_key(conn, &sibling.id, key)?;
        log.push(json!({ "noteId": sibling.id, "orderKey": key }));
    }
    Ok(log)
}

fn sibling_keys(siblings: &[Note]) -> Vec<&str> {
    siblings.iter().map(|n| n.order_key.as_str()).collect()
}

/// Create a note at the end of its sibling list. Shared with scratch
/// creation.
pub(crate) fn insert_note(ctx: &mut MutationCtx<'_, '_>, params: CreateNoteParams) -> Result<Note> {
    let conn = ctx.write(Table::Nodes)?;

    let parent = match &params.parent_id {
        Some(parent_id) => Some(
            nodes::get(conn, parent_id)?.ok_or_else(|| NotesError::note_not_found(parent_id))?,
        ),
        None => None,
    };
    let tab_id = match (params.tab_id, &parent) {
        (Some(tab_id), Some(parent)) if parent.tab_id != tab_id => {
            return Err(NotesError::InvariantViolation(format!(
                "parent '{}' belongs to another tab",
                parent.id
            )));
        }
        (Some(tab_id), _) => {
            if tabs::get(ctx.read(Table::Tabs)?, &tab_id)?.is_none() {
                return Err(NotesError::tab_not_found(&tab_id));
            }
            tab_id
        }
        (None, Some(parent)) => parent.tab_id.clone(),
        (None, None) => ctx.default_tab()?.tab_id,
    };

    let siblings = nodes::list_children(conn, &tab_id, params.parent_id.as_deref())?;
    let keys = sibling_keys(&siblings);
    let placement = place(&keys, keys.len())?;
    let rebalanced = apply_relaid(ctx, &siblings, &placement)?;

    let options = ctx.options();
    let body = split_text(&params.text, options.chunk_size)?;
    let title = params
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| build_title(&params.text, &options.untitled_title));
    let preview = build_preview(&params.text, options.preview_limit);

    let now = now_millis();
    let mut note = Note {
        id: new_id(),
        tab_id,
        parent_id: params.parent_id,
        order_key: placement.key,
        kind: params.kind.unwrap_or_else(|| KIND_CUSTOM.to_string()),
        title,
        preview,
        source: params.source,
        tags: params.tags,
        flags: serde_json::Map::new(),
        created_at: now,
        updated_at: now,
        rev: 1,
    };
    note.set_html(params.html);

    nodes::insert(conn, &note)?;
    chunks::insert_all(ctx.write(Table::Chunks)?, &note.id, &body)?;
    ctx.log(
        OpType::CreateNote,
        json!({ "note": note, "chunks": body, "rebalanced": rebalanced }),
    )?;
    ctx.bump(&note.tab_id)?;
    debug!(note_id = %note.id, tab_id = %note.tab_id, "created note");
    Ok(note)
}

pub async fn create_note(svc: &NotesService, params: CreateNoteParams) -> Result<CreatedNote> {
    let note = svc.mutate(NOTE_WRITE, |ctx| insert_note(ctx, params)).await?;
    Ok(CreatedNote {
        note_id: note.id,
        tab_id: note.tab_id,
        order_key: note.order_key,
    })
}

/// A note with its joined text, or `None` if it does not exist.
pub async fn get_note(svc: &NotesService, params: NoteRef) -> Result<Option<NoteWithText>> {
    svc.read(&[Table::Nodes, Table::Chunks], |tx| {
        let Some(note) = nodes::get(tx.read(Table::Nodes)?, &params.note_id)? else {
            return Ok(None);
        };
        let text = join_chunks(&chunks::list(tx.read(Table::Chunks)?, &note.id)?);
        let html = note.html().map(str::to_string);
        Ok(Some(NoteWithText { note, text, html }))
    })
    .await
}

/// Children of `(tabId, parentId)` sorted by order key.
pub async fn list_children(svc: &NotesService, params: ListChildrenParams) -> Result<Vec<Note>> {
    svc.read(&[Table::Nodes], |tx| {
        Ok(nodes::list_children(
            tx.read(Table::Nodes)?,
            &params.tab_id,
            params.parent_id.as_deref(),
        )?)
    })
    .await
}

pub async fn update_note_text(
    svc: &NotesService,
    params: UpdateNoteTextParams,
) -> Result<UpdatedNote> {
    svc.mutate(NOTE_WRITE, |ctx| {
        let conn = ctx.write(Table::Nodes)?;
        let mut note = nodes::get(conn, &params.note_id)?
            .ok_or_else(|| NotesError::note_not_found(&params.note_id))?;

        let options = ctx.options();
        let body = split_text(&params.text, options.chunk_size)?;
        chunks::replace(ctx.write(Table::Chunks)?, &note.id, &body)?;

        let prev_rev = note.rev;
        note.title = build_title(&params.text, &options.untitled_title);
        note.preview = build_preview(&params.text, options.preview_limit);
        note.rev += 1;
        note.updated_at = now_millis();
        if let Some(html) = params.html {
            note.set_html(html);
        }
        nodes::update(conn, &note)?;

        ctx.log(
            OpType::UpdateText,
            json!({
                "noteId": note.id,
                "tabId": note.tab_id,
                "prevRev": prev_rev,
                "nextRev": note.rev,
                "chunks": body,
            }),
        )?;
        ctx.bump(&note.tab_id)?;
        Ok(UpdatedNote {
            note_id: note.id,
            rev: note.rev,
        })
    })
    .await
}

/// Reparent and/or reorder a note within its tab.
pub async fn move_note(svc: &NotesService, params: MoveNoteParams) -> Result<MovedNote> {
    svc.mutate(NOTE_WRITE, |ctx| {
        let conn = ctx.write(Table::Nodes)?;
        let mut note = nodes::get(conn, &params.note_id)?
            .ok_or_else(|| NotesError::note_not_found(&params.note_id))?;

        if let Some(parent_id) = &params.parent_id {
            if *parent_id == note.id {
                return Err(NotesError::InvariantViolation(
                    "cannot move a note into itself".to_string(),
                ));
            }
            let parent = nodes::get(conn, parent_id)?
                .ok_or_else(|| NotesError::note_not_found(parent_id))?;
            if parent.tab_id != note.tab_id {
                return Err(NotesError::InvariantViolation(
                    "cannot move a note to another tab".to_string(),
                ));
            }
            if subtree_ids(conn, &note.tab_id, &note.id)?.contains(parent_id) {
                return Err(NotesError::InvariantViolation(format!(
                    "cannot move a note under its own descendant '{parent_id}'"
                )));
            }
        }

        let siblings: Vec<Note> =
            nodes::list_children(conn, &note.tab_id, params.parent_id.as_deref())?
                .into_iter()
                .filter(|n| n.id != note.id)
                .collect();
        let ids: Vec<&str> = siblings.iter().map(|n| n.id.as_str()).collect();
        let index = resolve_index(&ids, params.before_id.as_deref(), params.after_id.as_deref());
        let placement = place(&sibling_keys(&siblings), index)?;
        let rebalanced = apply_relaid(ctx, &siblings, &placement)?;

        let prev = json!({ "parentId": note.parent_id, "orderKey": note.order_key });
        note.parent_id = params.parent_id;
        note.order_key = placement.key;
        note.rev += 1;
        note.updated_at = now_millis();
        nodes::update(conn, &note)?;

        ctx.log(
            OpType::MoveNote,
            json!({
                "noteId": note.id,
                "tabId": note.tab_id,
                "prev": prev,
                "next": { "parentId": note.parent_id, "orderKey": note.order_key },
                "rebalanced": rebalanced,
            }),
        )?;
        ctx.bump(&note.tab_id)?;
        Ok(MovedNote {
            note_id: note.id,
            parent_id: note.parent_id,
            order_key: note.order_key,
        })
    })
    .await
}

/// Delete a note and every descendant, with their chunks.
pub async fn delete_note(svc: &NotesService, params: NoteRef) -> Result<DeletedNotes> {
    svc.mutate(NOTE_WRITE, |ctx| {
        let conn = ctx.write(Table::Nodes)?;
        let note = nodes::get(conn, &params.note_id)?
            .ok_or_else(|| NotesError::note_not_found(&params.note_id))?;

        let deleted = subtree_ids(conn, &note.tab_id, &note.id)?;
        let chunk_conn = ctx.write(Table::Chunks)?;
        for id in &deleted {
            chunks::delete_for_note(chunk_conn, id)?;
            nodes::delete(conn, id)?;
        }

        ctx.log(
            OpType::DeleteNote,
            json!({ "noteId": note.id, "tabId": note.tab_id, "deleted": deleted }),
        )?;
        ctx.bump(&note.tab_id)?;
        debug!(note_id = %note.id, count = deleted.len(), "deleted note subtree");
        Ok(DeletedNotes { deleted })
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CreateTabParams;
    use crate::commands::tabs::create_tab;
    use crate::ServiceOptions;
    use nook_types::NotesEvent;

    fn service() -> NotesService {
        NotesService::open_memory(ServiceOptions::default()).expect("open")
    }

    async fn tab(svc: &NotesService, name: &str) -> String {
        create_tab(svc, CreateTabParams { name: name.into() })
            .await
            .expect("create tab")
            .tab_id
    }

    async fn note(svc: &NotesService, tab_id: &str, parent: Option<&str>, text: &str) -> CreatedNote {
        create_note(
            svc,
            CreateNoteParams {
                tab_id: parent.is_none().then(|| tab_id.to_string()),
                parent_id: parent.map(str::to_string),
                text: text.into(),
                ..Default::default()
            },
        )
        .await
        .expect("create note")
    }

    async fn children(svc: &NotesService, tab_id: &str, parent: Option<&str>) -> Vec<String> {
        list_children(
            svc,
            ListChildrenParams {
                tab_id: tab_id.into(),
                parent_id: parent.map(str::to_string),
            },
        )
        .await
        .expect("list")
        .into_iter()
        .map(|n| n.id)
        .collect()
    }

    async fn fetch(svc: &NotesService, id: &str) -> NoteWithText {
        get_note(svc, NoteRef { note_id: id.into() })
            .await
            .expect("get")
            .expect("exists")
    }

    async fn move_to(
        svc: &NotesService,
        id: &str,
        parent: Option<&str>,
        before: Option<&str>,
        after: Option<&str>,
    ) -> Result<MovedNote> {
        move_note(
            svc,
            MoveNoteParams {
                note_id: id.into(),
                parent_id: parent.map(str::to_string),
                before_id: before.map(str::to_string),
                after_id: after.map(str::to_string),
            },
        )
        .await
    }

    #[tokio::test]
    async fn test_create_appends_after_siblings() {
        let svc = service();
        let t = tab(&svc, "Work").await;
        let a = note(&svc, &t, None, "Hello").await;
        let b = note(&svc, &t, None, "World").await;
        assert!(b.order_key > a.order_key);
        assert_eq!(children(&svc, &t, None).await, [a.note_id, b.note_id]);
    }

    #[tokio::test]
    async fn test_create_derives_title_and_preview() {
        let svc = service();
        let t = tab(&svc, "Work").await;
        let a = note(&svc, &t, None, "\n  Groceries  \nmilk\teggs").await;
        let got = fetch(&svc, &a.note_id).await;
        assert_eq!(got.note.title, "Groceries");
        assert_eq!(got.note.preview, "Groceries milk eggs");
        assert_eq!(got.note.kind, KIND_CUSTOM);
        assert_eq!(got.note.rev, 1);
        assert_eq!(got.text, "\n  Groceries  \nmilk\teggs");

        let blank = note(&svc, &t, None, "   ").await;
        assert_eq!(fetch(&svc, &blank.note_id).await.note.title, "Untitled");
    }

    #[tokio::test]
    async fn test_create_inherits_parent_tab() {
        let svc = service();
        let t = tab(&svc, "Work").await;
        let parent = note(&svc, &t, None, "parent").await;
        let child = note(&svc, &t, Some(&parent.note_id), "child").await;
        assert_eq!(child.tab_id, t);
        assert_eq!(children(&svc, &t, Some(&parent.note_id)).await, [child.note_id]);
        assert_eq!(children(&svc, &t, None).await, [parent.note_id]);
    }

    #[tokio::test]
    async fn test_create_defaults_to_default_tab() {
        let svc = service();
        let created = create_note(&svc, CreateNoteParams::default())
            .await
            .expect("create");
        let default = crate::commands::tabs::init(&svc).await.expect("init");
        assert_eq!(created.tab_id, default.default_tab_id);
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_refs() {
        let svc = service();
        let missing_tab = create_note(
            &svc,
            CreateNoteParams {
                tab_id: Some("nope".into()),
                ..Default::default()
            },
        )
        .await
        .expect_err("should fail");
        assert!(matches!(missing_tab, NotesError::NotFound(_)));

        let missing_parent = create_note(
            &svc,
            CreateNoteParams {
                parent_id: Some("nope".into()),
                ..Default::default()
            },
        )
        .await
        .expect_err("should fail");
        assert!(matches!(missing_parent, NotesError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_parent_in_other_tab() {
        let svc = service();
        let t1 = tab(&svc, "one").await;
        let t2 = tab(&svc, "two").await;
        let parent = note(&svc, &t1, None, "p").await;
        let err = create_note(
            &svc,
            CreateNoteParams {
                tab_id: Some(t2),
                parent_id: Some(parent.note_id),
                ..Default::default()
            },
        )
        .await
        .expect_err("should fail");
        assert!(matches!(err, NotesError::InvariantViolation(_)));
    }

    #[tokio::test]
    async fn test_get_missing_note_is_none() {
        let svc = service();
        let got = get_note(&svc, NoteRef { note_id: "nope".into() })
            .await
            .expect("get");
        assert_eq!(got, None);
    }

    #[tokio::test]
    async fn test_long_text_spans_chunks() {
        let svc = NotesService::open_memory(ServiceOptions {
            chunk_size: 4,
            ..Default::default()
        })
        .expect("open");
        let t = tab(&svc, "Work").await;
        let text = "abcdefghij\u{e9}\u{e9}";
        let a = note(&svc, &t, None, text).await;
        assert_eq!(fetch(&svc, &a.note_id).await.text, text);
    }

    #[tokio::test]
    async fn test_update_text_bumps_revisions() {
        let svc = service();
        let t = tab(&svc, "Work").await;
        let a = note(&svc, &t, None, "old").await;
        let mut rx = svc.events().subscribe();

        let updated = update_note_text(
            &svc,
            UpdateNoteTextParams {
                note_id: a.note_id.clone(),
                text: "New title\nbody".into(),
                html: Some(Some("<h1>New title</h1>".into())),
            },
        )
        .await
        .expect("update");
        assert_eq!(updated.rev, 2);

        let got = fetch(&svc, &a.note_id).await;
        assert_eq!(got.text, "New title\nbody");
        assert_eq!(got.note.title, "New title");
        assert_eq!(got.html.as_deref(), Some("<h1>New title</h1>"));

        assert_eq!(
            rx.try_recv().expect("event"),
            NotesEvent::RevisionBump { tab_id: t, rev: 2 }
        );
    }

    #[tokio::test]
    async fn test_update_text_html_keep_and_clear() {
        let svc = service();
        let t = tab(&svc, "Work").await;
        let a = create_note(
            &svc,
            CreateNoteParams {
                tab_id: Some(t),
                text: "x".into(),
                html: Some("<p>x</p>".into()),
                ..Default::default()
            },
        )
        .await
        .expect("create");

        let update = |html| UpdateNoteTextParams {
            note_id: a.note_id.clone(),
            text: "y".into(),
            html,
        };
        update_note_text(&svc, update(None)).await.expect("keep");
        assert_eq!(fetch(&svc, &a.note_id).await.html.as_deref(), Some("<p>x</p>"));

        update_note_text(&svc, update(Some(None))).await.expect("clear");
        assert_eq!(fetch(&svc, &a.note_id).await.html, None);
    }

    #[tokio::test]
    async fn test_update_missing_note() {
        let svc = service();
        let err = update_note_text(
            &svc,
            UpdateNoteTextParams {
                note_id: "nope".into(),
                text: String::new(),
                html: None,
            },
        )
        .await
        .expect_err("should fail");
        assert!(matches!(err, NotesError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_move_before_sibling() {
        let svc = service();
        let t = tab(&svc, "Work").await;
        let a = note(&svc, &t, None, "A").await;
        let b = note(&svc, &t, None, "B").await;

        let moved = move_to(&svc, &b.note_id, None, Some(&a.note_id), None)
            .await
            .expect("move");
        assert!(moved.order_key < a.order_key);
        assert_eq!(children(&svc, &t, None).await, [b.note_id.clone(), a.note_id]);
        assert_eq!(fetch(&svc, &b.note_id).await.note.rev, 2);
    }

    #[tokio::test]
    async fn test_move_after_and_between() {
        let svc = service();
        let t = tab(&svc, "Work").await;
        let a = note(&svc, &t, None, "A").await;
        let b = note(&svc, &t, None, "B").await;
        let c = note(&svc, &t, None, "C").await;

        move_to(&svc, &a.note_id, None, None, Some(&b.note_id))
            .await
            .expect("move");
        assert_eq!(
            children(&svc, &t, None).await,
            [b.note_id.clone(), a.note_id.clone(), c.note_id.clone()]
        );

        // unknown hints fall back to append
        move_to(&svc, &b.note_id, None, Some("ghost"), None)
            .await
            .expect("move");
        assert_eq!(children(&svc, &t, None).await, [a.note_id, c.note_id, b.note_id]);
    }

    #[tokio::test]
    async fn test_move_reparents() {
        let svc = service();
        let t = tab(&svc, "Work").await;
        let a = note(&svc, &t, None, "A").await;
        let b = note(&svc, &t, None, "B").await;

        let moved = move_to(&svc, &b.note_id, Some(&a.note_id), None, None)
            .await
            .expect("move");
        assert_eq!(moved.parent_id.as_deref(), Some(a.note_id.as_str()));
        assert_eq!(children(&svc, &t, Some(&a.note_id)).await, [b.note_id.clone()]);
        assert_eq!(children(&svc, &t, None).await, [a.note_id.clone()]);

        move_to(&svc, &b.note_id, None, Some(&a.note_id), None)
            .await
            .expect("move back");
        assert_eq!(children(&svc, &t, None).await, [b.note_id, a.note_id]);
    }

    #[tokio::test]
    async fn test_move_rejects_self_cycle_and_cross_tab() {
        let svc = service();
        let t1 = tab(&svc, "one").await;
        let t2 = tab(&svc, "two").await;
        let a = note(&svc, &t1, None, "A").await;
        let child = note(&svc, &t1, Some(&a.note_id), "child").await;
        let grandchild = note(&svc, &t1, Some(&child.note_id), "grandchild").await;
        let other = note(&svc, &t2, None, "other").await;

        for target in [&a.note_id, &child.note_id, &grandchild.note_id, &other.note_id] {
            let err = move_to(&svc, &a.note_id, Some(target), None, None)
                .await
                .expect_err("should fail");
            assert!(matches!(err, NotesError::InvariantViolation(_)), "{target}: {err}");
        }

        let err = move_to(&svc, &a.note_id, Some("ghost"), None, None)
            .await
            .expect_err("should fail");
        assert!(matches!(err, NotesError::NotFound(_)));

        // nothing changed
        assert_eq!(fetch(&svc, &a.note_id).await.note.rev, 1);
    }

    #[tokio::test]
    async fn test_move_keeps_tab() {
        let svc = service();
        let t = tab(&svc, "Work").await;
        let a = note(&svc, &t, None, "A").await;
        let b = note(&svc, &t, None, "B").await;
        move_to(&svc, &a.note_id, Some(&b.note_id), None, None)
            .await
            .expect("move");
        assert_eq!(fetch(&svc, &a.note_id).await.note.tab_id, t);
    }

    #[tokio::test]
    async fn test_repeated_moves_into_same_gap_rebalance() {
        let svc = service();
        let t = tab(&svc, "Work").await;
        let first = note(&svc, &t, None, "first").await;
        let last = note(&svc, &t, None, "last").await;

        // halve the gap between `first` and whatever follows it until the
        // keyspace runs out there
        let mut expected = vec![first.note_id.clone(), last.note_id.clone()];
        for i in 0..20 {
            let n = note(&svc, &t, None, &format!("n{i}")).await;
            move_to(&svc, &n.note_id, None, None, Some(&first.note_id))
                .await
                .expect("move");
            expected.insert(1, n.note_id);
        }
        assert_eq!(children(&svc, &t, None).await, expected);

        let keys: Vec<String> = list_children(
            &svc,
            ListChildrenParams {
                tab_id: t.clone(),
                parent_id: None,
            },
        )
        .await
        .expect("list")
        .into_iter()
        .map(|n| n.order_key)
        .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(keys, sorted);
    }

    #[tokio::test]
    async fn test_delete_cascades() {
        let svc = service();
        let t = tab(&svc, "Work").await;
        let a = note(&svc, &t, None, "A").await;
        let b = note(&svc, &t, None, "B").await;
        let child = note(&svc, &t, Some(&a.note_id), "child").await;
        let grandchild = note(&svc, &t, Some(&child.note_id), "grandchild").await;

        let deleted = delete_note(&svc, NoteRef { note_id: a.note_id.clone() })
            .await
            .expect("delete");
        assert_eq!(
            deleted.deleted,
            [a.note_id.clone(), child.note_id.clone(), grandchild.note_id.clone()]
        );
        for id in [&a.note_id, &child.note_id, &grandchild.note_id] {
            let got = get_note(&svc, NoteRef { note_id: id.clone() })
                .await
                .expect("get");
            assert_eq!(got, None);
        }
        assert_eq!(children(&svc, &t, None).await, [b.note_id]);
    }

    #[tokio::test]
    async fn test_every_mutation_bumps_once() {
        let svc = service();
        let t = tab(&svc, "Work").await;
        let mut rx = svc.events().subscribe();

        let a = note(&svc, &t, None, "A").await;
        let b = note(&svc, &t, None, "B").await;
        move_to(&svc, &b.note_id, None, Some(&a.note_id), None)
            .await
            .expect("move");
        delete_note(&svc, NoteRef { note_id: a.note_id })
            .await
            .expect("delete");

        let mut revs = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if let NotesEvent::RevisionBump { rev, .. } = event {
                revs.push(rev);
            }
        }
        assert_eq!(revs, [1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_failed_command_changes_nothing() {
        let svc = service();
        let t = tab(&svc, "Work").await;
        let a = note(&svc, &t, None, "A").await;
        let mut rx = svc.events().subscribe();

        move_to(&svc, &a.note_id, Some(&a.note_id), None, None)
            .await
            .expect_err("should fail");
        assert!(rx.try_recv().is_err());

        let oplog_len = svc
            .read(&[Table::Oplog], |tx| {
                Ok(nook_db::queries::oplog::list_since(tx.read(Table::Oplog)?, 0, 100)?.len())
            })
            .await
            .expect("oplog");
        // create_tab + create_note
        assert_eq!(oplog_len, 2);
    }
}
