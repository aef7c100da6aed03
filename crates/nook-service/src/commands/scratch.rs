//! Scratch notes, addressed by `(origin, key)` instead of tree position.

use nook_db::queries::{chunks, nodes};
use nook_db::Table;
use nook_text::join_chunks;
use nook_types::{NoteSource, KIND_SCRATCH};

use super::notes::{insert_note, NOTE_WRITE};
use crate::command::{CreateNoteParams, NoteWithText, ScratchParams};
use crate::{NotesService, Result};

/// Existing scratch note for `(origin, key)` in the default tab, or a new
/// empty one.
pub async fn get_or_create_scratch(
    svc: &NotesService,
    params: ScratchParams,
) -> Result<NoteWithText> {
    svc.mutate(NOTE_WRITE, |ctx| {
        let tab = ctx.default_tab()?;
        let existing = nodes::list_by_kind(ctx.read(Table::Nodes)?, &tab.tab_id, KIND_SCRATCH)?
            .into_iter()
            .find(|n| n.source.matches(&params.origin, &params.key));

        if let Some(note) = existing {
            let text = join_chunks(&chunks::list(ctx.read(Table::Chunks)?, &note.id)?);
            let html = note.html().map(str::to_string);
            return Ok(NoteWithText { note, text, html });
        }

        let title = ctx.options().scratch_title.clone();
        let note = insert_note(
            ctx,
            CreateNoteParams {
                tab_id: Some(tab.tab_id),
                kind: Some(KIND_SCRATCH.to_string()),
                title: Some(title),
                source: NoteSource::new(params.origin, params.key),
                ..Default::default()
            },
        )?;
        Ok(NoteWithText {
            note,
            text: String::new(),
            html: None,
        })
    })
    .await
}
