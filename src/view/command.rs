use crate::core::note::{Note, NoteDraft, NoteId};
use crate::remote::{ApiError, NotesBackend};

/// Remote work requested by the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Refresh,
    Create(NoteDraft),
    /// Delete `original`, then create `draft`. The service has no update route.
    Edit { original: Note, draft: NoteDraft },
    Delete(NoteId),
    /// Re-create a note lost by a half-finished edit.
    Restore(Note),
}

/// Result of running a [`Command`], fed back through `NotesView::apply`.
#[derive(Debug, Clone)]
pub enum Outcome {
    Refreshed(Result<Vec<Note>, ApiError>),
    Created(Result<Note, ApiError>),
    Edited(Result<Note, EditError>),
    Deleted { id: NoteId, result: Result<(), ApiError> },
    Restored(Result<Note, ApiError>),
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum EditError {
    /// Nothing changed remotely.
    #[error("could not remove the original note: {0}")]
    Delete(#[source] ApiError),

    /// The original is gone and its replacement was never stored.
    #[error("original note was removed but the edited note could not be saved: {source}")]
    Create {
        lost: Note,
        #[source]
        source: ApiError,
    },
}

pub async fn execute<B: NotesBackend>(backend: &B, command: Command) -> Outcome {
    match command {
        Command::Refresh => Outcome::Refreshed(backend.list_notes().await),
        Command::Create(draft) => Outcome::Created(backend.create_note(&draft).await),
        Command::Edit { original, draft } => Outcome::Edited(replace_note(backend, original, &draft).await),
        Command::Delete(id) => Outcome::Deleted {
            id,
            result: backend.delete_note(id).await,
        },
        Command::Restore(note) => Outcome::Restored(backend.create_note(&NoteDraft::from(&note)).await),
    }
}

async fn replace_note<B: NotesBackend>(
    backend: &B,
    original: Note,
    draft: &NoteDraft,
) -> Result<Note, EditError> {
    backend.delete_note(original.id).await.map_err(EditError::Delete)?;
    backend
        .create_note(draft)
        .await
        .map_err(|source| EditError::Create { lost: original, source })
}
