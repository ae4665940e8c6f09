use std::sync::{Mutex, MutexGuard};

use reqwest::StatusCode;

use crate::core::note::{Note, NoteDraft, NoteId};
use crate::remote::{ApiError, NotesBackend};

/// In-memory stand-in for the notes service: sequential ids, server order, injectable failures.
pub(crate) struct MemoryBackend {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    notes: Vec<Note>,
    next_id: i64,
    calls: usize,
    fail_list: bool,
    fail_create: bool,
    fail_delete: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 1,
                ..Inner::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }

    /// Number of calls that reached the backend.
    pub fn calls(&self) -> usize {
        self.lock().calls
    }

    pub fn notes(&self) -> Vec<Note> {
        self.lock().notes.clone()
    }

    pub fn fail_lists(&self, fail: bool) {
        self.lock().fail_list = fail;
    }

    pub fn fail_creates(&self, fail: bool) {
        self.lock().fail_create = fail;
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.lock().fail_delete = fail;
    }

    /// Drop a note behind the client's back.
    pub fn remove_directly(&self, id: NoteId) {
        self.lock().notes.retain(|n| n.id != id);
    }
}

fn server_error() -> ApiError {
    ApiError::Remote {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: "Internal Server Error".to_string(),
    }
}

impl NotesBackend for MemoryBackend {
    async fn list_notes(&self) -> Result<Vec<Note>, ApiError> {
        let mut inner = self.lock();
        inner.calls += 1;
        if inner.fail_list {
            return Err(server_error());
        }
        Ok(inner.notes.clone())
    }

    async fn create_note(&self, draft: &NoteDraft) -> Result<Note, ApiError> {
        let mut inner = self.lock();
        inner.calls += 1;
        if inner.fail_create {
            return Err(server_error());
        }
        let note = Note::new(NoteId(inner.next_id), draft.title(), draft.content());
        inner.next_id += 1;
        inner.notes.push(note.clone());
        Ok(note)
    }

    async fn delete_note(&self, id: NoteId) -> Result<(), ApiError> {
        let mut inner = self.lock();
        inner.calls += 1;
        if inner.fail_delete {
            return Err(server_error());
        }
        let before = inner.notes.len();
        inner.notes.retain(|n| n.id != id);
        if inner.notes.len() == before {
            return Err(ApiError::Remote {
                status: StatusCode::NOT_FOUND,
                body: r#"{"detail":"Note not found or unauthorized"}"#.to_string(),
            });
        }
        Ok(())
    }
}
