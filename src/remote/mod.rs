pub mod client;
pub mod error;

use std::future::Future;

use crate::core::note::{Note, NoteDraft, NoteId};

pub use client::ApiClient;
pub use error::ApiError;

/// The note operations the view depends on.
///
/// `ApiClient` is the production implementation; tests drive the view
/// against an in-memory one.
pub trait NotesBackend {
    fn list_notes(&self) -> impl Future<Output = Result<Vec<Note>, ApiError>> + Send;

    fn create_note(&self, draft: &NoteDraft) -> impl Future<Output = Result<Note, ApiError>> + Send;

    fn delete_note(&self, id: NoteId) -> impl Future<Output = Result<(), ApiError>> + Send;
}
