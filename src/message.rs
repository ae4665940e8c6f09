use cosmic::widget::text_editor;

use notekeep::core::note::NoteId;
use notekeep::core::user::UserRecord;
use notekeep::remote::{ApiClient, ApiError};
use notekeep::session::Session;
use notekeep::view::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    ServerUrl,
    Username,
    Password,
}

#[derive(Debug, Clone)]
pub enum Message {
    // Login page
    SetAuthField(AuthField, String),
    SetAuthMode(AuthMode),
    SubmitAuth,
    /// Carries the client holding the new credential.
    AuthCompleted(Result<ApiClient, ApiError>),
    CurrentUserLoaded(Session, Result<UserRecord, ApiError>),
    SignOut,
    ToggleDebugLogging,

    // Forms
    OpenCreateForm,
    CloseCreateForm,
    StartEditing(NoteId),
    CancelEditing,
    FormTitleChanged(String),
    FormEditorAction(text_editor::Action),
    SubmitForm,

    // Delete
    RequestDelete(NoteId),
    ConfirmDelete,
    CancelDelete,

    RestoreLostNote,
    Refresh,
    DismissError,

    /// A finished remote command, stamped with the session that sent it.
    Remote(Session, Outcome),
}
