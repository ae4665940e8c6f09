//! Local state of the notes screen.
//!
//! `NotesView` never talks to the network. Intents that need the service
//! return a [`Command`]; the caller runs it with [`execute`] and folds the
//! [`Outcome`] back in with [`NotesView::apply`], which may ask for a
//! follow-up refresh. The local list is only ever replaced by a fetch, never
//! patched after a mutation.

mod command;
#[cfg(test)]
mod testing;

use chrono::{DateTime, Local};

use crate::core::note::{FormState, Note, NoteId};
use crate::remote::NotesBackend;

pub use command::{Command, EditError, Outcome, execute};

const LOAD_FAILED: &str = "Failed to load notes";
const CREATE_FAILED: &str = "Failed to create note";
const UPDATE_FAILED: &str = "Failed to update note";
const UPDATE_LOST: &str =
    "Failed to update note: the original was deleted and the changes were not saved";
const DELETE_FAILED: &str = "Failed to delete note";
const RESTORE_FAILED: &str = "Failed to restore note";

/// Which form is open. Holding both in one enum keeps them mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ActiveForm {
    #[default]
    None,
    Create(FormState),
    Edit { original: Note, form: FormState },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    List,
    CreateFormOpen,
    EditFormOpen(NoteId),
}

/// The one command allowed to be outstanding at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InFlight {
    Refresh,
    Create,
    Edit,
    Delete,
    Restore,
}

#[derive(Debug, Clone)]
pub struct NotesView {
    notes: Vec<Note>,
    loading: bool,
    error: Option<String>,
    form: ActiveForm,
    pending_delete: Option<NoteId>,
    in_flight: Option<InFlight>,
    /// Original of an edit whose delete landed but whose create did not.
    recovery: Option<Note>,
    last_refreshed: Option<DateTime<Local>>,
}

impl Default for NotesView {
    fn default() -> Self {
        Self::new()
    }
}

impl NotesView {
    pub fn new() -> Self {
        Self {
            notes: Vec::new(),
            loading: true,
            error: None,
            form: ActiveForm::None,
            pending_delete: None,
            in_flight: None,
            recovery: None,
            last_refreshed: None,
        }
    }

    // --- Accessors ---

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn form(&self) -> &ActiveForm {
        &self.form
    }

    pub fn form_fields(&self) -> Option<&FormState> {
        match &self.form {
            ActiveForm::None => None,
            ActiveForm::Create(form) | ActiveForm::Edit { form, .. } => Some(form),
        }
    }

    pub fn editing(&self) -> Option<&Note> {
        match &self.form {
            ActiveForm::Edit { original, .. } => Some(original),
            _ => None,
        }
    }

    pub fn pending_delete(&self) -> Option<NoteId> {
        self.pending_delete
    }

    pub fn in_flight(&self) -> Option<InFlight> {
        self.in_flight
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn recovery(&self) -> Option<&Note> {
        self.recovery.as_ref()
    }

    pub fn last_refreshed(&self) -> Option<DateTime<Local>> {
        self.last_refreshed
    }

    /// Nothing to show yet but a loading message. An open form stays visible through a refresh.
    pub fn shows_loading_placeholder(&self) -> bool {
        self.loading && self.notes.is_empty() && matches!(self.form, ActiveForm::None)
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            return Phase::Loading;
        }
        match &self.form {
            ActiveForm::None => Phase::List,
            ActiveForm::Create(_) => Phase::CreateFormOpen,
            ActiveForm::Edit { original, .. } => Phase::EditFormOpen(original.id),
        }
    }

    // --- Loading ---

    /// Enter `Loading` and ask for the first fetch.
    pub fn mount(&mut self) -> Command {
        self.loading = true;
        self.in_flight = Some(InFlight::Refresh);
        Command::Refresh
    }

    pub fn refresh(&mut self) -> Option<Command> {
        if !self.claim(InFlight::Refresh) {
            return None;
        }
        self.loading = true;
        Some(Command::Refresh)
    }

    // --- Forms ---

    pub fn open_create_form(&mut self) {
        self.form = ActiveForm::Create(FormState::default());
        self.pending_delete = None;
        self.error = None;
    }

    pub fn close_create_form(&mut self) {
        if matches!(self.form, ActiveForm::Create(_)) {
            self.form = ActiveForm::None;
        }
        self.error = None;
    }

    /// Open the edit form prefilled from the note. Returns false if the note is not in the list.
    pub fn start_editing(&mut self, id: NoteId) -> bool {
        let Some(note) = self.notes.iter().find(|n| n.id == id) else {
            log::warn!("Cannot edit note {}: not in the current list", id);
            return false;
        };
        self.form = ActiveForm::Edit {
            original: note.clone(),
            form: FormState::from_note(note),
        };
        self.pending_delete = None;
        true
    }

    pub fn cancel_editing(&mut self) {
        if matches!(self.form, ActiveForm::Edit { .. }) {
            self.form = ActiveForm::None;
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        if let Some(form) = self.form_fields_mut() {
            form.title = title.into();
        }
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        if let Some(form) = self.form_fields_mut() {
            form.content = content.into();
        }
    }

    /// Validate the open form and turn it into a create or edit command.
    ///
    /// Blank fields set the validation message and keep the form open.
    pub fn submit(&mut self) -> Option<Command> {
        if let Some(busy) = self.in_flight {
            log::debug!("Ignoring submit while {:?} is in flight", busy);
            return None;
        }
        let validated = match &self.form {
            ActiveForm::None => return None,
            ActiveForm::Create(form) => form
                .validate()
                .map(|draft| (InFlight::Create, Command::Create(draft))),
            ActiveForm::Edit { original, form } => form.validate().map(|draft| {
                (
                    InFlight::Edit,
                    Command::Edit {
                        original: original.clone(),
                        draft,
                    },
                )
            }),
        };
        match validated {
            Ok((kind, command)) => {
                self.error = None;
                self.in_flight = Some(kind);
                Some(command)
            }
            Err(e) => {
                log::debug!("Form rejected: {}", e);
                self.error = Some(e.to_string());
                None
            }
        }
    }

    // --- Delete ---

    /// First step of a delete; nothing is sent until [`Self::confirm_delete`].
    pub fn request_delete(&mut self, id: NoteId) {
        if self.loading || !matches!(self.form, ActiveForm::None) {
            log::debug!("Delete of {} ignored outside the list", id);
            return;
        }
        if self.notes.iter().any(|n| n.id == id) {
            self.pending_delete = Some(id);
        }
    }

    pub fn confirm_delete(&mut self) -> Option<Command> {
        let id = self.pending_delete?;
        if !self.claim(InFlight::Delete) {
            return None;
        }
        self.pending_delete = None;
        Some(Command::Delete(id))
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    // --- Recovery ---

    pub fn restore_lost_note(&mut self) -> Option<Command> {
        let note = self.recovery.clone()?;
        if !self.claim(InFlight::Restore) {
            return None;
        }
        Some(Command::Restore(note))
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    // --- Remote results ---

    /// Fold a remote result into the state. Returns the follow-up refresh after a successful mutation.
    pub fn apply(&mut self, outcome: Outcome) -> Option<Command> {
        match outcome {
            Outcome::Refreshed(Ok(notes)) => {
                log::debug!("Loaded {} notes", notes.len());
                if let Some(id) = self.pending_delete {
                    if !notes.iter().any(|n| n.id == id) {
                        self.pending_delete = None;
                    }
                }
                self.notes = notes;
                self.error = None;
                self.finish_loading();
                self.last_refreshed = Some(Local::now());
                None
            }
            Outcome::Refreshed(Err(e)) => {
                log::error!("Failed to fetch notes: {}", e);
                self.error = Some(LOAD_FAILED.to_string());
                self.finish_loading();
                None
            }
            Outcome::Created(Ok(note)) => {
                log::info!("Created note {}", note.id);
                if matches!(self.form, ActiveForm::Create(_)) {
                    self.form = ActiveForm::None;
                }
                Some(self.follow_up_refresh())
            }
            Outcome::Created(Err(e)) => {
                log::error!("Failed to create note: {}", e);
                self.fail(CREATE_FAILED);
                None
            }
            Outcome::Edited(Ok(note)) => {
                log::info!("Replaced note with {}", note.id);
                if matches!(self.form, ActiveForm::Edit { .. }) {
                    self.form = ActiveForm::None;
                }
                Some(self.follow_up_refresh())
            }
            Outcome::Edited(Err(EditError::Delete(e))) => {
                log::error!("Failed to update note: {}", e);
                self.fail(UPDATE_FAILED);
                None
            }
            Outcome::Edited(Err(EditError::Create { lost, source })) => {
                log::error!(
                    "Note {} was deleted but its replacement failed: {}",
                    lost.id,
                    source
                );
                // The delete is confirmed, so the note is gone locally too. The
                // typed fields stay in a create form so the user can resubmit.
                self.notes.retain(|n| n.id != lost.id);
                if let ActiveForm::Edit { form, .. } = &mut self.form {
                    let form = std::mem::take(form);
                    self.form = ActiveForm::Create(form);
                }
                self.recovery = Some(lost);
                self.fail(UPDATE_LOST);
                None
            }
            Outcome::Deleted { id, result: Ok(()) } => {
                log::info!("Deleted note {}", id);
                Some(self.follow_up_refresh())
            }
            Outcome::Deleted { id, result: Err(e) } => {
                log::error!("Failed to delete note {}: {}", id, e);
                self.fail(DELETE_FAILED);
                None
            }
            Outcome::Restored(Ok(note)) => {
                log::info!("Restored lost note as {}", note.id);
                self.recovery = None;
                Some(self.follow_up_refresh())
            }
            Outcome::Restored(Err(e)) => {
                log::error!("Failed to restore note: {}", e);
                self.fail(RESTORE_FAILED);
                None
            }
        }
    }

    /// Run a command and every follow-up it triggers to completion.
    pub async fn dispatch<B: NotesBackend>(&mut self, backend: &B, command: Command) {
        let mut next = Some(command);
        while let Some(command) = next.take() {
            let outcome = execute(backend, command).await;
            next = self.apply(outcome);
        }
    }

    fn claim(&mut self, kind: InFlight) -> bool {
        if let Some(busy) = self.in_flight {
            log::debug!("Ignoring {:?} while {:?} is in flight", kind, busy);
            return false;
        }
        self.in_flight = Some(kind);
        true
    }

    /// The refresh after a mutation keeps the guard until it lands.
    fn follow_up_refresh(&mut self) -> Command {
        self.in_flight = Some(InFlight::Refresh);
        self.loading = true;
        Command::Refresh
    }

    fn finish_loading(&mut self) {
        self.loading = false;
        self.in_flight = None;
    }

    fn fail(&mut self, message: &str) {
        self.error = Some(message.to_string());
        self.in_flight = None;
    }

    fn form_fields_mut(&mut self) -> Option<&mut FormState> {
        match &mut self.form {
            ActiveForm::None => None,
            ActiveForm::Create(form) | ActiveForm::Edit { form, .. } => Some(form),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MemoryBackend;
    use super::*;
    use crate::remote::ApiError;
    use reqwest::StatusCode;

    async fn mounted(backend: &MemoryBackend) -> NotesView {
        let mut view = NotesView::new();
        let cmd = view.mount();
        view.dispatch(backend, cmd).await;
        view
    }

    async fn create(view: &mut NotesView, backend: &MemoryBackend, title: &str, content: &str) {
        view.open_create_form();
        view.set_title(title);
        view.set_content(content);
        let cmd = view.submit().expect("valid form");
        view.dispatch(backend, cmd).await;
    }

    #[tokio::test]
    async fn mount_loads_empty_list() {
        let backend = MemoryBackend::new();
        let mut view = NotesView::new();
        assert_eq!(view.phase(), Phase::Loading);

        let cmd = view.mount();
        assert_eq!(cmd, Command::Refresh);
        assert!(view.is_loading());

        view.dispatch(&backend, cmd).await;
        assert_eq!(view.phase(), Phase::List);
        assert!(view.notes().is_empty());
        assert!(view.error().is_none());
        assert!(view.last_refreshed().is_some());
        assert!(!view.is_busy());
    }

    #[tokio::test]
    async fn failed_load_keeps_list_and_reports() {
        let backend = MemoryBackend::new();
        let mut view = mounted(&backend).await;
        create(&mut view, &backend, "A", "B").await;

        backend.fail_lists(true);
        let cmd = view.refresh().unwrap();
        view.dispatch(&backend, cmd).await;
        assert_eq!(view.notes().len(), 1);
        assert_eq!(view.error(), Some("Failed to load notes"));
        assert!(!view.is_loading());
    }

    #[tokio::test]
    async fn created_note_shows_up_after_refresh() {
        let backend = MemoryBackend::new();
        let mut view = mounted(&backend).await;

        create(&mut view, &backend, "  Shopping ", " milk ").await;
        assert_eq!(view.phase(), Phase::List);
        assert_eq!(view.notes().len(), 1);
        assert_eq!(view.notes()[0].title, "Shopping");
        assert_eq!(view.notes()[0].content, "milk");
    }

    #[tokio::test]
    async fn blank_fields_never_reach_the_service() {
        let backend = MemoryBackend::new();
        let mut view = mounted(&backend).await;
        let calls = backend.calls();

        for (title, content) in [("", "body"), ("title", "   "), (" \t", "\n")] {
            view.open_create_form();
            view.set_title(title);
            view.set_content(content);
            assert_eq!(view.submit(), None);
            assert_eq!(view.error(), Some("Please fill in both title and content"));
            assert_eq!(view.phase(), Phase::CreateFormOpen);
        }

        view.close_create_form();
        view.set_title("x");
        view.set_content("y");
        view.start_editing(NoteId(1));
        assert_eq!(view.submit(), None);
        assert_eq!(backend.calls(), calls);
    }

    #[tokio::test]
    async fn blank_edit_is_rejected_locally() {
        let backend = MemoryBackend::new();
        let mut view = mounted(&backend).await;
        create(&mut view, &backend, "A", "B").await;
        let calls = backend.calls();

        let id = view.notes()[0].id;
        assert!(view.start_editing(id));
        view.set_content("  ");
        assert_eq!(view.submit(), None);
        assert_eq!(view.phase(), Phase::EditFormOpen(id));
        assert!(view.error().is_some());
        assert_eq!(backend.calls(), calls);
    }

    #[tokio::test]
    async fn failed_create_keeps_form_open() {
        let backend = MemoryBackend::new();
        let mut view = mounted(&backend).await;
        backend.fail_creates(true);

        view.open_create_form();
        view.set_title("A");
        view.set_content("B");
        let cmd = view.submit().unwrap();
        view.dispatch(&backend, cmd).await;

        assert_eq!(view.error(), Some("Failed to create note"));
        assert_eq!(view.phase(), Phase::CreateFormOpen);
        assert_eq!(view.form_fields().unwrap().title, "A");
        assert!(view.notes().is_empty());
        assert!(!view.is_busy());
    }

    #[tokio::test]
    async fn deleting_removes_exactly_that_note() {
        let backend = MemoryBackend::new();
        let mut view = mounted(&backend).await;
        for t in ["one", "two", "three"] {
            create(&mut view, &backend, t, "body").await;
        }
        let target = view.notes()[1].id;

        view.request_delete(target);
        assert_eq!(view.pending_delete(), Some(target));
        let cmd = view.confirm_delete().unwrap();
        assert_eq!(cmd, Command::Delete(target));
        view.dispatch(&backend, cmd).await;

        let titles: Vec<_> = view.notes().iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["one", "three"]);
        assert_eq!(view.pending_delete(), None);
    }

    #[tokio::test]
    async fn declined_delete_changes_nothing() {
        let backend = MemoryBackend::new();
        let mut view = mounted(&backend).await;
        create(&mut view, &backend, "A", "B").await;
        let calls = backend.calls();
        let before = view.notes().to_vec();

        view.request_delete(before[0].id);
        view.cancel_delete();
        assert_eq!(view.confirm_delete(), None);
        assert_eq!(view.notes(), &before[..]);
        assert_eq!(backend.calls(), calls);
    }

    #[tokio::test]
    async fn deleting_missing_note_reports_without_touching_list() {
        let backend = MemoryBackend::new();
        let mut view = mounted(&backend).await;
        create(&mut view, &backend, "A", "B").await;
        let id = view.notes()[0].id;

        // Gone on the server, still shown locally.
        backend.remove_directly(id);
        let outcome = execute(&backend, Command::Delete(id)).await;
        match &outcome {
            Outcome::Deleted { result: Err(ApiError::Remote { status, .. }), .. } => {
                assert_eq!(*status, StatusCode::NOT_FOUND)
            }
            other => panic!("expected remote error, got {:?}", other),
        }

        view.request_delete(id);
        let cmd = view.confirm_delete().unwrap();
        view.dispatch(&backend, cmd).await;
        assert_eq!(view.notes().len(), 1);
        assert_eq!(view.error(), Some("Failed to delete note"));
    }

    #[tokio::test]
    async fn delete_is_only_offered_from_the_list() {
        let backend = MemoryBackend::new();
        let mut view = mounted(&backend).await;
        create(&mut view, &backend, "A", "B").await;
        let id = view.notes()[0].id;

        view.open_create_form();
        view.request_delete(id);
        assert_eq!(view.pending_delete(), None);

        view.close_create_form();
        view.request_delete(NoteId(404));
        assert_eq!(view.pending_delete(), None);
    }

    #[tokio::test]
    async fn edit_replaces_the_note() {
        let backend = MemoryBackend::new();
        let mut view = mounted(&backend).await;
        create(&mut view, &backend, "old title", "old body").await;
        let old_id = view.notes()[0].id;

        assert!(view.start_editing(old_id));
        assert_eq!(view.form_fields().unwrap().title, "old title");
        view.set_title("new title");
        view.set_content("new body");
        let cmd = view.submit().unwrap();
        view.dispatch(&backend, cmd).await;

        assert_eq!(view.phase(), Phase::List);
        let notes = view.notes();
        assert_eq!(notes.iter().filter(|n| n.title == "new title" && n.content == "new body").count(), 1);
        assert!(notes.iter().all(|n| n.title != "old title" && n.id != old_id));
    }

    #[tokio::test]
    async fn edit_that_cannot_delete_loses_nothing() {
        let backend = MemoryBackend::new();
        let mut view = mounted(&backend).await;
        create(&mut view, &backend, "A", "B").await;
        let id = view.notes()[0].id;
        backend.fail_deletes(true);

        view.start_editing(id);
        view.set_title("A2");
        let cmd = view.submit().unwrap();
        view.dispatch(&backend, cmd).await;

        assert_eq!(view.error(), Some("Failed to update note"));
        assert_eq!(view.phase(), Phase::EditFormOpen(id));
        assert_eq!(backend.notes().len(), 1);
        assert!(view.recovery().is_none());
    }

    #[tokio::test]
    async fn half_finished_edit_loses_the_note_but_can_restore_it() {
        let backend = MemoryBackend::new();
        let mut view = mounted(&backend).await;
        create(&mut view, &backend, "keep", "me").await;
        create(&mut view, &backend, "A", "B").await;
        let id = view.notes()[1].id;
        backend.fail_creates(true);

        view.start_editing(id);
        view.set_title("A2");
        let cmd = view.submit().unwrap();
        view.dispatch(&backend, cmd).await;

        assert_eq!(view.notes().len(), 1);
        assert_eq!(backend.notes().len(), 1);
        assert!(view.error().unwrap().contains("original was deleted"));
        assert_eq!(view.recovery().map(|n| n.title.as_str()), Some("A"));
        // The typed edit survives as a create form.
        assert_eq!(view.phase(), Phase::CreateFormOpen);
        assert_eq!(view.form_fields().unwrap().title, "A2");

        backend.fail_creates(false);
        let cmd = view.restore_lost_note().unwrap();
        view.dispatch(&backend, cmd).await;
        assert!(view.recovery().is_none());
        assert_eq!(view.notes().len(), 2);
        assert!(view.notes().iter().any(|n| n.title == "A" && n.content == "B"));
    }

    #[tokio::test]
    async fn half_finished_edit_keeps_a_create_form_opened_meanwhile() {
        let backend = MemoryBackend::new();
        let mut view = mounted(&backend).await;
        create(&mut view, &backend, "A", "B").await;
        let id = view.notes()[0].id;
        backend.fail_creates(true);

        view.start_editing(id);
        view.set_title("A2");
        let cmd = view.submit().unwrap();

        // The user starts a new note while the edit is still running.
        view.open_create_form();
        view.set_title("typed while waiting");
        let outcome = execute(&backend, cmd).await;
        assert_eq!(view.apply(outcome), None);

        assert_eq!(view.phase(), Phase::CreateFormOpen);
        assert_eq!(
            view.form_fields().map(|f| f.title.as_str()),
            Some("typed while waiting")
        );
        assert_eq!(view.recovery().map(|n| n.id), Some(id));
        assert!(view.notes().is_empty());
    }

    #[tokio::test]
    async fn refresh_keeps_an_open_form_on_screen() {
        let backend = MemoryBackend::new();
        let mut view = NotesView::new();
        assert!(view.shows_loading_placeholder());
        let cmd = view.mount();
        view.dispatch(&backend, cmd).await;
        assert!(!view.shows_loading_placeholder());

        view.open_create_form();
        view.set_title("half typed");
        let cmd = view.refresh().unwrap();
        assert!(view.is_loading());
        assert!(!view.shows_loading_placeholder());

        view.dispatch(&backend, cmd).await;
        assert_eq!(view.form_fields().map(|f| f.title.as_str()), Some("half typed"));
    }

    #[tokio::test]
    async fn cancelling_forms_sends_nothing() {
        let backend = MemoryBackend::new();
        let mut view = mounted(&backend).await;
        create(&mut view, &backend, "A", "B").await;
        let calls = backend.calls();
        let before = view.notes().to_vec();

        view.open_create_form();
        view.set_title("draft");
        view.close_create_form();
        assert_eq!(view.phase(), Phase::List);

        view.start_editing(before[0].id);
        view.set_title("changed");
        view.cancel_editing();
        assert_eq!(view.phase(), Phase::List);

        assert_eq!(view.notes(), &before[..]);
        assert_eq!(backend.calls(), calls);
    }

    #[tokio::test]
    async fn forms_are_mutually_exclusive() {
        let backend = MemoryBackend::new();
        let mut view = mounted(&backend).await;
        create(&mut view, &backend, "A", "B").await;
        let id = view.notes()[0].id;

        view.open_create_form();
        assert!(view.start_editing(id));
        assert_eq!(view.phase(), Phase::EditFormOpen(id));

        view.open_create_form();
        assert_eq!(view.phase(), Phase::CreateFormOpen);
        assert!(view.editing().is_none());
        assert_eq!(view.form_fields(), Some(&FormState::default()));
    }

    #[test]
    fn overlapping_submissions_are_ignored() {
        let mut view = NotesView::new();
        view.apply(Outcome::Refreshed(Ok(Vec::new())));

        view.open_create_form();
        view.set_title("A");
        view.set_content("B");
        assert!(view.submit().is_some());
        assert_eq!(view.submit(), None);
        assert_eq!(view.refresh(), None);
        assert_eq!(view.in_flight(), Some(InFlight::Create));

        // The follow-up refresh keeps the guard until it lands.
        let next = view.apply(Outcome::Created(Ok(Note::new(NoteId(1), "A", "B"))));
        assert_eq!(next, Some(Command::Refresh));
        assert_eq!(view.in_flight(), Some(InFlight::Refresh));
        view.apply(Outcome::Refreshed(Ok(vec![Note::new(NoteId(1), "A", "B")])));
        assert!(!view.is_busy());
    }

    #[test]
    fn latest_fetch_replaces_the_list() {
        let mut view = NotesView::new();
        view.apply(Outcome::Refreshed(Ok(vec![Note::new(NoteId(1), "a", "x")])));
        view.apply(Outcome::Refreshed(Ok(vec![Note::new(NoteId(2), "b", "y")])));
        assert_eq!(view.notes(), &[Note::new(NoteId(2), "b", "y")]);
    }

    #[tokio::test]
    async fn full_session_scenario() {
        let backend = MemoryBackend::new();
        let mut view = NotesView::new();
        let cmd = view.mount();
        assert!(view.is_loading());
        view.dispatch(&backend, cmd).await;
        assert_eq!(view.phase(), Phase::List);
        assert!(view.notes().is_empty());

        create(&mut view, &backend, "A", "B").await;
        assert_eq!(view.notes(), &[Note::new(NoteId(1), "A", "B")]);

        view.start_editing(NoteId(1));
        view.set_title("A2");
        view.set_content("B2");
        let cmd = view.submit().unwrap();
        view.dispatch(&backend, cmd).await;
        assert_eq!(view.notes(), &[Note::new(NoteId(2), "A2", "B2")]);

        view.request_delete(NoteId(2));
        let cmd = view.confirm_delete().unwrap();
        view.dispatch(&backend, cmd).await;
        assert!(view.notes().is_empty());
        assert!(view.error().is_none());
    }
}
