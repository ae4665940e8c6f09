use cosmic::app::{Core, Task as CosmicTask};
use cosmic::cosmic_config::CosmicConfigEntry;
use cosmic::widget::{button, row, text, text_editor};
use cosmic::{Application, Element, executor};

use notekeep::config::NotesConfig;
use notekeep::core::user::UserRecord;
use notekeep::remote::{ApiClient, ApiError};
use notekeep::session::Session;
use notekeep::view::{self, ActiveForm, Command, NotesView};

use crate::fl;
use crate::message::{AuthField, AuthMode, Message};
use crate::pages;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Notes,
}

/// Login page inputs. The password never leaves this struct except for the sign-in call.
pub struct AuthForm {
    pub server_url: String,
    pub username: String,
    pub password: String,
    pub mode: AuthMode,
    pub busy: bool,
    pub status: Option<String>,
}

impl AuthForm {
    fn from_config(config: &NotesConfig) -> Self {
        Self {
            server_url: config.server_url.clone(),
            username: config.username.clone(),
            password: String::new(),
            mode: AuthMode::SignIn,
            busy: false,
            status: None,
        }
    }
}

pub struct NoteKeep {
    core: Core,
    config: NotesConfig,
    cosmic_config: Option<cosmic::cosmic_config::Config>,
    page: Page,
    auth_form: AuthForm,
    /// Signed-in client; `None` until the login completes.
    client: Option<ApiClient>,
    /// Moves on at every sign-in and sign-out; replies from older sessions are dropped.
    session: Session,
    current_user: Option<UserRecord>,
    notes: NotesView,
    /// Multi-line content of the open form, mirrored into the view on every edit.
    editor: text_editor::Content,
}

pub struct Flags {
    pub config: NotesConfig,
    pub cosmic_config: Option<cosmic::cosmic_config::Config>,
}

impl Application for NoteKeep {
    type Executor = executor::Default;
    type Flags = Flags;
    type Message = Message;

    const APP_ID: &'static str = notekeep::config::APP_ID;

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn init(core: Core, flags: Self::Flags) -> (Self, CosmicTask<Self::Message>) {
        let config = flags.config;
        let auth_form = AuthForm::from_config(&config);

        let app = Self {
            core,
            cosmic_config: flags.cosmic_config,
            page: Page::Login,
            auth_form,
            client: None,
            session: Session::default(),
            current_user: None,
            notes: NotesView::new(),
            editor: text_editor::Content::new(),
            config,
        };

        (app, CosmicTask::none())
    }

    fn header_end(&self) -> Vec<Element<'_, Message>> {
        if self.page != Page::Notes {
            return Vec::new();
        }

        let mut header_row = row().spacing(8);

        if let Some(ref user) = self.current_user {
            header_row = header_row.push(text::caption(fl!(
                "signed-in-as",
                username = user.username.clone()
            )));
        }
        if let Some(at) = self.notes.last_refreshed() {
            header_row = header_row.push(text::caption(fl!(
                "last-refreshed",
                time = at.format("%H:%M").to_string()
            )));
        }

        let mut refresh = button::standard(fl!("refresh"));
        if !self.notes.is_busy() {
            refresh = refresh.on_press(Message::Refresh);
        }
        header_row = header_row.push(refresh).push(
            button::standard(fl!("sign-out")).on_press(Message::SignOut),
        );

        vec![header_row.into()]
    }

    fn update(&mut self, message: Message) -> CosmicTask<Message> {
        match message {
            // Login
            Message::SetAuthField(field, value) => match field {
                AuthField::ServerUrl => self.auth_form.server_url = value,
                AuthField::Username => self.auth_form.username = value,
                AuthField::Password => self.auth_form.password = value,
            },

            Message::SetAuthMode(mode) => {
                self.auth_form.mode = mode;
                self.auth_form.status = None;
            }

            Message::SubmitAuth => return self.submit_auth(),

            Message::AuthCompleted(result) => {
                self.auth_form.busy = false;
                self.auth_form.password.clear();
                match result {
                    Ok(client) => return self.enter_notes(client),
                    Err(e) => {
                        log::warn!("Sign-in failed: {}", e);
                        self.auth_form.status = Some(auth_error_text(&e));
                    }
                }
            }

            Message::CurrentUserLoaded(stamp, _) if !self.session.accepts(stamp) => {
                log::debug!("Dropping user record from an earlier session");
            }

            Message::CurrentUserLoaded(_, result) => match result {
                Ok(user) => self.current_user = Some(user),
                Err(e) if e.is_unauthorized() => {
                    log::warn!("Token rejected: {}", e);
                    self.sign_out();
                    self.auth_form.status = Some(fl!("session-expired"));
                }
                Err(e) => log::error!("Failed to fetch current user: {}", e),
            },

            Message::SignOut => self.sign_out(),

            Message::ToggleDebugLogging => {
                self.config.debug_logging = !self.config.debug_logging;
                notekeep::set_debug_logging(self.config.debug_logging);
                self.save_config();
            }

            // Forms
            Message::OpenCreateForm => {
                self.notes.open_create_form();
                self.editor = text_editor::Content::new();
            }

            Message::CloseCreateForm => {
                self.notes.close_create_form();
                self.editor = text_editor::Content::new();
            }

            Message::StartEditing(id) => {
                if self.notes.start_editing(id) {
                    let content = self
                        .notes
                        .form_fields()
                        .map(|f| f.content.clone())
                        .unwrap_or_default();
                    self.editor = text_editor::Content::with_text(&content);
                }
            }

            Message::CancelEditing => {
                self.notes.cancel_editing();
                self.editor = text_editor::Content::new();
            }

            Message::FormTitleChanged(value) => self.notes.set_title(value),

            Message::FormEditorAction(action) => {
                self.editor.perform(action);
                self.notes.set_content(self.editor.text());
            }

            Message::SubmitForm => {
                if let Some(command) = self.notes.submit() {
                    return self.run(command);
                }
            }

            // Delete
            Message::RequestDelete(id) => self.notes.request_delete(id),

            Message::ConfirmDelete => {
                if let Some(command) = self.notes.confirm_delete() {
                    return self.run(command);
                }
            }

            Message::CancelDelete => self.notes.cancel_delete(),

            Message::RestoreLostNote => {
                if let Some(command) = self.notes.restore_lost_note() {
                    return self.run(command);
                }
            }

            Message::Refresh => {
                if let Some(command) = self.notes.refresh() {
                    return self.run(command);
                }
            }

            Message::DismissError => self.notes.dismiss_error(),

            Message::Remote(stamp, _) if !self.session.accepts(stamp) => {
                log::debug!("Dropping reply from an earlier session");
            }

            Message::Remote(_, outcome) => {
                let next = self.notes.apply(outcome);
                if matches!(self.notes.form(), ActiveForm::None) {
                    self.editor = text_editor::Content::new();
                }
                if let Some(command) = next {
                    return self.run(command);
                }
            }
        }

        CosmicTask::none()
    }

    fn view(&self) -> Element<'_, Message> {
        match self.page {
            Page::Login => pages::login::login_view(&self.auth_form, self.config.debug_logging),
            Page::Notes => pages::notes::notes_view(&self.notes, &self.editor),
        }
    }
}

impl NoteKeep {
    fn submit_auth(&mut self) -> CosmicTask<Message> {
        if self.auth_form.busy {
            return CosmicTask::none();
        }
        let username = self.auth_form.username.trim().to_string();
        let password = self.auth_form.password.clone();
        if username.is_empty() || password.is_empty() {
            return CosmicTask::none();
        }

        let mut client = match ApiClient::new(&self.auth_form.server_url) {
            Ok(client) => client,
            Err(e) => {
                self.auth_form.status = Some(e.to_string());
                return CosmicTask::none();
            }
        };

        self.auth_form.busy = true;
        self.auth_form.status = Some(fl!("signing-in"));
        let register = self.auth_form.mode == AuthMode::Register;

        CosmicTask::perform(
            async move {
                if register {
                    client.register(&username, &password).await?;
                }
                client.sign_in(&username, &password).await?;
                Ok::<_, ApiError>(client)
            },
            |result| cosmic::Action::App(Message::AuthCompleted(result)),
        )
    }

    /// Store the signed-in client, remember the server, and load the notes.
    fn enter_notes(&mut self, client: ApiClient) -> CosmicTask<Message> {
        self.config.server_url = client.base_url().to_string();
        self.config.username = self.auth_form.username.trim().to_string();
        self.save_config();

        self.auth_form.status = None;
        self.page = Page::Notes;
        self.notes = NotesView::new();
        self.editor = text_editor::Content::new();

        let user_client = client.clone();
        self.client = Some(client);
        let session = self.session.advance();
        let first_load = self.notes.mount();

        CosmicTask::batch(vec![
            self.run(first_load),
            CosmicTask::perform(
                async move { user_client.current_user().await },
                move |result| cosmic::Action::App(Message::CurrentUserLoaded(session, result)),
            ),
        ])
    }

    fn sign_out(&mut self) {
        if let Some(ref mut client) = self.client {
            client.clear_credential();
        }
        self.client = None;
        self.session.advance();
        self.current_user = None;
        self.notes = NotesView::new();
        self.editor = text_editor::Content::new();
        self.page = Page::Login;
        log::info!("Signed out");
    }

    /// Run a view command against the signed-in client and feed the outcome back.
    fn run(&self, command: Command) -> CosmicTask<Message> {
        let Some(client) = self.client.clone() else {
            log::warn!("Dropping {:?}: not signed in", command);
            return CosmicTask::none();
        };
        let session = self.session;
        CosmicTask::perform(
            async move { view::execute(&client, command).await },
            move |outcome| cosmic::Action::App(Message::Remote(session, outcome)),
        )
    }

    fn save_config(&self) {
        if let Some(ref handle) = self.cosmic_config {
            if let Err(e) = self.config.write_entry(handle) {
                log::error!("Failed to save config: {:?}", e);
            }
        }
    }
}

fn auth_error_text(e: &ApiError) -> String {
    match e {
        ApiError::Auth { status, .. } if status.as_u16() == 401 => fl!("auth-invalid"),
        ApiError::Auth { body, .. } => fl!("auth-rejected", reason = body.clone()),
        ApiError::Transport(_) => fl!("auth-unreachable"),
        other => other.to_string(),
    }
}
