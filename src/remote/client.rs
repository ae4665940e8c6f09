use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use super::error::{ApiError, Endpoint, check_status};
use super::NotesBackend;
use crate::core::note::{Note, NoteDraft, NoteId};
use crate::core::user::{Credential, TokenResponse, UserEnvelope, UserRecord};

/// HTTP client for the notes service and its auth routes.
///
/// The bearer credential is part of the client value rather than process-wide
/// state: whoever owns the client signs in and out. Clones share the
/// connection pool but carry their own copy of the credential.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    credential: Option<Credential>,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let trimmed = base_url.trim();
        let parsed = Url::parse(trimmed).map_err(|e| ApiError::InvalidBaseUrl {
            url: trimmed.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl {
                url: trimmed.to_string(),
                reason: "not a hierarchical URL".to_string(),
            });
        }
        let http = Client::builder().build()?;
        Ok(Self {
            base_url: parsed,
            credential: None,
            http,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Attach `Authorization: Bearer <token>` to every subsequent request.
    pub fn set_credential(&mut self, credential: Credential) {
        self.credential = Some(credential);
    }

    pub fn clear_credential(&mut self) {
        self.credential = None;
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    /// Create an account. The service may answer with an empty body, in which
    /// case the record is built from the submitted username.
    pub async fn register(&self, username: &str, password: &str) -> Result<UserRecord, ApiError> {
        log::debug!("Registering account {}", username);
        let body = self.send(self.register_request(username, password), Endpoint::Auth).await?;
        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok(UserRecord {
                id: None,
                username: username.to_string(),
            });
        }
        match serde_json::from_str::<UserRecord>(trimmed) {
            Ok(user) => Ok(user),
            Err(e) => {
                log::debug!("Register response was not a user record ({}), using submitted name", e);
                Ok(UserRecord {
                    id: None,
                    username: username.to_string(),
                })
            }
        }
    }

    /// Exchange a username and password for a token. Does not store it; see [`Self::sign_in`].
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        log::debug!("Requesting token for {}", username);
        let body = self.send(self.login_request(username, password), Endpoint::Auth).await?;
        decode(&body)
    }

    /// Log in and keep the returned token for subsequent requests.
    pub async fn sign_in(&mut self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let token = self.login(username, password).await?;
        self.set_credential(Credential::new(token.access_token.clone()));
        log::info!("Signed in as {}", username);
        Ok(token)
    }

    pub async fn current_user(&self) -> Result<UserRecord, ApiError> {
        let body = self.send(self.current_user_request(), Endpoint::Auth).await?;
        let envelope: UserEnvelope = decode(&body)?;
        Ok(envelope.user)
    }

    /// Delete by title through the id route template.
    ///
    /// The service matches the id route first, so a title that reads as a
    /// number would delete whichever note has that id. Such titles are refused.
    pub async fn delete_note_by_title(&self, title: &str) -> Result<(), ApiError> {
        if title.trim().parse::<NoteId>().is_ok() {
            return Err(ApiError::AmbiguousTitle(title.to_string()));
        }
        log::debug!("Deleting note titled {:?}", title);
        self.send(self.delete_request(title), Endpoint::Notes).await?;
        Ok(())
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Only fails for cannot-be-a-base URLs, which `new` rejects.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.credential {
            Some(credential) => builder.bearer_auth(credential.token()),
            None => builder,
        }
    }

    fn register_request(&self, username: &str, password: &str) -> RequestBuilder {
        self.request(Method::POST, self.endpoint(&["auth", ""]))
            .json(&serde_json::json!({ "username": username, "password": password }))
    }

    fn login_request(&self, username: &str, password: &str) -> RequestBuilder {
        // The token route reads an OAuth2 password form, not JSON.
        self.request(Method::POST, self.endpoint(&["auth", "token"]))
            .form(&[("username", username), ("password", password)])
    }

    fn current_user_request(&self) -> RequestBuilder {
        self.request(Method::GET, self.endpoint(&[""]))
    }

    fn list_request(&self) -> RequestBuilder {
        self.request(Method::GET, self.endpoint(&["notes"]))
    }

    fn create_request(&self, draft: &NoteDraft) -> RequestBuilder {
        self.request(Method::POST, self.endpoint(&["notes", "save"]))
            .json(draft)
    }

    fn delete_request(&self, key: &str) -> RequestBuilder {
        self.request(Method::DELETE, self.endpoint(&["notes", "delete", key]))
    }

    async fn send(&self, builder: RequestBuilder, endpoint: Endpoint) -> Result<String, ApiError> {
        let resp = builder.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        check_status(status, body, endpoint)
    }
}

impl NotesBackend for ApiClient {
    async fn list_notes(&self) -> Result<Vec<Note>, ApiError> {
        let body = self.send(self.list_request(), Endpoint::Notes).await?;
        let notes: Vec<Note> = decode(&body)?;
        log::debug!("Fetched {} notes", notes.len());
        Ok(notes)
    }

    async fn create_note(&self, draft: &NoteDraft) -> Result<Note, ApiError> {
        let body = self.send(self.create_request(draft), Endpoint::Notes).await?;
        let note: Note = decode(&body)?;
        log::debug!("Created note {}", note.id);
        Ok(note)
    }

    async fn delete_note(&self, id: NoteId) -> Result<(), ApiError> {
        self.send(self.delete_request(&id.to_string()), Endpoint::Notes).await?;
        log::debug!("Deleted note {}", id);
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    Ok(serde_json::from_str(body)?)
}
