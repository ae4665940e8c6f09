use std::fmt;

use serde::{Deserialize, Serialize};

/// Longest title the notes service will store.
pub const MAX_TITLE_CHARS: usize = 100;

/// Server-assigned note identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub i64);

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for NoteId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(NoteId)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    // The save endpoint answers with `note_id`, the list endpoint with `id`.
    #[serde(alias = "note_id")]
    pub id: NoteId,
    pub title: String,
    pub content: String,
}

impl Note {
    pub fn new(id: NoteId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
        }
    }

    /// First few lines of the content, for card previews.
    pub fn preview(&self, lines: usize) -> String {
        self.content.lines().take(lines).collect::<Vec<_>>().join("\n")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Please fill in both title and content")]
    BlankTitle,
    #[error("Please fill in both title and content")]
    BlankContent,
    #[error("Title must be at most {} characters", MAX_TITLE_CHARS)]
    TitleTooLong,
}

/// Raw contents of the create or edit form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub title: String,
    pub content: String,
}

impl FormState {
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
        }
    }

    pub fn validate(&self) -> Result<NoteDraft, FormError> {
        NoteDraft::new(&self.title, &self.content)
    }
}

/// A trimmed, non-blank title/content pair ready to send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteDraft {
    title: String,
    content: String,
}

impl NoteDraft {
    pub fn new(title: &str, content: &str) -> Result<Self, FormError> {
        let title = title.trim();
        let content = content.trim();
        if title.is_empty() {
            return Err(FormError::BlankTitle);
        }
        if content.is_empty() {
            return Err(FormError::BlankContent);
        }
        if title.chars().count() > MAX_TITLE_CHARS {
            return Err(FormError::TitleTooLong);
        }
        Ok(Self {
            title: title.to_string(),
            content: content.to_string(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl From<&Note> for NoteDraft {
    fn from(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_trims_both_fields() {
        let draft = NoteDraft::new("  Groceries \n", "\tmilk, eggs  ").unwrap();
        assert_eq!(draft.title(), "Groceries");
        assert_eq!(draft.content(), "milk, eggs");
    }

    #[test]
    fn whitespace_only_fields_are_blank() {
        assert_eq!(NoteDraft::new("   ", "body"), Err(FormError::BlankTitle));
        assert_eq!(NoteDraft::new("title", " \n\t "), Err(FormError::BlankContent));
        assert_eq!(NoteDraft::new("", ""), Err(FormError::BlankTitle));
    }

    #[test]
    fn title_limit_counts_chars_not_bytes() {
        let at_limit = "é".repeat(MAX_TITLE_CHARS);
        assert!(NoteDraft::new(&at_limit, "x").is_ok());

        let over = "a".repeat(MAX_TITLE_CHARS + 1);
        assert_eq!(NoteDraft::new(&over, "x"), Err(FormError::TitleTooLong));
    }

    #[test]
    fn blank_errors_share_the_banner_text() {
        assert_eq!(
            FormError::BlankTitle.to_string(),
            "Please fill in both title and content"
        );
        assert_eq!(
            FormError::BlankContent.to_string(),
            FormError::BlankTitle.to_string()
        );
    }

    #[test]
    fn decode_list_item_and_save_response() {
        let listed: Note =
            serde_json::from_str(r#"{"id": 3, "title": "A", "content": "B"}"#).unwrap();
        assert_eq!(listed, Note::new(NoteId(3), "A", "B"));

        let saved: Note =
            serde_json::from_str(r#"{"note_id": 4, "title": "A", "content": "B"}"#).unwrap();
        assert_eq!(saved.id, NoteId(4));
    }

    #[test]
    fn draft_serializes_as_request_body() {
        let draft = NoteDraft::new("A", "B").unwrap();
        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(body, serde_json::json!({"title": "A", "content": "B"}));
    }

    #[test]
    fn preview_keeps_leading_lines() {
        let note = Note::new(NoteId(1), "t", "one\ntwo\nthree");
        assert_eq!(note.preview(2), "one\ntwo");
    }
}
