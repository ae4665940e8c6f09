use cosmic::iced::{Alignment, Length};
use cosmic::widget::{
    button, column, container, flex_row, icon, row, scrollable, text, text_editor, text_input,
};
use cosmic::{Element, theme};

use notekeep::core::note::{FormState, Note};
use notekeep::view::{ActiveForm, NotesView};

use crate::fl;
use crate::message::Message;

const CARD_WIDTH: f32 = 280.0;
const PREVIEW_LINES: usize = 4;

fn error_banner<'a>(message: &str) -> Element<'a, Message> {
    container(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(text::body(message.to_string()).width(Length::Fill))
            .push(
                button::icon(icon::from_name("window-close-symbolic"))
                    .on_press(Message::DismissError),
            ),
    )
    .padding(12)
    .width(Length::Fill)
    .class(theme::Container::Card)
    .into()
}

fn form_card<'a>(
    heading: String,
    submit_label: String,
    on_cancel: Message,
    fields: &'a FormState,
    editor: &'a text_editor::Content,
    busy: bool,
) -> Element<'a, Message> {
    let mut col = column().spacing(8);

    col = col.push(
        row()
            .align_y(Alignment::Center)
            .push(text::title4(heading).width(Length::Fill))
            .push(button::icon(icon::from_name("window-close-symbolic")).on_press(on_cancel.clone())),
    );

    col = col.push(text::caption(fl!("note-title")));
    col = col.push(
        text_input::text_input(fl!("note-title-placeholder"), &fields.title)
            .on_input(Message::FormTitleChanged)
            .on_submit(|_| Message::SubmitForm)
            .width(Length::Fill),
    );

    col = col.push(text::caption(fl!("note-content")));
    col = col.push(
        container(
            text_editor(editor)
                .on_action(Message::FormEditorAction)
                .height(Length::Fixed(120.0)),
        )
        .width(Length::Fill),
    );

    let mut save = button::suggested(submit_label);
    if !busy {
        save = save.on_press(Message::SubmitForm);
    }
    col = col.push(
        row()
            .spacing(8)
            .push(button::standard(fl!("cancel")).on_press(on_cancel))
            .push(save),
    );

    container(col)
        .padding(16)
        .width(Length::Fill)
        .class(theme::Container::Card)
        .into()
}

fn note_card<'a>(note: &Note, confirming_delete: bool, actions_enabled: bool) -> Element<'a, Message> {
    let note_id = note.id;
    let mut col = column().spacing(6);

    let mut header = row()
        .spacing(4)
        .align_y(Alignment::Center)
        .push(text::body(note.title.clone()).width(Length::Fill));
    if actions_enabled {
        header = header
            .push(
                button::icon(icon::from_name("document-edit-symbolic"))
                    .on_press(Message::StartEditing(note_id)),
            )
            .push(
                button::icon(icon::from_name("edit-delete-symbolic"))
                    .on_press(Message::RequestDelete(note_id)),
            );
    }
    col = col.push(header);

    col = col.push(text::caption(note.preview(PREVIEW_LINES)).size(12.0));

    if confirming_delete {
        col = col.push(text::caption(fl!("delete-confirm")));
        col = col.push(
            row()
                .spacing(8)
                .push(button::destructive(fl!("delete")).on_press(Message::ConfirmDelete))
                .push(button::standard(fl!("cancel")).on_press(Message::CancelDelete)),
        );
    }

    container(col)
        .padding(12)
        .width(Length::Fixed(CARD_WIDTH))
        .class(theme::Container::Card)
        .into()
}

pub fn notes_view<'a>(view: &'a NotesView, editor: &'a text_editor::Content) -> Element<'a, Message> {
    if view.shows_loading_placeholder() {
        return container(text::body(fl!("notes-loading")))
            .padding(32)
            .center_x(Length::Fill)
            .width(Length::Fill)
            .into();
    }

    let mut content = column().spacing(12);

    content = content.push(text::title4(fl!("notes-title")));
    content = content.push(text::caption(fl!("notes-subtitle")));

    if let Some(message) = view.error() {
        content = content.push(error_banner(message));
    }

    if let Some(lost) = view.recovery() {
        let mut restore = button::standard(fl!("restore-note", title = lost.title.clone()));
        if !view.is_busy() {
            restore = restore.on_press(Message::RestoreLostNote);
        }
        content = content.push(restore);
    }

    let mut new_note = button::suggested(fl!("new-note"));
    if !view.is_busy() {
        new_note = new_note.on_press(Message::OpenCreateForm);
    }
    content = content.push(new_note);

    match view.form() {
        ActiveForm::None => {}
        ActiveForm::Create(fields) => {
            content = content.push(form_card(
                fl!("new-note"),
                fl!("save-note"),
                Message::CloseCreateForm,
                fields,
                editor,
                view.is_busy(),
            ));
        }
        ActiveForm::Edit { form, .. } => {
            content = content.push(form_card(
                fl!("edit-note"),
                fl!("update-note"),
                Message::CancelEditing,
                form,
                editor,
                view.is_busy(),
            ));
        }
    }

    if view.notes().is_empty() {
        content = content.push(
            container(
                column()
                    .spacing(4)
                    .push(text::body(fl!("notes-empty")))
                    .push(text::caption(fl!("notes-empty-hint"))),
            )
            .padding(32)
            .center_x(Length::Fill)
            .width(Length::Fill),
        );
    } else {
        // Editing and deleting are list actions; hide them while a form is open.
        let actions_enabled = matches!(view.form(), ActiveForm::None) && !view.is_busy();
        let cards: Vec<Element<'a, Message>> = view
            .notes()
            .iter()
            .map(|note| note_card(note, view.pending_delete() == Some(note.id), actions_enabled))
            .collect();

        content = content.push(flex_row(cards).row_spacing(12).column_spacing(12));
    }

    container(scrollable(content.padding(16).width(Length::Fill)))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
