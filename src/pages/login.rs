use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, row, text, text_input};
use cosmic::Element;

use crate::application::AuthForm;
use crate::fl;
use crate::message::{AuthField, AuthMode, Message};

const FORM_WIDTH: f32 = 360.0;

pub fn login_view<'a>(form: &'a AuthForm, debug_logging: bool) -> Element<'a, Message> {
    let mut content = column().spacing(12);

    let (heading, submit_label, switch_label, switch_to) = match form.mode {
        AuthMode::SignIn => (
            fl!("login-title"),
            fl!("sign-in"),
            fl!("switch-to-register"),
            AuthMode::Register,
        ),
        AuthMode::Register => (
            fl!("register-title"),
            fl!("create-account"),
            fl!("switch-to-sign-in"),
            AuthMode::SignIn,
        ),
    };

    content = content.push(text::title4(heading));

    content = content.push(
        text_input::text_input(fl!("server-url"), &form.server_url)
            .on_input(|v| Message::SetAuthField(AuthField::ServerUrl, v))
            .width(Length::Fill),
    );
    content = content.push(
        text_input::text_input(fl!("username"), &form.username)
            .on_input(|v| Message::SetAuthField(AuthField::Username, v))
            .width(Length::Fill),
    );
    content = content.push(
        text_input::secure_input(fl!("password"), form.password.clone(), None::<Message>, true)
            .on_input(|v| Message::SetAuthField(AuthField::Password, v))
            .on_submit(|_| Message::SubmitAuth)
            .width(Length::Fill),
    );

    let mut submit = button::suggested(submit_label);
    if !form.busy {
        submit = submit.on_press(Message::SubmitAuth);
    }
    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(submit)
            .push(button::text(switch_label).on_press(Message::SetAuthMode(switch_to))),
    );

    if let Some(ref status) = form.status {
        content = content.push(text::body(status.clone()));
    }

    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(text::caption(fl!("debug-logging")).width(Length::Fill))
            .push(
                cosmic::widget::toggler(debug_logging)
                    .on_toggle(|_| Message::ToggleDebugLogging),
            ),
    );

    container(container(content).width(Length::Fixed(FORM_WIDTH)).padding(24))
        .center_x(Length::Fill)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
