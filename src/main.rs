use cosmic::app::Settings;
use cosmic::iced::Limits;

mod application;
mod localize;
mod message;
mod pages;

use application::{Flags, NoteKeep};
use notekeep::config::NotesConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    notekeep::logging::init("notekeep");

    let (cosmic_config, config) = NotesConfig::load();
    notekeep::set_debug_logging(config.debug_logging);

    localize::localize();

    let settings = Settings::default().size_limits(Limits::NONE.min_width(400.0).min_height(300.0));

    let flags = Flags { config, cosmic_config };
    cosmic::app::run::<NoteKeep>(settings, flags)?;

    Ok(())
}
