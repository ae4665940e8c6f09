//! Headless client for the notes service.
//!
//! Mutations go through the same view state machine as the desktop app. The
//! password is read from `NOTEKEEP_PASSWORD`. Server and user default to the
//! desktop app's stored settings.

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};
use notekeep::config::NotesConfig;
use notekeep::core::note::NoteId;
use notekeep::remote::{ApiClient, ApiError};
use notekeep::view::NotesView;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("no server configured; pass --server")]
    MissingServer,
    #[error("set NOTEKEEP_PASSWORD to sign in")]
    MissingPassword,
    #[error("no user given; pass --user or sign in once from the desktop app")]
    MissingUser,
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("{0}")]
    View(String),
    #[error("failed to read confirmation: {0}")]
    Io(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "notekeep-cli")]
#[command(about = "Headless client for the notes service")]
#[command(version)]
struct Cli {
    /// Base URL of the notes service (defaults to the desktop app's setting)
    #[arg(long, global = true, value_name = "URL")]
    server: Option<String>,

    /// Account to sign in as (defaults to the last desktop sign-in)
    #[arg(long, global = true, value_name = "NAME")]
    user: Option<String>,

    /// Account password; prefer the environment variable over the flag
    #[arg(long, global = true, env = "NOTEKEEP_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Action {
    /// Print every note
    List,
    /// Create a note
    Add { title: String, content: String },
    /// Replace a note with new title and content
    Edit { id: NoteId, title: String, content: String },
    /// Delete a note, asking first
    Rm {
        id: NoteId,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Delete a note by its title
    RmTitle { title: String },
    /// Show the signed-in user
    Whoami,
    /// Create the account, then sign in
    Register,
}

fn print_notes(view: &NotesView) {
    if view.notes().is_empty() {
        println!("No notes yet.");
        return;
    }
    for note in view.notes() {
        println!("[{}] {}", note.id, note.title);
        for line in note.content.lines() {
            println!("    {}", line);
        }
    }
}

/// Surface whatever error the last dispatch left on the view.
fn check_view(view: &NotesView) -> Result<(), CliError> {
    match view.error() {
        Some(message) => Err(CliError::View(message.to_string())),
        None => Ok(()),
    }
}

fn confirm(prompt: &str) -> Result<bool, CliError> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

/// Fetch the list so the view knows which notes exist.
async fn loaded_view(client: &ApiClient) -> Result<NotesView, CliError> {
    let mut view = NotesView::new();
    let first = view.mount();
    view.dispatch(client, first).await;
    check_view(&view)?;
    Ok(view)
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let (_, config) = NotesConfig::load();
    if cli.server.is_none() && !config.server_ready() {
        return Err(CliError::MissingServer);
    }
    let server = cli.server.unwrap_or(config.server_url);
    let username = cli
        .user
        .or_else(|| Some(config.username).filter(|u| !u.trim().is_empty()))
        .ok_or(CliError::MissingUser)?;
    let password = cli.password.ok_or(CliError::MissingPassword)?;

    let mut client = ApiClient::new(&server)?;
    log::info!("Using {} as {}", client.base_url(), username);

    if cli.action == Action::Register {
        let user = client.register(&username, &password).await?;
        println!("Registered {}", user.username);
    }
    client.sign_in(&username, &password).await?;

    match cli.action {
        Action::List => {
            let view = loaded_view(&client).await?;
            print_notes(&view);
        }

        Action::Add { title, content } => {
            let mut view = loaded_view(&client).await?;
            view.open_create_form();
            view.set_title(title);
            view.set_content(content);
            let Some(command) = view.submit() else {
                return check_view(&view);
            };
            view.dispatch(&client, command).await;
            check_view(&view)?;
            print_notes(&view);
        }

        Action::Edit { id, title, content } => {
            let mut view = loaded_view(&client).await?;
            if !view.start_editing(id) {
                return Err(CliError::View(format!("No note with id {}", id)));
            }
            view.set_title(title);
            view.set_content(content);
            let Some(command) = view.submit() else {
                return check_view(&view);
            };
            view.dispatch(&client, command).await;
            if let Some(lost) = view.recovery() {
                eprintln!("Original note, not saved on the server:");
                eprintln!("  {}", lost.title);
                for line in lost.content.lines() {
                    eprintln!("    {}", line);
                }
            }
            check_view(&view)?;
            print_notes(&view);
        }

        Action::Rm { id, yes } => {
            let mut view = loaded_view(&client).await?;
            let Some(note) = view.notes().iter().find(|n| n.id == id) else {
                return Err(CliError::View(format!("No note with id {}", id)));
            };
            let prompt = format!("Delete \"{}\"?", note.title);
            if !yes && !confirm(&prompt)? {
                println!("Kept.");
                return Ok(());
            }
            view.request_delete(id);
            if let Some(command) = view.confirm_delete() {
                view.dispatch(&client, command).await;
            }
            check_view(&view)?;
            print_notes(&view);
        }

        Action::RmTitle { title } => {
            client.delete_note_by_title(&title).await?;
            println!("Deleted \"{}\"", title);
        }

        Action::Whoami => {
            let user = client.current_user().await?;
            match user.id {
                Some(id) => println!("{} (id {})", user.username, id),
                None => println!("{}", user.username),
            }
        }

        Action::Register => println!("Signed in as {}", username),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    notekeep::logging::init("notekeep-cli");

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        log::error!("Command failed: {}", e);
        return Err(e.into());
    }
    Ok(())
}
