use std::process::ExitCode;

use clap::{Parser, Subcommand};
use contacts_core::{ContactId, ContactsClient, ContactsDesk, SubmitError};
use tracing_subscriber::EnvFilter;

mod render;
mod transport;

use transport::UreqTransport;

#[derive(Parser, Debug)]
#[command(name = "contacts")]
#[command(author, version, about = "Manage names, mobile numbers, and contact numbers")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Base address of the contacts API
    #[arg(long, global = true, env = "CONTACTS_API_BASE_URL", default_value = "http://localhost:3001")]
    base_url: String,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Show every contact, newest first
    List,
    /// Add a new contact
    Add {
        #[arg(long)]
        name: String,
        /// Must start with 01; non-digits are stripped
        #[arg(long)]
        mobile: String,
        #[arg(long, default_value = "")]
        contact_number: String,
    },
    /// Change fields of an existing contact
    Edit {
        id: ContactId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        mobile: Option<String>,
        #[arg(long)]
        contact_number: Option<String>,
    },
    /// Delete a contact
    Delete { id: ContactId },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle(desk: &mut ContactsDesk, transport: &mut UreqTransport, cmd: &Command) -> Result<(), SubmitError> {
    desk.refresh(transport)?;
    match cmd {
        Command::List => {}
        Command::Add {
            name,
            mobile,
            contact_number,
        } => {
            desk.set_form_name(name);
            desk.set_form_mobile(mobile);
            desk.set_form_contact_number(contact_number);
            desk.create(transport)?;
        }
        Command::Edit {
            id,
            name,
            mobile,
            contact_number,
        } => {
            if !desk.start_editing(*id) {
                return Err(SubmitError::NotEditing(*id));
            }
            let session = desk.session_mut();
            if let Some(name) = name {
                session.set_name(name);
            }
            if let Some(mobile) = mobile {
                session.set_mobile(mobile);
            }
            if let Some(contact_number) = contact_number {
                session.set_contact_number(contact_number);
            }
            desk.update(*id, transport)?;
        }
        Command::Delete { id } => {
            desk.delete(*id, transport)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let mut desk = ContactsDesk::new(ContactsClient::new(&cli.base_url));
    let mut transport = UreqTransport::new();

    let result = handle(&mut desk, &mut transport, &cli.command);
    print!("{}", render::desk(&desk));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(SubmitError::NotEditing(id)) => {
            eprintln!("no contact with id {id}");
            ExitCode::FAILURE
        }
        // The message is already part of the rendered desk.
        Err(_) => ExitCode::FAILURE,
    }
}
