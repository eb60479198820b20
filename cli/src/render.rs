use std::fmt::Write;

use contacts_core::{ContactsDesk, OperationKind};

/// Render the desk the way the page lays it out: count, error, then rows.
pub fn desk(desk: &ContactsDesk) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total contacts: {}", desk.total());
    let _ = writeln!(out, "API: {}/contacts", desk.client().base_url());
    if let Some(error) = desk.error() {
        let _ = writeln!(out, "error: {error}");
    }
    if desk.is_loading() {
        out.push_str("Loading...\n");
    } else if desk.contacts().is_empty() {
        out.push_str("No contacts yet. Add the first one with `contacts add`.\n");
    } else {
        for contact in desk.contacts() {
            let marker = match desk.busy_kind(contact.id) {
                Some(OperationKind::Update) => " [saving]",
                Some(OperationKind::Delete) => " [deleting]",
                _ if desk.session().is_editing(contact.id) => " [editing]",
                _ => "",
            };
            let _ = writeln!(
                out,
                "#{:<4} {}{}\n      Mobile: {}\n      Contact: {}",
                contact.id, contact.name, marker, contact.mobile, contact.contact_number
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use contacts_core::{ContactsClient, HttpResponse};

    use super::*;

    fn seeded(body: &str) -> ContactsDesk {
        let mut desk = ContactsDesk::new(ContactsClient::new("http://localhost:3001"));
        let pending = desk.begin_refresh();
        desk.complete(pending.ticket, Ok(HttpResponse::new(200, body)))
            .unwrap();
        desk
    }

    #[test]
    fn empty_list_shows_hint() {
        let text = desk(&seeded("[]"));
        assert!(text.starts_with("Total contacts: 0\n"));
        assert!(text.contains("API: http://localhost:3001/contacts"));
        assert!(text.contains("No contacts yet."));
    }

    #[test]
    fn rows_show_fields_and_edit_marker() {
        let mut d = seeded(
            r#"[{"id":3,"name":"Momin","mobile":"017","contactNumber":"018","createdAt":"t","updatedAt":"t"}]"#,
        );
        d.start_editing(3);
        let text = desk(&d);
        assert!(text.contains("#3    Momin [editing]"));
        assert!(text.contains("Mobile: 017"));
        assert!(text.contains("Contact: 018"));
    }
}
