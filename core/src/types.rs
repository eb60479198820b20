//! Domain DTOs for the contacts API.
//!
//! # Design
//! These types mirror the server's schema but are defined independently so
//! the core never links against axum. Integration tests catch any schema
//! drift between the two crates. Timestamps stay as opaque strings: the
//! store assigns them and the client only carries them through.

use serde::{Deserialize, Serialize};

/// Server-assigned contact identifier.
pub type ContactId = i64;

/// A single contact as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub mobile: String,
    pub contact_number: String,
    pub created_at: String,
    pub updated_at: String,
}

/// The editable fields of a contact.
///
/// Used as the create payload, as the create form, and as the edit draft.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactInput {
    pub name: String,
    pub mobile: String,
    pub contact_number: String,
}

impl ContactInput {
    pub fn new(name: &str, mobile: &str, contact_number: &str) -> Self {
        Self {
            name: name.to_string(),
            mobile: mobile.to_string(),
            contact_number: contact_number.to_string(),
        }
    }
}

impl From<&Contact> for ContactInput {
    fn from(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            mobile: contact.mobile.clone(),
            contact_number: contact.contact_number.clone(),
        }
    }
}

/// Request payload for updating an existing contact. Only the fields present
/// in the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
}

impl From<ContactInput> for UpdateContact {
    fn from(input: ContactInput) -> Self {
        Self {
            name: Some(input.name),
            mobile: Some(input.mobile),
            contact_number: Some(input.contact_number),
        }
    }
}
