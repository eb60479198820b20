//! Error types for the contacts client and the submission controller.
//!
//! # Design
//! `ApiError` is what a single HTTP exchange can fail with. `SubmitError` is
//! what the controller surfaces to the user: either a local validation
//! failure, or a failed operation whose message is fixed per operation
//! kind. The underlying `ApiError` is kept as the source for logging but is
//! never shown as the user-facing message.

use thiserror::Error;

use crate::types::ContactId;

/// Errors returned by `ContactsClient` parse methods and by transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404; the requested contact does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request never produced a response (connection refused, reset, ...).
    #[error("transport failed: {0}")]
    Transport(String),
}

/// The mobile field failed the format rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Mobile must start with 01 and contain digits only.")]
pub struct ValidationError;

/// Which controller operation an error or busy marker belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Refresh,
    Create,
    Update,
    Delete,
}

impl OperationKind {
    /// The fixed message shown when this operation fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            OperationKind::Refresh => "Failed to load contacts.",
            OperationKind::Create => "Failed to create contact.",
            OperationKind::Update => "Failed to update contact.",
            OperationKind::Delete => "Failed to delete contact.",
        }
    }
}

/// Errors surfaced by `ContactsDesk` operations.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{}", .kind.failure_message())]
    Failed {
        kind: OperationKind,
        #[source]
        source: ApiError,
    },

    /// An update was requested for a record that is not being edited.
    #[error("contact {0} is not being edited")]
    NotEditing(ContactId),

    /// The ticket does not match any operation in flight.
    #[error("unknown or already completed request")]
    UnknownTicket,
}
