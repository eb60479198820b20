//! Client core for the contacts service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps the client-side
//! view of the contact list in sync with the server.
//!
//! # Design
//! - `ContactsClient` is stateless; it holds only `base_url`.
//! - `ContactsDesk` owns all UI state (list, edit draft, create form, error
//!   message, requests in flight) and only mutates the list from server
//!   responses.
//! - Hosts plug their HTTP stack in through `Transport`, or drive the
//!   `begin_*` / `complete` pairs themselves when the I/O is asynchronous.
//! - DTOs are defined independently from the server crate; integration
//!   tests catch schema drift.

pub mod cache;
pub mod client;
pub mod controller;
pub mod error;
pub mod http;
pub mod session;
pub mod transport;
pub mod types;
pub mod validate;

pub use cache::ContactList;
pub use client::ContactsClient;
pub use controller::{Completion, ContactsDesk, PendingRequest, Ticket};
pub use error::{ApiError, OperationKind, SubmitError, ValidationError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use session::EditSession;
pub use transport::Transport;
pub use types::{Contact, ContactId, ContactInput, UpdateContact};
pub use validate::{is_valid_mobile, sanitize_mobile};
