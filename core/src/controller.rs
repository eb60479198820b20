//! Submission controller: validate, issue, reconcile.
//!
//! # Design
//! `ContactsDesk` is the single owned state object behind the contacts
//! page: the list cache, the edit session, the create form, the error slot
//! and the set of requests in flight. It follows the same host-does-IO split
//! as `ContactsClient`: every operation has a `begin_*` half that validates
//! and returns a `PendingRequest`, and `complete` consumes the host's result
//! for that request. `refresh`/`create`/`update`/`delete` chain both halves
//! through a `Transport` for hosts that are happy to block.
//!
//! Nothing touches the cache or the session before the server has answered.
//! A failed operation only sets the error message, so there is nothing to
//! roll back.
//!
//! Busy state is derived from the requests in flight, so several records can
//! be busy at once and a marker disappears exactly when its request
//! completes, whatever the outcome.
//!
//! Every `begin_*` takes the next sequence number. For each record the desk
//! remembers the sequence of the last operation it applied and discards
//! results older than that. A list response is discarded only once a newer
//! list response has been applied; otherwise it replaces the cache and the
//! mutations confirmed after it was requested are replayed on top.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, warn};

use crate::cache::ContactList;
use crate::client::ContactsClient;
use crate::error::{ApiError, OperationKind, SubmitError};
use crate::http::{HttpRequest, HttpResponse};
use crate::session::EditSession;
use crate::transport::Transport;
use crate::types::{Contact, ContactId, ContactInput, UpdateContact};
use crate::validate::{check_mobile, sanitize_mobile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingOp {
    Refresh,
    Create,
    Update(ContactId),
    Delete(ContactId),
}

impl PendingOp {
    fn kind(self) -> OperationKind {
        match self {
            PendingOp::Refresh => OperationKind::Refresh,
            PendingOp::Create => OperationKind::Create,
            PendingOp::Update(_) => OperationKind::Update,
            PendingOp::Delete(_) => OperationKind::Delete,
        }
    }

    fn record_id(self) -> Option<ContactId> {
        match self {
            PendingOp::Update(id) | PendingOp::Delete(id) => Some(id),
            PendingOp::Refresh | PendingOp::Create => None,
        }
    }
}

/// Identifies one request in flight. Hand it back to `ContactsDesk::complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    seq: u64,
    op: PendingOp,
}

impl Ticket {
    pub fn kind(&self) -> OperationKind {
        self.op.kind()
    }

    pub fn record_id(&self) -> Option<ContactId> {
        self.op.record_id()
    }
}

/// A request the host must execute, tagged with its ticket.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub ticket: Ticket,
    pub request: HttpRequest,
}

/// A mutation the server confirmed, kept so it can be replayed over a list
/// that was requested before it.
#[derive(Debug, Clone)]
enum Confirmed {
    Created(Contact),
    Updated(ContactId, Contact),
    Deleted(ContactId),
}

/// What `complete` did with a successful response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer result for the same data had already been applied.
    Discarded,
}

#[derive(Debug)]
pub struct ContactsDesk {
    client: ContactsClient,
    contacts: ContactList,
    session: EditSession,
    form: ContactInput,
    error: Option<String>,
    next_seq: u64,
    in_flight: BTreeMap<u64, PendingOp>,
    applied: HashMap<ContactId, u64>,
    confirmed: Vec<(u64, Confirmed)>,
    last_list_applied: u64,
}

impl ContactsDesk {
    pub fn new(client: ContactsClient) -> Self {
        Self {
            client,
            contacts: ContactList::new(),
            session: EditSession::default(),
            form: ContactInput::default(),
            error: None,
            next_seq: 1,
            in_flight: BTreeMap::new(),
            applied: HashMap::new(),
            confirmed: Vec::new(),
            last_list_applied: 0,
        }
    }

    pub fn client(&self) -> &ContactsClient {
        &self.client
    }

    pub fn contacts(&self) -> &ContactList {
        &self.contacts
    }

    pub fn total(&self) -> usize {
        self.contacts.len()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // --- create form ---

    pub fn form(&self) -> &ContactInput {
        &self.form
    }

    pub fn set_form_name(&mut self, name: &str) {
        self.form.name = name.to_string();
    }

    pub fn set_form_mobile(&mut self, mobile: &str) {
        self.form.mobile = sanitize_mobile(mobile);
    }

    pub fn set_form_contact_number(&mut self, contact_number: &str) {
        self.form.contact_number = contact_number.to_string();
    }

    // --- edit session ---

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditSession {
        &mut self.session
    }

    /// Open the edit draft for a cached contact. Returns `false` if `id` is
    /// not in the list.
    pub fn start_editing(&mut self, id: ContactId) -> bool {
        match self.contacts.get(id) {
            Some(contact) => {
                self.session.start(contact);
                true
            }
            None => false,
        }
    }

    pub fn cancel_editing(&mut self) {
        self.session.cancel();
    }

    // --- busy state ---

    pub fn is_loading(&self) -> bool {
        self.in_flight.values().any(|op| *op == PendingOp::Refresh)
    }

    pub fn is_creating(&self) -> bool {
        self.in_flight.values().any(|op| *op == PendingOp::Create)
    }

    /// The most recently begun operation still in flight for `id`.
    pub fn busy_kind(&self, id: ContactId) -> Option<OperationKind> {
        self.in_flight
            .values()
            .rev()
            .find(|op| op.record_id() == Some(id))
            .map(|op| op.kind())
    }

    pub fn is_busy(&self, id: ContactId) -> bool {
        self.busy_kind(id).is_some()
    }

    // --- begin ---

    pub fn begin_refresh(&mut self) -> PendingRequest {
        self.error = None;
        let request = self.client.build_list();
        self.issue(PendingOp::Refresh, request)
    }

    pub fn begin_create(&mut self) -> Result<PendingRequest, SubmitError> {
        let mobile = self.form.mobile.clone();
        self.validate_mobile(&mobile)?;
        self.error = None;
        let request = self
            .client
            .build_create(&self.form)
            .map_err(|source| self.fail(OperationKind::Create, source))?;
        Ok(self.issue(PendingOp::Create, request))
    }

    /// Submit the edit draft for `id`.
    pub fn begin_update(&mut self, id: ContactId) -> Result<PendingRequest, SubmitError> {
        let draft = match &self.session {
            EditSession::Editing { id: editing, draft } if *editing == id => draft.clone(),
            _ => return Err(SubmitError::NotEditing(id)),
        };
        self.validate_mobile(&draft.mobile)?;
        self.error = None;
        let request = self
            .client
            .build_update(id, &UpdateContact::from(draft))
            .map_err(|source| self.fail(OperationKind::Update, source))?;
        Ok(self.issue(PendingOp::Update(id), request))
    }

    pub fn begin_delete(&mut self, id: ContactId) -> PendingRequest {
        self.error = None;
        let request = self.client.build_delete(id);
        self.issue(PendingOp::Delete(id), request)
    }

    // --- complete ---

    /// Apply the host's result for `ticket`. The busy marker for the ticket
    /// is cleared whatever the outcome.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        result: Result<HttpResponse, ApiError>,
    ) -> Result<Completion, SubmitError> {
        let op = self
            .in_flight
            .remove(&ticket.seq)
            .ok_or(SubmitError::UnknownTicket)?;
        let outcome = result.and_then(|response| self.reconcile(ticket.seq, op, response));
        self.prune();
        outcome.map_err(|source| self.fail(op.kind(), source))
    }

    // --- blocking convenience ---

    pub fn refresh<T: Transport>(&mut self, transport: &mut T) -> Result<Completion, SubmitError> {
        let pending = self.begin_refresh();
        self.run(pending, transport)
    }

    pub fn create<T: Transport>(&mut self, transport: &mut T) -> Result<Completion, SubmitError> {
        let pending = self.begin_create()?;
        self.run(pending, transport)
    }

    pub fn update<T: Transport>(
        &mut self,
        id: ContactId,
        transport: &mut T,
    ) -> Result<Completion, SubmitError> {
        let pending = self.begin_update(id)?;
        self.run(pending, transport)
    }

    pub fn delete<T: Transport>(
        &mut self,
        id: ContactId,
        transport: &mut T,
    ) -> Result<Completion, SubmitError> {
        let pending = self.begin_delete(id);
        self.run(pending, transport)
    }

    fn run<T: Transport>(
        &mut self,
        pending: PendingRequest,
        transport: &mut T,
    ) -> Result<Completion, SubmitError> {
        let result = transport.execute(pending.request);
        self.complete(pending.ticket, result)
    }

    // --- internals ---

    fn validate_mobile(&mut self, mobile: &str) -> Result<(), SubmitError> {
        check_mobile(mobile).map_err(|err| {
            self.error = Some(err.to_string());
            SubmitError::Validation(err)
        })
    }

    fn issue(&mut self, op: PendingOp, request: HttpRequest) -> PendingRequest {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.in_flight.insert(seq, op);
        debug!(seq, method = request.method.as_str(), path = %request.path, "issuing request");
        PendingRequest {
            ticket: Ticket { seq, op },
            request,
        }
    }

    fn fail(&mut self, kind: OperationKind, source: ApiError) -> SubmitError {
        warn!(?kind, error = %source, "contact operation failed");
        self.error = Some(kind.failure_message().to_string());
        SubmitError::Failed { kind, source }
    }

    fn reconcile(
        &mut self,
        seq: u64,
        op: PendingOp,
        response: HttpResponse,
    ) -> Result<Completion, ApiError> {
        match op {
            PendingOp::Refresh => {
                let list = self.client.parse_list(response)?;
                if seq < self.last_list_applied {
                    debug!(seq, "discarding stale contact list");
                    return Ok(Completion::Discarded);
                }
                self.contacts.replace_all(list);
                self.last_list_applied = seq;
                self.replay_after(seq);
                Ok(Completion::Applied)
            }
            PendingOp::Create => {
                let created = self.client.parse_create(response)?;
                if self.is_stale(created.id, seq) {
                    return Ok(Completion::Discarded);
                }
                self.mark_applied(created.id, seq, Confirmed::Created(created.clone()));
                self.contacts.insert_at_head(created);
                self.form = ContactInput::default();
                Ok(Completion::Applied)
            }
            PendingOp::Update(id) => {
                let updated: Contact = self.client.parse_update(response)?;
                if self.is_stale(id, seq) {
                    return Ok(Completion::Discarded);
                }
                self.mark_applied(id, seq, Confirmed::Updated(id, updated.clone()));
                self.contacts.replace_by_id(id, updated);
                self.session.finish(id);
                Ok(Completion::Applied)
            }
            PendingOp::Delete(id) => {
                self.client.parse_delete(response)?;
                if self.is_stale(id, seq) {
                    return Ok(Completion::Discarded);
                }
                self.mark_applied(id, seq, Confirmed::Deleted(id));
                self.contacts.remove_by_id(id);
                Ok(Completion::Applied)
            }
        }
    }

    fn is_stale(&self, id: ContactId, seq: u64) -> bool {
        let stale = self.applied.get(&id).is_some_and(|&last| last > seq);
        if stale {
            debug!(seq, id, "discarding stale response");
        }
        stale
    }

    fn mark_applied(&mut self, id: ContactId, seq: u64, change: Confirmed) {
        self.applied.insert(id, seq);
        self.confirmed.push((seq, change));
    }

    /// Re-apply, in the order they were confirmed, the mutations begun after
    /// the list request `seq`. The list may predate them on the server.
    fn replay_after(&mut self, seq: u64) {
        for (_, change) in self.confirmed.iter().filter(|(s, _)| *s > seq) {
            match change {
                Confirmed::Created(contact) => self.contacts.insert_at_head(contact.clone()),
                Confirmed::Updated(id, contact) => {
                    self.contacts.replace_by_id(*id, contact.clone());
                }
                Confirmed::Deleted(id) => {
                    self.contacts.remove_by_id(*id);
                }
            }
        }
    }

    /// Forget bookkeeping no request still in flight can be compared with.
    /// Every pending sequence is at least the oldest one in flight, so only
    /// entries newer than that can make a pending result stale or need a
    /// replay.
    fn prune(&mut self) {
        match self.in_flight.keys().next().copied() {
            Some(oldest) => {
                self.applied.retain(|_, seq| *seq > oldest);
                self.confirmed.retain(|(seq, _)| *seq > oldest);
            }
            None => {
                self.applied.clear();
                self.confirmed.clear();
            }
        }
    }
}
