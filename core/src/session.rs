//! The at-most-one in-progress edit draft.
//!
//! Starting to edit another contact replaces the current draft without
//! asking; unsaved edits are dropped.

use crate::types::{Contact, ContactId, ContactInput};
use crate::validate::sanitize_mobile;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Idle,
    Editing { id: ContactId, draft: ContactInput },
}

impl EditSession {
    /// Open a draft initialized from `contact`'s current values.
    pub fn start(&mut self, contact: &Contact) {
        *self = EditSession::Editing {
            id: contact.id,
            draft: ContactInput::from(contact),
        };
    }

    pub fn cancel(&mut self) {
        *self = EditSession::Idle;
    }

    /// Return to `Idle` if `id` is the record being edited.
    pub fn finish(&mut self, id: ContactId) -> bool {
        if self.is_editing(id) {
            *self = EditSession::Idle;
            true
        } else {
            false
        }
    }

    pub fn editing_id(&self) -> Option<ContactId> {
        match self {
            EditSession::Idle => None,
            EditSession::Editing { id, .. } => Some(*id),
        }
    }

    pub fn is_editing(&self, id: ContactId) -> bool {
        self.editing_id() == Some(id)
    }

    pub fn draft(&self) -> Option<&ContactInput> {
        match self {
            EditSession::Idle => None,
            EditSession::Editing { draft, .. } => Some(draft),
        }
    }

    pub fn set_name(&mut self, name: &str) {
        if let Some(draft) = self.draft_mut() {
            draft.name = name.to_string();
        }
    }

    pub fn set_mobile(&mut self, mobile: &str) {
        if let Some(draft) = self.draft_mut() {
            draft.mobile = sanitize_mobile(mobile);
        }
    }

    pub fn set_contact_number(&mut self, contact_number: &str) {
        if let Some(draft) = self.draft_mut() {
            draft.contact_number = contact_number.to_string();
        }
    }

    fn draft_mut(&mut self) -> Option<&mut ContactInput> {
        match self {
            EditSession::Idle => None,
            EditSession::Editing { draft, .. } => Some(draft),
        }
    }
}
