//! Client-side projection of the server's contact list.
//!
//! # Design
//! `ContactList` never talks to the network and never validates. The
//! controller feeds it only with representations the server returned, so
//! every method here is a single synchronous restatement of the collection.
//! Ids stay unique: inserting a contact whose id is already present drops
//! the older entry first.

use crate::types::{Contact, ContactId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactList {
    items: Vec<Contact>,
}

impl ContactList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the current contents and install `list` in the order given.
    pub fn replace_all(&mut self, list: Vec<Contact>) {
        self.items = list;
    }

    /// Make `contact` the first element.
    pub fn insert_at_head(&mut self, contact: Contact) {
        self.items.retain(|c| c.id != contact.id);
        self.items.insert(0, contact);
    }

    /// Replace the element with `id` in place. Returns `false` if absent.
    pub fn replace_by_id(&mut self, id: ContactId, contact: Contact) -> bool {
        match self.items.iter_mut().find(|c| c.id == id) {
            Some(slot) => {
                *slot = contact;
                true
            }
            None => false,
        }
    }

    pub fn remove_by_id(&mut self, id: ContactId) -> Option<Contact> {
        let pos = self.items.iter().position(|c| c.id == id)?;
        Some(self.items.remove(pos))
    }

    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.items.iter().find(|c| c.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Contact> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Contact] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a ContactList {
    type Item = &'a Contact;
    type IntoIter = std::slice::Iter<'a, Contact>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
