//! In-process contact table keyed by id.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::{Contact, CreateContact, UpdateContact};

/// Ids start at 1 and are never reused, even after a delete.
#[derive(Debug)]
pub struct ContactStore {
    next_id: i64,
    rows: BTreeMap<i64, Contact>,
}

impl Default for ContactStore {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl ContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Newest first.
    pub fn list(&self) -> Vec<Contact> {
        self.rows.values().rev().cloned().collect()
    }

    pub fn get(&self, id: i64) -> Option<Contact> {
        self.rows.get(&id).cloned()
    }

    pub fn create(&mut self, input: CreateContact, now: DateTime<Utc>) -> Contact {
        let contact = Contact {
            id: self.next_id,
            name: input.name,
            mobile: input.mobile,
            contact_number: input.contact_number,
            created_at: now,
            updated_at: now,
        };
        self.next_id += 1;
        self.rows.insert(contact.id, contact.clone());
        contact
    }

    pub fn update(&mut self, id: i64, input: UpdateContact, now: DateTime<Utc>) -> Option<Contact> {
        let contact = self.rows.get_mut(&id)?;
        if let Some(name) = input.name {
            contact.name = name;
        }
        if let Some(mobile) = input.mobile {
            contact.mobile = mobile;
        }
        if let Some(contact_number) = input.contact_number {
            contact.contact_number = contact_number;
        }
        contact.updated_at = now;
        Some(contact.clone())
    }

    pub fn delete(&mut self, id: i64) -> Option<Contact> {
        self.rows.remove(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn input(name: &str) -> CreateContact {
        CreateContact {
            name: name.to_string(),
            mobile: "017".to_string(),
            contact_number: "018".to_string(),
        }
    }

    #[test]
    fn ids_increase_and_are_not_reused() {
        let mut store = ContactStore::new();
        let now = Utc::now();
        let a = store.create(input("a"), now);
        let b = store.create(input("b"), now);
        assert_eq!((a.id, b.id), (1, 2));

        store.delete(b.id).unwrap();
        let c = store.create(input("c"), now);
        assert_eq!(c.id, 3);
    }

    #[test]
    fn list_is_newest_first() {
        let mut store = ContactStore::new();
        let now = Utc::now();
        for name in ["a", "b", "c"] {
            store.create(input(name), now);
        }
        let ids: Vec<i64> = store.list().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn update_applies_present_fields_and_touches_updated_at() {
        let mut store = ContactStore::new();
        let created_at = Utc::now();
        let id = store.create(input("a"), created_at).id;

        let later = created_at + Duration::seconds(5);
        let update = UpdateContact {
            name: None,
            mobile: Some("019".to_string()),
            contact_number: None,
        };
        let updated = store.update(id, update, later).unwrap();
        assert_eq!(updated.name, "a");
        assert_eq!(updated.mobile, "019");
        assert_eq!(updated.created_at, created_at);
        assert_eq!(updated.updated_at, later);
    }

    #[test]
    fn missing_ids_yield_none() {
        let mut store = ContactStore::new();
        assert!(store.get(1).is_none());
        assert!(store.update(1, UpdateContact::default(), Utc::now()).is_none());
        assert!(store.delete(1).is_none());
        assert!(store.is_empty());
    }
}
