//! Active pointer contacts keyed by pointer identity.

use crate::geom::Point;
use crate::model::Modifiers;

/// One live touch/pointer contact across its down/move/up lifecycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    pub id: i32,
    pub position: Point,
    pub modifiers: Modifiers,
}

/// Tracks the set of live contacts in arrival order. The vector stays tiny
/// (browsers rarely report more than a handful of pointers), so linear scans
/// beat a map here.
#[derive(Clone, Debug, Default)]
pub struct ContactTracker {
    contacts: Vec<Contact>,
}

impl ContactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Down event: insert, or overwrite if the id is somehow already live
    /// (a duplicate down is not an error).
    pub fn start(&mut self, id: i32, position: Point, modifiers: Modifiers) {
        if let Some(c) = self.contacts.iter_mut().find(|c| c.id == id) {
            c.position = position;
            c.modifiers = modifiers;
        } else {
            self.contacts.push(Contact { id, position, modifiers });
        }
    }

    /// Move event. A move for an id we never saw a down for is dropped —
    /// it must neither crash nor create a contact.
    pub fn update(&mut self, id: i32, position: Point, modifiers: Modifiers) -> bool {
        match self.contacts.iter_mut().find(|c| c.id == id) {
            Some(c) => {
                c.position = position;
                c.modifiers = modifiers;
                true
            }
            None => false,
        }
    }

    /// Up/cancel event; removing an absent id is a no-op.
    pub fn end(&mut self, id: i32) -> bool {
        let before = self.contacts.len();
        self.contacts.retain(|c| c.id != id);
        self.contacts.len() != before
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn contains(&self, id: i32) -> bool {
        self.contacts.iter().any(|c| c.id == id)
    }

    /// The two earliest-started live contacts, when at least two exist.
    /// This is the canonical pinch pair: a third finger never displaces it.
    pub fn active_pair(&self) -> Option<(&Contact, &Contact)> {
        match self.contacts.as_slice() {
            [a, b, ..] => Some((a, b)),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.contacts.clear();
    }
}
