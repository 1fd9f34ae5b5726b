//! Pointer event types and the set of currently active pointers.

use crate::util::Point;
use serde::{Deserialize, Serialize};

/// Identifier assigned to a pointer (mouse, pen or touch contact) by the host.
pub type PointerId = u64;

/// A pointer position in raw canvas-relative coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: PointerId,
    pub x: f64,
    pub y: f64,
}

impl Contact {
    pub fn new(id: PointerId, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Pointers currently pressed, in the order they went down.
#[derive(Debug, Default, Clone)]
pub struct ActivePointers {
    contacts: Vec<Contact>,
}

impl ActivePointers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Records a pointer going down (or re-reports a known one).
    pub fn press(&mut self, contact: Contact) {
        match self.contacts.iter_mut().find(|c| c.id == contact.id) {
            Some(existing) => *existing = contact,
            None => self.contacts.push(contact),
        }
    }

    /// Updates the position of a known pointer. Unknown ids are ignored.
    pub fn update(&mut self, contact: Contact) -> bool {
        match self.contacts.iter_mut().find(|c| c.id == contact.id) {
            Some(existing) => {
                *existing = contact;
                true
            }
            None => false,
        }
    }

    /// Removes a pointer, returning whether it was known.
    pub fn release(&mut self, id: PointerId) -> bool {
        let before = self.contacts.len();
        self.contacts.retain(|c| c.id != id);
        self.contacts.len() != before
    }

    pub fn clear(&mut self) {
        self.contacts.clear();
    }

    pub fn get(&self, id: PointerId) -> Option<Contact> {
        self.contacts.iter().copied().find(|c| c.id == id)
    }

    /// The two earliest pointers, which drive a pinch.
    pub fn pinch_pair(&self) -> Option<(Point, Point)> {
        match self.contacts.as_slice() {
            [first, second, ..] => Some((first.position(), second.position())),
            _ => None,
        }
    }
}
