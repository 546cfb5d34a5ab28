//! The population arena.
//!
//! RULE: Individuals are appended, never removed or reordered, so a
//! PersonId stays valid for the life of the population. All links are
//! PersonIds into this arena.

use crate::{person::Person, types::PersonId};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default)]
pub struct Population {
    people:            Vec<Person>,
    founding_surnames: BTreeSet<String>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an individual and return its id.
    pub fn push(&mut self, person: Person) -> PersonId {
        let id = PersonId(self.people.len());
        self.people.push(person);
        id
    }

    /// Panics on an id from another population.
    pub fn get(&self, id: PersonId) -> &Person {
        &self.people[id.index()]
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Person> {
        self.people.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = PersonId> {
        (0..self.people.len()).map(PersonId)
    }

    pub fn partner_of(&self, id: PersonId) -> Option<&Person> {
        self.get(id).partner.map(|p| self.get(p))
    }

    /// Make `a` and `b` each other's partner. Both must be unpartnered.
    pub fn link_partners(&mut self, a: PersonId, b: PersonId) {
        assert_ne!(a, b, "an individual cannot partner themselves");
        assert!(
            self.people[a.index()].partner.is_none() && self.people[b.index()].partner.is_none(),
            "partner link would replace an existing partner"
        );
        self.people[a.index()].partner = Some(b);
        self.people[b.index()].partner = Some(a);
    }

    pub fn add_child(&mut self, parent: PersonId, child: PersonId) {
        self.people[parent.index()].children.push(child);
    }

    /// Record a founder's surname. Only called while seeding.
    pub(crate) fn add_founding_surname(&mut self, surname: &str) {
        self.founding_surnames.insert(surname.to_string());
    }

    pub fn founding_surnames(&self) -> &BTreeSet<String> {
        &self.founding_surnames
    }

    pub fn is_founding_surname(&self, surname: &str) -> bool {
        self.founding_surnames.contains(surname)
    }
}
