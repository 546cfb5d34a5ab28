use crate::types::{Gender, PersonId, Year};
use serde::Serialize;

/// One individual in the tree.
///
/// Name, gender and life years are fixed at creation. Partner and
/// children links are only changed through `Population`, which keeps
/// the partner relation reciprocal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Person {
    pub birth_year: Year,
    /// May fall after the horizon year.
    pub death_year: Year,
    pub first_name: String,
    pub surname:    String,
    pub gender:     Gender,
    pub(crate) partner:  Option<PersonId>,
    pub(crate) children: Vec<PersonId>,
}

impl Person {
    pub fn new(
        birth_year: Year,
        death_year: Year,
        first_name: impl Into<String>,
        surname: impl Into<String>,
        gender: Gender,
    ) -> Self {
        Self {
            birth_year,
            death_year,
            first_name: first_name.into(),
            surname:    surname.into(),
            gender,
            partner:    None,
            children:   Vec::new(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.surname)
    }

    pub fn partner(&self) -> Option<PersonId> {
        self.partner
    }

    pub fn has_partner(&self) -> bool {
        self.partner.is_some()
    }

    pub fn children(&self) -> &[PersonId] {
        &self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}
