//! Read-only aggregate queries over a finished population.

use crate::{population::Population, types::{Decade, Year}};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub fn total_count(population: &Population) -> usize {
    population.len()
}

/// Individuals per birth decade. Only decades that occur are present.
pub fn counts_by_decade(population: &Population) -> BTreeMap<Year, usize> {
    let mut counts = BTreeMap::new();
    for person in population.iter() {
        *counts.entry(Decade::of(person.birth_year).year()).or_insert(0) += 1;
    }
    counts
}

/// Full names ("First Last") shared by more than one individual, sorted.
pub fn duplicate_full_names(population: &Population) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    for person in population.iter() {
        *seen.entry(person.full_name()).or_insert(0) += 1;
    }
    let mut duplicates: Vec<String> = seen
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name)
        .collect();
    duplicates.sort();
    duplicates
}

/// All three queries in one serializable bundle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeSummary {
    pub total:           usize,
    pub by_decade:       BTreeMap<Year, usize>,
    pub duplicate_names: Vec<String>,
}

impl TreeSummary {
    pub fn from_population(population: &Population) -> Self {
        Self {
            total:           total_count(population),
            by_decade:       counts_by_decade(population),
            duplicate_names: duplicate_full_names(population),
        }
    }
}
