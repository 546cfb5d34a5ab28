//! The tree builder — seeds a founding couple and expands the tree.
//!
//! EXPANSION ORDER (fixed):
//!   The population is visited by a single cursor, in insertion order.
//!   People created while visiting someone are appended to the arena
//!   and visited later, so the loop runs until the cursor catches up
//!   with a population that has stopped growing.
//!
//! Per person, in order:
//!   1. Horizon check      — skip if no child could be born before the horizon.
//!   2. Coverage check     — skip if the decade has no birth/marriage rates.
//!   3. Partnering         — unpartnered people may gain a new partner.
//!   4. Childbearing       — people with no children yet may have some.
//!
//! RULES:
//!   - Partner links are always set on both sides at once.
//!   - Children are born at least `min_parent_age` years after the parent
//!     being visited, and before the horizon year.
//!   - Only the two founding surnames are ever preferred on inheritance.

use crate::{
    config::TreeConfig,
    error::TreeResult,
    population::Population,
    reference::{DecadeRates, ReferenceTables},
    rng::{RandomSource, RngBank, StreamRng, StreamSlot},
    sampler::{IndividualSampler, TableSampler},
    types::{Decade, PersonId, Year},
};

/// Running tally of what the expansion did. Logged at completion.
#[derive(Debug, Clone, Copy, Default)]
struct ExpansionStats {
    visited:          usize,
    partners_created: usize,
    children_created: usize,
    horizon_skips:    usize,
    uncovered_skips:  usize,
}

pub struct TreeBuilder<'a, S, R> {
    tables:  &'a ReferenceTables,
    config:  TreeConfig,
    sampler: S,
    rng:     R,
    stats:   ExpansionStats,
}

impl<'a> TreeBuilder<'a, TableSampler<'a, StreamRng>, StreamRng> {
    /// Build with the table sampler, both streams derived from `seed`.
    pub fn seeded(tables: &'a ReferenceTables, config: TreeConfig, seed: u64) -> Self {
        let bank = RngBank::new(seed);
        let sampler = TableSampler::new(tables, bank.for_stream(StreamSlot::Sampler))
            .with_death_jitter(config.death_year_jitter);
        TreeBuilder::new(tables, config, sampler, bank.for_stream(StreamSlot::Builder))
    }
}

impl<'a, S: IndividualSampler, R: RandomSource> TreeBuilder<'a, S, R> {
    pub fn new(tables: &'a ReferenceTables, config: TreeConfig, sampler: S, rng: R) -> Self {
        Self {
            tables,
            config,
            sampler,
            rng,
            stats: ExpansionStats::default(),
        }
    }

    /// Seed the founding couple and expand until every individual,
    /// including those created along the way, has been visited.
    pub fn seed_and_expand(mut self) -> TreeResult<Population> {
        let mut population = self.seed()?;

        let mut cursor = 0;
        while cursor < population.len() {
            self.expand_one(&mut population, PersonId(cursor))?;
            cursor += 1;
        }

        let stats = self.stats;
        log::info!(
            "Tree complete: {} people after {} visits ({} partners, {} children; skipped {} at horizon, {} uncovered)",
            population.len(),
            stats.visited,
            stats.partners_created,
            stats.children_created,
            stats.horizon_skips,
            stats.uncovered_skips,
        );
        Ok(population)
    }

    /// Two independently sampled founders, partnered to each other.
    fn seed(&mut self) -> TreeResult<Population> {
        let year = self.config.founding_year;
        let first = self.sampler.create_individual(year, None)?;
        let second = self.sampler.create_individual(year, None)?;

        let mut population = Population::new();
        population.add_founding_surname(&first.surname);
        population.add_founding_surname(&second.surname);
        log::info!(
            "Seeded founders {} and {} (born {year})",
            first.full_name(),
            second.full_name()
        );

        let a = population.push(first);
        let b = population.push(second);
        population.link_partners(a, b);
        Ok(population)
    }

    fn expand_one(&mut self, population: &mut Population, id: PersonId) -> TreeResult<()> {
        self.stats.visited += 1;
        let birth_year = population.get(id).birth_year;

        if birth_year + self.config.min_parent_age >= self.config.horizon_year {
            log::debug!("#{} born {birth_year}: past childbearing horizon", id.index());
            self.stats.horizon_skips += 1;
            return Ok(());
        }

        let decade = Decade::of(birth_year);
        let Some(rates) = self.tables.rates_for(decade) else {
            log::debug!("#{} born {birth_year}: no rates for {decade}", id.index());
            self.stats.uncovered_skips += 1;
            return Ok(());
        };

        if !population.get(id).has_partner() {
            self.try_partner(population, id, rates)?;
        }

        if population.get(id).child_count() == 0 {
            self.bear_children(population, id, rates)?;
        }
        Ok(())
    }

    fn try_partner(
        &mut self,
        population: &mut Population,
        id: PersonId,
        rates: DecadeRates,
    ) -> TreeResult<()> {
        if !self.rng.chance(rates.marriage_rate) {
            return Ok(());
        }
        let birth_year = population.get(id).birth_year;
        let spread = self.config.partner_age_spread;
        let offset = self.rng.int_inclusive(-spread, spread) as Year;
        let partner_year = (birth_year + offset)
            .clamp(self.config.earliest_year, self.config.horizon_year);

        let partner = self.sampler.create_individual(partner_year, None)?;
        let partner_id = population.push(partner);
        population.link_partners(id, partner_id);
        self.stats.partners_created += 1;
        Ok(())
    }

    fn bear_children(
        &mut self,
        population: &mut Population,
        id: PersonId,
        rates: DecadeRates,
    ) -> TreeResult<()> {
        let spread = self.config.child_count_spread;
        let min_children = (rates.birth_rate - spread).ceil() as i64;
        let max_children = (rates.birth_rate + spread).ceil() as i64;
        let mut num_children = self.rng.int_inclusive(min_children, max_children);

        let parent = population.get(id);
        let partner = parent.partner();
        if partner.is_none() {
            num_children -= self.config.single_parent_penalty;
        }
        if num_children <= 0 {
            return Ok(());
        }

        let start = parent.birth_year + self.config.min_parent_age;
        let end = (parent.birth_year + self.config.max_parent_age).min(self.config.last_child_year());
        let surname = inherited_surname(population, id);

        for year in child_birth_years(start, end, num_children as usize) {
            let child = self.sampler.create_individual(year, Some(surname.as_str()))?;
            let child_id = population.push(child);
            population.add_child(id, child_id);
            if let Some(partner_id) = partner {
                population.add_child(partner_id, child_id);
            }
            self.stats.children_created += 1;
        }
        Ok(())
    }
}

/// Birth years for `count` children in the window [start, end].
///
/// A single child is born at the midpoint; several are spread evenly with
/// the first at `start` and the last at `end`. Years are floored.
pub fn child_birth_years(start: Year, end: Year, count: usize) -> Vec<Year> {
    match count {
        0 => Vec::new(),
        1 => vec![(start + end).div_euclid(2)],
        n => {
            let span = (end - start) as i64;
            let gaps = (n - 1) as i64;
            (0..n as i64)
                .map(|i| start + (i * span).div_euclid(gaps) as Year)
                .collect()
        }
    }
}

/// Surname a child of `parent` inherits.
///
/// The parent's own founding surname wins, then the partner's founding
/// surname; with neither, the parent's surname is used.
pub fn inherited_surname(population: &Population, parent: PersonId) -> String {
    let person = population.get(parent);
    if population.is_founding_surname(&person.surname) {
        return person.surname.clone();
    }
    match population.partner_of(parent) {
        Some(partner) if population.is_founding_surname(&partner.surname) => partner.surname.clone(),
        _ => person.surname.clone(),
    }
}
