//! Individual sampler — materializes one person from the reference tables.
//!
//! Every attribute is drawn from the tables for the person's birth
//! decade. A missing table entry is a data error and is returned as
//! such; nothing here falls back to a default.

use crate::{
    error::{TreeError, TreeResult},
    person::Person,
    reference::ReferenceTables,
    rng::RandomSource,
    types::{Decade, Gender, Year},
};

/// The narrow interface the tree builder needs to create people.
pub trait IndividualSampler {
    /// Create a new, unlinked individual born in `birth_year`.
    /// An inherited surname is used as-is instead of being drawn.
    fn create_individual(
        &mut self,
        birth_year: Year,
        inherited_surname: Option<&str>,
    ) -> TreeResult<Person>;
}

/// Samples individuals from `ReferenceTables`.
pub struct TableSampler<'a, R> {
    tables:       &'a ReferenceTables,
    rng:          R,
    death_jitter: f64,
}

impl<'a, R: RandomSource> TableSampler<'a, R> {
    pub fn new(tables: &'a ReferenceTables, rng: R) -> Self {
        Self { tables, rng, death_jitter: 10.0 }
    }

    pub fn with_death_jitter(mut self, jitter: f64) -> Self {
        self.death_jitter = jitter;
        self
    }

    fn draw_gender(&mut self, decade: Decade) -> TreeResult<Gender> {
        let male_probability = self.tables.male_probability_for(decade)?;
        Ok(if self.rng.chance(male_probability) { Gender::Male } else { Gender::Female })
    }

    fn draw_first_name(&mut self, decade: Decade, gender: Gender) -> TreeResult<String> {
        self.tables
            .first_name_pool(decade, gender)?
            .draw(&mut self.rng)
            .cloned()
            .ok_or_else(|| TreeError::EmptyPool {
                pool: "first_names",
                key:  format!("{decade}/{gender}"),
            })
    }

    fn draw_surname(&mut self, decade: Decade, inherited: Option<&str>) -> TreeResult<String> {
        if let Some(surname) = inherited {
            return Ok(surname.to_string());
        }
        self.tables
            .surname_pool(decade)?
            .draw(&mut self.rng)
            .cloned()
            .ok_or_else(|| TreeError::EmptyPool { pool: "last_names", key: decade.to_string() })
    }

    fn draw_death_year(&mut self, birth_year: Year, decade: Decade) -> TreeResult<Year> {
        let expectancy = self.tables.life_expectancy_for(decade)?;
        let variation = self.rng.uniform(-self.death_jitter, self.death_jitter);
        // `as` truncates toward zero, matching an integer cast of the sum.
        Ok((birth_year as f64 + expectancy + variation) as Year)
    }
}

impl<R: RandomSource> IndividualSampler for TableSampler<'_, R> {
    fn create_individual(
        &mut self,
        birth_year: Year,
        inherited_surname: Option<&str>,
    ) -> TreeResult<Person> {
        let decade = Decade::of(birth_year);
        let gender = self.draw_gender(decade)?;
        let first_name = self.draw_first_name(decade, gender)?;
        let surname = self.draw_surname(decade, inherited_surname)?;
        let death_year = self.draw_death_year(birth_year, decade)?;
        Ok(Person::new(birth_year, death_year, first_name, surname, gender))
    }
}
