//! Reference data provider — decade-keyed demographic tables.
//!
//! RULE: Tables are validated once, here, at load time. After that they
//! are read-only; sampling code never inspects raw rows.
//!
//! Six CSV files make up a dataset (see the `*_FILE` constants). Decade
//! columns use the label form ("1950s"); life expectancy is keyed by
//! the plain integer year.

use crate::{
    error::{TreeError, TreeResult},
    pool::WeightedPool,
    types::{Decade, Gender, Year},
};
use serde::{de::DeserializeOwned, Deserialize};
use std::{
    collections::{BTreeMap, HashMap},
    fs::File,
    io::Read,
    path::Path,
};

pub const LIFE_EXPECTANCY_FILE:    &str = "life_expectancy.csv";
pub const BIRTH_MARRIAGE_FILE:     &str = "birth_and_marriage_rates.csv";
pub const FIRST_NAMES_FILE:        &str = "first_names.csv";
pub const LAST_NAMES_FILE:         &str = "last_names.csv";
pub const RANK_PROBABILITY_FILE:   &str = "rank_to_probability.csv";
pub const GENDER_PROBABILITY_FILE: &str = "gender_name_probability.csv";

/// Per-decade fertility and partnering rates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecadeRates {
    /// Expected children per partnered couple.
    pub birth_rate:    f64,
    /// Probability that an unpartnered individual finds a partner.
    pub marriage_rate: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    pub life_expectancy:      BTreeMap<Year, f64>,
    pub birth_marriage_rates: HashMap<Decade, DecadeRates>,
    pub first_names:          HashMap<(Decade, Gender), WeightedPool<String>>,
    pub surnames:             HashMap<Decade, WeightedPool<String>>,
    pub male_probability:     HashMap<Decade, f64>,
}

/// One reader per table. `load` opens files; tests pass byte slices.
pub struct TableSources<R> {
    pub life_expectancy:      R,
    pub birth_marriage_rates: R,
    pub first_names:          R,
    pub last_names:           R,
    pub rank_probabilities:   R,
    pub gender_probabilities: R,
}

// ── Raw rows ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct LifeExpectancyRow {
    #[serde(rename = "Year")]
    year: Year,
    #[serde(rename = "Period life expectancy at birth")]
    years: f64,
}

#[derive(Debug, Deserialize)]
struct RatesRow {
    decade:        String,
    birth_rate:    f64,
    marriage_rate: f64,
}

#[derive(Debug, Deserialize)]
struct FirstNameRow {
    decade:    String,
    gender:    Gender,
    name:      String,
    frequency: f64,
}

#[derive(Debug, Deserialize)]
struct LastNameRow {
    #[serde(rename = "Decade")]
    decade:    String,
    #[serde(rename = "Rank")]
    rank:      usize,
    #[serde(rename = "LastName")]
    last_name: String,
}

#[derive(Debug, Deserialize)]
struct GenderProbabilityRow {
    decade:      String,
    probability: f64,
}

impl ReferenceTables {
    /// Load all six tables from `data_dir`.
    pub fn load(data_dir: impl AsRef<Path>) -> TreeResult<Self> {
        let dir = data_dir.as_ref();
        let open = |table: &'static str| -> TreeResult<File> {
            let path = dir.join(table);
            File::open(&path).map_err(|e| TreeError::Csv { table, source: e.into() })
        };
        let sources = TableSources {
            life_expectancy:      open(LIFE_EXPECTANCY_FILE)?,
            birth_marriage_rates: open(BIRTH_MARRIAGE_FILE)?,
            first_names:          open(FIRST_NAMES_FILE)?,
            last_names:           open(LAST_NAMES_FILE)?,
            rank_probabilities:   open(RANK_PROBABILITY_FILE)?,
            gender_probabilities: open(GENDER_PROBABILITY_FILE)?,
        };
        let tables = Self::from_sources(sources)?;
        log::info!(
            "Loaded reference tables from {}: {} rate decades, {} first-name pools, {} surname pools",
            dir.display(),
            tables.birth_marriage_rates.len(),
            tables.first_names.len(),
            tables.surnames.len(),
        );
        Ok(tables)
    }

    /// Parse and validate tables from arbitrary readers.
    pub fn from_sources<R: Read>(sources: TableSources<R>) -> TreeResult<Self> {
        let life_expectancy = read_rows::<LifeExpectancyRow, _>(LIFE_EXPECTANCY_FILE, sources.life_expectancy)?
            .into_iter()
            .map(|row| (row.year, row.years))
            .collect();

        let mut birth_marriage_rates = HashMap::new();
        for row in read_rows::<RatesRow, _>(BIRTH_MARRIAGE_FILE, sources.birth_marriage_rates)? {
            let decade = parse_decade(BIRTH_MARRIAGE_FILE, &row.decade)?;
            birth_marriage_rates.insert(
                decade,
                DecadeRates { birth_rate: row.birth_rate, marriage_rate: row.marriage_rate },
            );
        }

        let mut first_names: HashMap<(Decade, Gender), WeightedPool<String>> = HashMap::new();
        for row in read_rows::<FirstNameRow, _>(FIRST_NAMES_FILE, sources.first_names)? {
            let decade = parse_decade(FIRST_NAMES_FILE, &row.decade)?;
            check_weight(FIRST_NAMES_FILE, &row.name, row.frequency)?;
            first_names
                .entry((decade, row.gender))
                .or_default()
                .push(row.name, row.frequency);
        }

        let rank_probabilities = read_rank_probabilities(sources.rank_probabilities)?;
        let mut surnames: HashMap<Decade, WeightedPool<String>> = HashMap::new();
        for row in read_rows::<LastNameRow, _>(LAST_NAMES_FILE, sources.last_names)? {
            let decade = parse_decade(LAST_NAMES_FILE, &row.decade)?;
            // Ranks are 1-based.
            let weight = row
                .rank
                .checked_sub(1)
                .and_then(|i| rank_probabilities.get(i))
                .copied()
                .ok_or_else(|| {
                    TreeError::invalid(
                        LAST_NAMES_FILE,
                        format!(
                            "rank {} for '{}' is outside the {}-entry rank table",
                            row.rank,
                            row.last_name,
                            rank_probabilities.len()
                        ),
                    )
                })?;
            surnames.entry(decade).or_default().push(row.last_name, weight);
        }

        let mut male_probability = HashMap::new();
        for row in read_rows::<GenderProbabilityRow, _>(GENDER_PROBABILITY_FILE, sources.gender_probabilities)? {
            let decade = parse_decade(GENDER_PROBABILITY_FILE, &row.decade)?;
            male_probability.insert(decade, row.probability);
        }

        Ok(Self {
            life_expectancy,
            birth_marriage_rates,
            first_names,
            surnames,
            male_probability,
        })
    }

    // ── Lookups ────────────────────────────────────────────────────

    /// Birth and marriage rates. None means the dataset does not cover
    /// the decade, which the builder treats as "skip", not an error.
    pub fn rates_for(&self, decade: Decade) -> Option<DecadeRates> {
        self.birth_marriage_rates.get(&decade).copied()
    }

    pub fn life_expectancy_for(&self, decade: Decade) -> TreeResult<f64> {
        self.life_expectancy
            .get(&decade.year())
            .copied()
            .ok_or_else(|| TreeError::missing("life_expectancy", decade.year()))
    }

    pub fn male_probability_for(&self, decade: Decade) -> TreeResult<f64> {
        self.male_probability
            .get(&decade)
            .copied()
            .ok_or_else(|| TreeError::missing("gender_name_probability", decade))
    }

    pub fn first_name_pool(&self, decade: Decade, gender: Gender) -> TreeResult<&WeightedPool<String>> {
        self.first_names
            .get(&(decade, gender))
            .ok_or_else(|| TreeError::missing("first_names", format!("{decade}/{gender}")))
    }

    pub fn surname_pool(&self, decade: Decade) -> TreeResult<&WeightedPool<String>> {
        self.surnames
            .get(&decade)
            .ok_or_else(|| TreeError::missing("last_names", decade))
    }

    /// Small synthetic dataset covering 1950–2120, for unit tests.
    pub fn default_test() -> Self {
        const MALE:    [&str; 3] = ["James", "Robert", "John"];
        const FEMALE:  [&str; 3] = ["Mary", "Linda", "Susan"];
        const FAMILY:  [&str; 4] = ["Smith", "Johnson", "Williams", "Brown"];
        const BY_RANK: [f64; 4]  = [0.4, 0.3, 0.2, 0.1];

        let mut tables = Self::default();
        for year in (1950..=2120).step_by(10) {
            let decade = Decade(year);
            tables.life_expectancy.insert(year, 70.0 + (year - 1950) as f64 * 0.05);
            tables.birth_marriage_rates.insert(
                decade,
                DecadeRates { birth_rate: 2.5, marriage_rate: 0.8 },
            );
            tables.male_probability.insert(decade, 0.5);
            tables.first_names.insert(
                (decade, Gender::Male),
                MALE.iter().map(|n| (n.to_string(), 1.0)).collect(),
            );
            tables.first_names.insert(
                (decade, Gender::Female),
                FEMALE.iter().map(|n| (n.to_string(), 1.0)).collect(),
            );
            tables.surnames.insert(
                decade,
                FAMILY.iter().zip(BY_RANK).map(|(n, w)| (n.to_string(), w)).collect(),
            );
        }
        tables
    }
}

fn read_rows<T: DeserializeOwned, R: Read>(table: &'static str, reader: R) -> TreeResult<Vec<T>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let rows = rdr
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|source| TreeError::Csv { table, source })?;
    Ok(rows)
}

/// The rank table is a single header-less row of probabilities.
fn read_rank_probabilities<R: Read>(reader: R) -> TreeResult<Vec<f64>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let record = match rdr.records().next() {
        Some(record) => record.map_err(|source| TreeError::Csv { table: RANK_PROBABILITY_FILE, source })?,
        None => return Err(TreeError::invalid(RANK_PROBABILITY_FILE, "table is empty")),
    };
    record
        .iter()
        .filter(|field| !field.is_empty())
        .map(|field| {
            let p: f64 = field.parse().map_err(|_| {
                TreeError::invalid(RANK_PROBABILITY_FILE, format!("'{field}' is not a number"))
            })?;
            check_weight(RANK_PROBABILITY_FILE, field, p)?;
            Ok(p)
        })
        .collect()
}

fn parse_decade(table: &'static str, label: &str) -> TreeResult<Decade> {
    Decade::parse_label(label)
        .ok_or_else(|| TreeError::invalid(table, format!("'{label}' is not a decade label")))
}

fn check_weight(table: &'static str, what: &str, weight: f64) -> TreeResult<()> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(())
    } else {
        Err(TreeError::invalid(table, format!("weight {weight} for '{what}' is negative or not finite")))
    }
}
