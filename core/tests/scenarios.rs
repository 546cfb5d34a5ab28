//! Forced-outcome scenarios using a fixed random source.

mod common;

use common::{parents_of, FixedRng};
use family_tree_core::{
    builder::TreeBuilder,
    config::TreeConfig,
    error::TreeError,
    population::Population,
    reference::{DecadeRates, ReferenceTables},
    sampler::TableSampler,
    types::{Decade, PersonId},
};

fn tables_with_rates(birth_rate: f64, marriage_rate: f64) -> ReferenceTables {
    let mut tables = ReferenceTables::default_test();
    for rates in tables.birth_marriage_rates.values_mut() {
        *rates = DecadeRates { birth_rate, marriage_rate };
    }
    tables
}

fn build_fixed(tables: &ReferenceTables, config: TreeConfig, roll: f64) -> Result<Population, TreeError> {
    let sampler = TableSampler::new(tables, FixedRng::with_roll(roll));
    TreeBuilder::new(tables, config, sampler, FixedRng::with_roll(roll)).seed_and_expand()
}

#[test]
fn founders_bear_a_generation_with_founding_surnames() {
    // birth rate 3.0 -> children drawn from [2, 5]; the fixed source picks 2.
    let tables = tables_with_rates(3.0, 0.9);
    let pop = build_fixed(&tables, TreeConfig::default(), 0.0).unwrap();

    let founder = pop.get(PersonId(0));
    let years: Vec<i32> = founder.children().iter().map(|c| pop.get(*c).birth_year).collect();
    assert_eq!(years, vec![1975, 1995]);

    for child in founder.children() {
        let child = pop.get(*child);
        assert!(pop.is_founding_surname(&child.surname));
        assert_eq!(child.surname, founder.surname);
    }

    // The co-founder shares the children and does not bear more.
    assert_eq!(pop.get(PersonId(1)).children(), founder.children());
}

#[test]
fn children_gain_partners_ten_years_older() {
    let tables = tables_with_rates(3.0, 0.9);
    let pop = build_fixed(&tables, TreeConfig::default(), 0.0).unwrap();

    let first_child = pop.get(PersonId(0)).children()[0];
    let partner = pop.partner_of(first_child).expect("marriage always succeeds");
    assert_eq!(partner.birth_year, 1965);
    assert!(partner.children().iter().all(|c| pop.get(*c).birth_year >= 1990));
}

#[test]
fn partner_years_are_clamped_to_earliest_year() {
    let tables = tables_with_rates(3.0, 0.9);
    let config = TreeConfig { earliest_year: 1970, ..TreeConfig::default() };
    let pop = build_fixed(&tables, config, 0.0).unwrap();

    let first_child = pop.get(PersonId(0)).children()[0];
    assert_eq!(pop.get(first_child).birth_year, 1975);
    assert_eq!(pop.partner_of(first_child).map(|p| p.birth_year), Some(1970));
    for person in pop.iter().skip(2) {
        assert!(person.birth_year >= 1970, "{} born {}", person.full_name(), person.birth_year);
    }
}

#[test]
fn founders_past_the_horizon_have_no_children() {
    let tables = ReferenceTables::default_test();
    let config = TreeConfig { founding_year: 2100, ..TreeConfig::default() };
    let pop = build_fixed(&tables, config, 0.0).unwrap();

    assert_eq!(pop.len(), 2);
    assert!(pop.iter().all(|p| p.child_count() == 0));
}

#[test]
fn uncovered_decade_is_skipped_not_an_error() {
    let mut tables = ReferenceTables::default_test();
    tables.birth_marriage_rates.remove(&Decade(1950));
    let pop = build_fixed(&tables, TreeConfig::default(), 0.0).unwrap();
    assert_eq!(pop.len(), 2);
}

#[test]
fn missing_sampling_data_surfaces_as_error() {
    let mut tables = tables_with_rates(3.0, 0.9);
    tables.life_expectancy.remove(&1970);
    let err = build_fixed(&tables, TreeConfig::default(), 0.0).unwrap_err();
    assert!(
        matches!(err, TreeError::MissingEntry { table: "life_expectancy", .. }),
        "{err}"
    );
}

#[test]
fn single_parents_bear_one_fewer_child() {
    // A roll of 0.5 never beats a marriage rate of 0, so nobody new partners.
    let tables = tables_with_rates(3.0, 0.0);
    let pop = build_fixed(&tables, TreeConfig::default(), 0.5).unwrap();

    let parents = parents_of(&pop);
    for id in pop.ids().skip(2) {
        let person = pop.get(id);
        assert!(!person.has_partner());
        assert!(person.child_count() <= 1, "single parent had {}", person.child_count());
    }

    // 1975 -> window 2000..=2020, one child at the midpoint.
    let first_child = pop.get(PersonId(0)).children()[0];
    let grandchildren = pop.get(first_child).children();
    assert_eq!(grandchildren.len(), 1);
    assert_eq!(pop.get(grandchildren[0]).birth_year, 2010);
    assert_eq!(parents[grandchildren[0].index()], vec![first_child]);
}

#[test]
fn negative_child_count_means_no_children() {
    // birth rate 0 -> counts drawn from [-1, 2]; the fixed source picks -1.
    let tables = tables_with_rates(0.0, 0.9);
    let pop = build_fixed(&tables, TreeConfig::default(), 0.0).unwrap();
    assert_eq!(pop.len(), 2);
}

#[test]
fn lone_child_is_born_at_the_window_midpoint() {
    // birth rate 2.5 -> counts drawn from [1, 4]; the fixed source picks 1.
    let tables = tables_with_rates(2.5, 0.9);
    let pop = build_fixed(&tables, TreeConfig::default(), 0.0).unwrap();
    let children = pop.get(PersonId(0)).children();
    assert_eq!(children.len(), 1);
    assert_eq!(pop.get(children[0]).birth_year, 1985);
}

#[test]
fn highest_counts_spread_across_the_window() {
    // birth rate 2.5 -> counts drawn from [1, 4]; the high source picks 4.
    let tables = tables_with_rates(2.5, 1.0);
    let config = TreeConfig { horizon_year: 2000, ..TreeConfig::default() };
    let sampler = TableSampler::new(&tables, FixedRng { roll: 0.5, high: true });
    let pop = TreeBuilder::new(&tables, config, sampler, FixedRng { roll: 0.5, high: true })
        .seed_and_expand()
        .unwrap();

    let years: Vec<i32> = pop
        .get(PersonId(0))
        .children()
        .iter()
        .map(|c| pop.get(*c).birth_year)
        .collect();
    assert_eq!(years, vec![1975, 1981, 1988, 1995]);
}
