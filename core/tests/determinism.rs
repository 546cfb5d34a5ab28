//! Two builders, same seed, same tables.
//! They must produce identical populations, person for person.

use family_tree_core::{
    builder::TreeBuilder,
    config::TreeConfig,
    person::Person,
    population::Population,
    reference::ReferenceTables,
};

fn build(tables: &ReferenceTables, seed: u64) -> Population {
    TreeBuilder::seeded(tables, TreeConfig::default(), seed)
        .seed_and_expand()
        .expect("build")
}

fn snapshot(population: &Population) -> Vec<Person> {
    population.iter().cloned().collect()
}

#[test]
fn same_seed_produces_identical_trees() {
    const SEED: u64 = 0xDEAD_BEEF_CAFE_1234;
    let tables = ReferenceTables::default_test();

    let tree_a = snapshot(&build(&tables, SEED));
    let tree_b = snapshot(&build(&tables, SEED));

    assert_eq!(
        tree_a.len(), tree_b.len(),
        "Population sizes differ: {} vs {}",
        tree_a.len(), tree_b.len()
    );

    for (i, (a, b)) in tree_a.iter().zip(tree_b.iter()).enumerate() {
        assert_eq!(a, b, "Trees diverged at #{i}:\n  A: {a:?}\n  B: {b:?}");
    }
}

#[test]
fn different_seeds_produce_different_trees() {
    let tables = ReferenceTables::default_test();
    let tree_a = snapshot(&build(&tables, 42));
    let tree_b = snapshot(&build(&tables, 99));

    // Death years alone vary with every draw, so equal trees mean the
    // seed is not being used.
    assert_ne!(tree_a, tree_b, "Different seeds produced identical trees");
}
