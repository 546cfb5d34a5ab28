//! tree-runner: generate a family tree and answer questions about it.
//!
//! Usage:
//!   tree-runner --data-dir ./data
//!   tree-runner --seed 12345 --config tree.json --json

use anyhow::Result;
use family_tree_core::{
    builder::TreeBuilder,
    config::TreeConfig,
    population::Population,
    query::{self, TreeSummary},
    reference::ReferenceTables,
};
use std::env;
use std::io::{self, BufRead, Write};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let json_mode = args.iter().any(|a| a == "--json");
    let seed = match find_arg(&args, "--seed") {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|e| anyhow::anyhow!("Invalid --seed {raw}: {e}"))?,
        None => rand::random(),
    };
    let data_dir = find_arg(&args, "--data-dir").unwrap_or("./data");
    let config = match find_arg(&args, "--config") {
        Some(path) => TreeConfig::load(path)?,
        None => TreeConfig::default(),
    };
    log::info!("seed {seed} (pass --seed {seed} to replay this tree)");

    if !json_mode {
        println!("Reading files...");
    }
    let tables = ReferenceTables::load(data_dir)?;

    if !json_mode {
        println!("Generating family tree...");
    }
    let population = TreeBuilder::seeded(&tables, config, seed).seed_and_expand()?;

    if json_mode {
        let summary = TreeSummary::from_population(&population);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let stdin = io::stdin();
        run_menu(&population, stdin.lock(), io::stdout())?;
    }
    Ok(())
}

fn run_menu(population: &Population, mut input: impl BufRead, mut out: impl Write) -> Result<()> {
    let mut buffer = String::new();
    loop {
        writeln!(out, "Are you interested in:")?;
        writeln!(out, "(T)otal number of people in the tree")?;
        writeln!(out, "Total number of people in the tree by (D)ecade")?;
        writeln!(out, "(N)ames duplicated")?;
        writeln!(out, "(Q)uit")?;
        write!(out, "> ")?;
        out.flush()?;

        buffer.clear();
        if input.read_line(&mut buffer)? == 0 {
            break; // EOF
        }

        match buffer.trim().to_uppercase().as_str() {
            "T" => {
                writeln!(out, "The tree contains {} people total", query::total_count(population))?;
            }
            "D" => {
                for (decade, count) in query::counts_by_decade(population) {
                    writeln!(out, "{decade}: {count}")?;
                }
            }
            "N" => {
                let dups = query::duplicate_full_names(population);
                writeln!(out, "There are {} duplicate names in the tree:", dups.len())?;
                for name in dups {
                    writeln!(out, "* {name}")?;
                }
            }
            "Q" => break,
            other => log::warn!("Unknown choice: {other:?}"),
        }
    }
    Ok(())
}

fn find_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
