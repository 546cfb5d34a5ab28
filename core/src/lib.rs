//! Synthetic multi-generation family trees driven by demographic tables.
//!
//! Data flows one way: `reference` tables feed the `sampler`, the
//! `builder` drives the sampler to grow a `population`, and `query`
//! reads the finished population.

pub mod builder;
pub mod config;
pub mod error;
pub mod person;
pub mod pool;
pub mod population;
pub mod query;
pub mod reference;
pub mod rng;
pub mod sampler;
pub mod types;
