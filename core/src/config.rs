use crate::types::Year;
use serde::{Deserialize, Serialize};

/// Parameters of the tree-expansion rules.
///
/// Defaults reproduce the standard rule set; a JSON file may override
/// any subset of fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Birth year of both founders.
    pub founding_year:         Year,
    /// Lower clamp for generated partner birth years.
    pub earliest_year:         Year,
    /// Upper clamp for partner birth years. No child is born in or
    /// after this year.
    pub horizon_year:          Year,
    /// Age at which a parent has their first child.
    pub min_parent_age:        Year,
    /// Age at which a parent has their last child.
    pub max_parent_age:        Year,
    /// Partners are born within ± this many years of each other.
    pub partner_age_spread:    i64,
    /// Child counts are drawn from ceil(rate ± spread).
    pub child_count_spread:    f64,
    /// Children fewer for a parent without a partner.
    pub single_parent_penalty: i64,
    /// Death year jitter around life expectancy, in years.
    pub death_year_jitter:     f64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            founding_year:         1950,
            earliest_year:         1950,
            horizon_year:          2120,
            min_parent_age:        25,
            max_parent_age:        45,
            partner_age_spread:    10,
            child_count_spread:    1.5,
            single_parent_penalty: 1,
            death_year_jitter:     10.0,
        }
    }
}

impl TreeConfig {
    /// Load overrides from a JSON file.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.earliest_year <= self.horizon_year,
            "earliest_year {} is after horizon_year {}",
            self.earliest_year,
            self.horizon_year
        );
        anyhow::ensure!(
            0 < self.min_parent_age && self.min_parent_age <= self.max_parent_age,
            "parent ages must satisfy 0 < min ({}) <= max ({})",
            self.min_parent_age,
            self.max_parent_age
        );
        anyhow::ensure!(self.partner_age_spread >= 0, "partner_age_spread must be >= 0");
        anyhow::ensure!(self.child_count_spread >= 0.0, "child_count_spread must be >= 0");
        anyhow::ensure!(self.death_year_jitter >= 0.0, "death_year_jitter must be >= 0");
        Ok(())
    }

    /// Latest year a child may be born in.
    pub fn last_child_year(&self) -> Year {
        self.horizon_year - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: TreeConfig = serde_json::from_str(r#"{ "horizon_year": 2050 }"#).unwrap();
        assert_eq!(config.horizon_year, 2050);
        assert_eq!(config.min_parent_age, 25);
        assert_eq!(config.last_child_year(), 2049);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn inverted_parent_ages_fail_validation() {
        let config = TreeConfig { min_parent_age: 50, ..TreeConfig::default() };
        assert!(config.validate().is_err());
    }
}
