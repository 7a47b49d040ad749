use crate::models::Country;
use serde::{Deserialize, Serialize};

/// Summary statistics over the populations of a result set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub total: u64,
    pub min: u64,
    pub max: u64,
    pub mean: f64,
    pub median: f64,
}

/// Compute population statistics for a result list; `None` when it is empty.
pub fn population_summary(countries: &[Country]) -> Option<Summary> {
    if countries.is_empty() {
        return None;
    }
    let mut populations: Vec<u64> = countries.iter().map(|c| c.population).collect();
    populations.sort_unstable();

    let count = populations.len();
    let total: u64 = populations.iter().sum();
    let min = populations[0];
    let max = populations[count - 1];
    let mean = total as f64 / count as f64;
    let median = if count % 2 == 1 {
        populations[count / 2] as f64
    } else {
        (populations[count / 2 - 1] as f64 + populations[count / 2] as f64) / 2.0
    };

    Some(Summary {
        count,
        total,
        min,
        max,
        mean,
        median,
    })
}
