//! Likelihood-ratio rank tests.
//!
//! For each candidate rank r the null hypothesis "rank ≤ r" is tested with
//! either the trace statistic
//!
//! ```text
//! −t · Σ_{i=r}^{m−1} ln(1 − λᵢ)
//! ```
//!
//! or the maximum-eigenvalue statistic −t · ln(1 − λᵣ), where t = n_obs − k − 1
//! and the λᵢ are ordered non-increasing. The null is rejected when the
//! statistic strictly exceeds the tabulated threshold for rank deficiency m − r.

use crate::config::{JohansenConfig, StatisticKind};
use crate::critical_values::CriticalValueTable;
use crate::errors::{CointResult, CointegrationError};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outcome of the test of "rank ≤ r" for one r.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RankTestOutcome {
    /// Rank under the null hypothesis
    pub rank: usize,
    /// Trace or maximum-eigenvalue statistic
    pub statistic: f64,
    /// Threshold at the configured significance level
    pub critical_value: f64,
    /// Whether the null was rejected (statistic > critical value)
    pub rejected: bool,
}

/// Sequential rank tester bound to one configuration and sample size.
///
/// The critical-value row is selected once at construction; a missing
/// table entry surfaces here as [`CointegrationError::Configuration`].
#[derive(Debug, Clone)]
pub struct HypothesisTester {
    statistic: StatisticKind,
    critical_values: Vec<f64>,
    nobs: usize,
}

impl HypothesisTester {
    /// Selects the critical-value row for `config` and fixes t = n_obs − k − 1.
    pub fn new(
        table: &CriticalValueTable,
        config: &JohansenConfig,
        n_obs: usize,
    ) -> CointResult<Self> {
        let critical_values = table.lookup(config.statistic, config.trend, config.significance)?;
        Ok(Self {
            statistic: config.statistic,
            critical_values,
            nobs: config.effective_sample(n_obs),
        })
    }

    /// Effective sample size t used to scale the statistics.
    pub fn nobs(&self) -> usize {
        self.nobs
    }

    /// Likelihood-ratio statistic for the null "rank ≤ r".
    pub fn statistic(&self, eigenvalues: &[f64], r: usize) -> CointResult<f64> {
        check_rank(eigenvalues.len(), r)?;
        let t = self.nobs as f64;
        let log_terms = match self.statistic {
            StatisticKind::Trace => eigenvalues[r..].iter().map(|&l| (-l).ln_1p()).sum::<f64>(),
            StatisticKind::MaxEigenvalue => (-eigenvalues[r]).ln_1p(),
        };
        Ok(-t * log_terms)
    }

    /// Threshold for rank deficiency m − r, read at index m − r − 1.
    pub fn critical_value(&self, m: usize, r: usize) -> CointResult<f64> {
        check_rank(m, r)?;
        self.critical_values
            .get(m - r - 1)
            .copied()
            .ok_or(CointegrationError::InvalidParameter {
                parameter: "number of series".to_string(),
                value: m as f64,
                constraint: format!(
                    "at most {} series for the tabulated critical values",
                    self.critical_values.len()
                ),
            })
    }

    /// Full outcome of the test of "rank ≤ r".
    pub fn outcome(&self, eigenvalues: &[f64], r: usize) -> CointResult<RankTestOutcome> {
        let statistic = self.statistic(eigenvalues, r)?;
        let critical_value = self.critical_value(eigenvalues.len(), r)?;
        Ok(RankTestOutcome {
            rank: r,
            statistic,
            critical_value,
            rejected: statistic > critical_value,
        })
    }

    /// Whether the null "rank ≤ r" is rejected.
    pub fn test(&self, eigenvalues: &[f64], r: usize) -> CointResult<bool> {
        Ok(self.outcome(eigenvalues, r)?.rejected)
    }

    /// Outcomes for every r in 0..m, each evaluated independently.
    pub fn outcomes(&self, eigenvalues: &[f64]) -> CointResult<Vec<RankTestOutcome>> {
        let outcomes = (0..eigenvalues.len())
            .map(|r| self.outcome(eigenvalues, r))
            .collect::<CointResult<Vec<_>>>()?;

        for o in &outcomes {
            log::debug!(
                "rank ≤ {}: statistic {:.4} vs critical {:.4} -> {}",
                o.rank,
                o.statistic,
                o.critical_value,
                if o.rejected { "reject" } else { "fail to reject" }
            );
        }
        Ok(outcomes)
    }

    /// Every r in 0..m for which the null "rank ≤ r" is rejected.
    pub fn run_all(&self, eigenvalues: &[f64]) -> CointResult<Vec<usize>> {
        Ok(self
            .outcomes(eigenvalues)?
            .into_iter()
            .filter(|o| o.rejected)
            .map(|o| o.rank)
            .collect())
    }
}

fn check_rank(m: usize, r: usize) -> CointResult<()> {
    if r >= m {
        return Err(CointegrationError::InvalidParameter {
            parameter: "r".to_string(),
            value: r as f64,
            constraint: format!("[0, {})", m),
        });
    }
    Ok(())
}
