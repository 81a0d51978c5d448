//! Synthetic multivariate series for testing and validation.
//!
//! Independent Gaussian random walks (no cointegration) and a cointegrated
//! pair built from one common stochastic trend. Both are reproducible when a
//! seed is given, which makes them suitable as test fixtures and for Monte
//! Carlo checks of the test's size and power.

use crate::errors::{validate_data_length, CointResult, CointegrationError};
use nalgebra::DMatrix;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rand_distr::StandardNormal;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration parameters for synthetic series generation.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeneratorConfig {
    /// Number of observations per series
    pub length: usize,
    /// Random seed for reproducible generation
    pub seed: Option<u64>,
    /// Standard deviation of random-walk increments
    pub innovation_std: f64,
    /// Starting level of every walk
    pub start: f64,
    /// Loading β of the second series on the common trend in [`cointegrated_pair`]
    pub coupling: f64,
    /// Standard deviation of the stationary deviation in [`cointegrated_pair`]
    pub noise_std: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            length: 250,
            seed: None,
            innovation_std: 1.0,
            start: 100.0,
            coupling: 1.0,
            noise_std: 0.1,
        }
    }
}

impl GeneratorConfig {
    fn validate(&self) -> CointResult<()> {
        validate_data_length(self.length, 1)?;
        for (name, value) in [
            ("innovation_std", self.innovation_std),
            ("noise_std", self.noise_std),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(CointegrationError::InvalidParameter {
                    parameter: name.to_string(),
                    value,
                    constraint: "finite and non-negative".to_string(),
                });
            }
        }
        Ok(())
    }

    fn rng(&self) -> ChaCha20Rng {
        match self.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        }
    }
}

/// `m` independent Gaussian random walks as an (length × m) matrix.
///
/// # Example
/// ```rust
/// use johansen_cointegration::generators::{random_walks, GeneratorConfig};
///
/// let config = GeneratorConfig { length: 50, seed: Some(42), ..GeneratorConfig::default() };
/// let x = random_walks(3, &config).unwrap();
/// assert_eq!(x.shape(), (50, 3));
/// ```
pub fn random_walks(m: usize, config: &GeneratorConfig) -> CointResult<DMatrix<f64>> {
    config.validate()?;
    if m == 0 {
        return Err(CointegrationError::InvalidParameter {
            parameter: "m".to_string(),
            value: 0.0,
            constraint: "at least one series".to_string(),
        });
    }

    let mut rng = config.rng();
    let mut data = DMatrix::zeros(config.length, m);
    for j in 0..m {
        let mut level = config.start;
        for i in 0..config.length {
            let shock: f64 = rng.sample(StandardNormal);
            level += config.innovation_std * shock;
            data[(i, j)] = level;
        }
    }
    Ok(data)
}

/// Two cointegrated series: a random walk y₁ and y₂ = β·y₁ + ε with iid
/// Gaussian ε, so that y₂ − β·y₁ is stationary.
pub fn cointegrated_pair(config: &GeneratorConfig) -> CointResult<DMatrix<f64>> {
    config.validate()?;

    let mut rng = config.rng();
    let mut data = DMatrix::zeros(config.length, 2);
    let mut level = config.start;
    for i in 0..config.length {
        let shock: f64 = rng.sample(StandardNormal);
        let noise: f64 = rng.sample(StandardNormal);
        level += config.innovation_std * shock;
        data[(i, 0)] = level;
        data[(i, 1)] = config.coupling * level + config.noise_std * noise;
    }
    Ok(data)
}
