//! Numerical stability tests for the Johansen eigensystem.
//!
//! The eigenvalues are squared canonical correlations, so they must not move
//! when series are rescaled or reordered, and the spectrum of the product
//! matrix must stay real on well-posed inputs.

use assert_approx_eq::assert_approx_eq;
use johansen_cointegration::generators::{cointegrated_pair, random_walks, GeneratorConfig};
use johansen_cointegration::{johansen, CointegrationError, JohansenConfig};
use nalgebra::DMatrix;

fn mixed_system(seed: u64) -> DMatrix<f64> {
    let walk = random_walks(
        1,
        &GeneratorConfig {
            length: 300,
            seed: Some(seed + 1000),
            ..GeneratorConfig::default()
        },
    )
    .unwrap();
    let pair = cointegrated_pair(&GeneratorConfig {
        length: 300,
        seed: Some(seed),
        coupling: 0.8,
        noise_std: 0.5,
        ..GeneratorConfig::default()
    })
    .unwrap();
    DMatrix::from_fn(300, 3, |i, j| match j {
        0 => pair[(i, 0)],
        1 => walk[(i, 0)],
        _ => pair[(i, 1)],
    })
}

#[test]
fn test_eigenvalues_invariant_to_rescaling() {
    let x = mixed_system(4);
    let scales = [1e3, 1e-2, 7.0];
    let scaled = DMatrix::from_fn(x.nrows(), 3, |i, j| x[(i, j)] * scales[j]);

    for model in 0..=4u8 {
        let config = JohansenConfig::from_raw(2, model, true, 1).unwrap();
        let base = johansen(x.clone(), config).unwrap();
        let other = johansen(scaled.clone(), config).unwrap();
        for (a, b) in base.eigenvalues().iter().zip(other.eigenvalues().iter()) {
            assert_approx_eq!(*a, *b, 1e-8);
        }
        assert_eq!(base.rejected_ranks, other.rejected_ranks);
    }
}

#[test]
fn test_eigenvalues_invariant_to_column_order() {
    let x = mixed_system(9);
    let permuted = DMatrix::from_fn(x.nrows(), 3, |i, j| x[(i, 2 - j)]);

    let config = JohansenConfig::from_raw(1, 2, false, 2).unwrap();
    let base = johansen(x, config).unwrap();
    let other = johansen(permuted, config).unwrap();
    for (a, b) in base.eigenvalues().iter().zip(other.eigenvalues().iter()) {
        assert_approx_eq!(*a, *b, 1e-10);
    }
}

#[test]
fn test_product_spectrum_is_real_on_well_posed_input() {
    for seed in 0..5u64 {
        let result = johansen(mixed_system(seed), JohansenConfig::default()).unwrap();
        assert!(
            !result.eigensystem.is_numerically_unstable(),
            "seed {}: imaginary part {}",
            seed,
            result.eigensystem.max_imaginary_part
        );
        assert!(result
            .eigenvalues()
            .iter()
            .all(|&l| (0.0..1.0).contains(&l)));
    }
}

#[test]
fn test_large_level_offsets() {
    // Levels near 1e6 with unit increments: the constant absorbs the offset
    let x = mixed_system(2).add_scalar(1e6);
    let base = johansen(mixed_system(2), JohansenConfig::default()).unwrap();
    let shifted = johansen(x, JohansenConfig::default()).unwrap();
    for (a, b) in base.eigenvalues().iter().zip(shifted.eigenvalues().iter()) {
        assert_approx_eq!(*a, *b, 1e-6);
    }
}

#[test]
fn test_short_sample_with_spare_degrees_of_freedom() {
    // k = 2 with constant and trend: 8 regressors against t = 17 rows
    let x = mixed_system(6).rows(0, 20).clone_owned();
    let config = JohansenConfig::from_raw(2, 4, true, 1).unwrap();
    let result = johansen(x, config).unwrap();

    let values = result.eigenvalues().as_slice();
    assert_eq!(result.outcomes.len(), 3);
    assert!(values.windows(2).all(|w| w[0] >= w[1]), "{:?}", values);
    assert!(values.iter().all(|l| (0.0..1.0).contains(l)), "{:?}", values);
}

#[test]
fn test_sample_exhausted_by_regressors_is_singular() {
    // t = 9 rows against 8 regressors leaves a one-dimensional residual
    // space, too small for three series
    let x = mixed_system(6).rows(0, 12).clone_owned();
    let config = JohansenConfig::from_raw(2, 4, true, 1).unwrap();
    match johansen(x, config) {
        Err(CointegrationError::SingularCovariance { .. }) => {}
        other => panic!("Expected SingularCovariance, got {:?}", other.map(|_| ())),
    }
}
