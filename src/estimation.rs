//! Maximum-likelihood estimation of the cointegrating space.
//!
//! Given the auxiliary-regression residuals U and V, the reduced-rank
//! regression reduces to the eigenproblem
//!
//! ```text
//! Svv⁻¹ · Svu · Suu⁻¹ · Suv · e = λ · e
//! ```
//!
//! whose eigenvalues are squared canonical correlations between U and V and
//! therefore real and in [0, 1). The product matrix is not symmetric, but with
//! Svv = L·Lᵗ the problem is similar to the symmetric matrix
//! L⁻¹·Svu·Suu⁻¹·Suv·L⁻ᵗ, which is what gets decomposed. Eigenvectors are
//! mapped back through L⁻ᵗ, normalized so that Eᵗ·Svv·E = I, ordered by
//! eigenvalue descending, and given a canonical sign.
//!
//! The general (Schur) spectrum of the product matrix is computed as well;
//! an imaginary part above [`IMAGINARY_TOLERANCE`] signals numerical trouble
//! and is logged and recorded on the [`Eigensystem`].

use crate::errors::{CointResult, CointegrationError};
use crate::linear_algebra::{
    canonicalize_signs, invert_covariance, moment_matrix, normalize_eigenvectors,
    sort_eigenpairs_descending,
};
use crate::regression::Residuals;
use nalgebra::{Cholesky, DMatrix, DVector, SymmetricEigen};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest |Im λ| of the product matrix spectrum treated as rounding noise.
pub const IMAGINARY_TOLERANCE: f64 = 1e-8;

/// Upper clamp for eigenvalues so that ln(1 − λ) stays finite.
const EIGENVALUE_CEILING: f64 = 1.0 - f64::EPSILON;

/// Residual moment matrices, each (m × m).
#[derive(Debug, Clone)]
pub struct MomentMatrices {
    /// VᵗV / t
    pub svv: DMatrix<f64>,
    /// UᵗU / t
    pub suu: DMatrix<f64>,
    /// UᵗV / t
    pub suv: DMatrix<f64>,
    /// Suvᵗ
    pub svu: DMatrix<f64>,
}

impl MomentMatrices {
    /// Forms the moment matrices from residuals with t rows.
    pub fn from_residuals(residuals: &Residuals) -> CointResult<Self> {
        let t = residuals.nobs();
        if t == 0 {
            return Err(CointegrationError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }
        if residuals.v.shape() != residuals.u.shape() {
            return Err(CointegrationError::NumericalError {
                reason: format!(
                    "Residual shapes differ: U is {:?}, V is {:?}",
                    residuals.u.shape(),
                    residuals.v.shape()
                ),
                operation: Some("moment_matrices".to_string()),
            });
        }

        let (u, v) = (&residuals.u, &residuals.v);
        let suv = moment_matrix(u, v, t);
        Ok(Self {
            svv: moment_matrix(v, v, t),
            suu: moment_matrix(u, u, t),
            svu: suv.transpose(),
            suv,
        })
    }
}

/// Ordered eigen-pairs of the reduced-rank regression.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Eigensystem {
    /// Eigenvalues, non-increasing
    pub eigenvalues: DVector<f64>,
    /// Eigenvectors as columns, in eigenvalue order, with Eᵗ·Svv·E = I
    pub eigenvectors: DMatrix<f64>,
    /// Largest |Im λ| in the general spectrum of the product matrix
    pub max_imaginary_part: f64,
}

impl Eigensystem {
    /// Number of series m.
    pub fn dimension(&self) -> usize {
        self.eigenvalues.len()
    }

    /// Whether the product matrix showed non-negligible complex eigenvalues.
    pub fn is_numerically_unstable(&self) -> bool {
        self.max_imaginary_part > IMAGINARY_TOLERANCE
    }
}

/// Estimates the cointegrating vectors and their eigenvalues from residuals.
pub fn estimate(residuals: &Residuals) -> CointResult<Eigensystem> {
    let moments = MomentMatrices::from_residuals(residuals)?;
    estimate_from_moments(&moments)
}

/// Solves the eigenproblem for already-formed moment matrices.
pub fn estimate_from_moments(moments: &MomentMatrices) -> CointResult<Eigensystem> {
    let MomentMatrices { svv, suu, suv, svu } = moments;
    let m = svv.nrows();

    let svv_inv = invert_covariance(svv, "Svv")?;
    let suu_inv = invert_covariance(suu, "Suu")?;

    // Svu·Suu⁻¹·Suv is symmetric positive semi-definite
    let inner = svu * &suu_inv * suv;

    let product = &svv_inv * &inner;
    let max_imaginary_part = product
        .complex_eigenvalues()
        .iter()
        .map(|c| c.im.abs())
        .fold(0.0_f64, f64::max);
    if max_imaginary_part > IMAGINARY_TOLERANCE {
        log::warn!(
            "numerical instability: product matrix eigenvalues carry imaginary parts up to {:.3e}; using real parts",
            max_imaginary_part
        );
    }

    let chol = Cholesky::new(svv.clone()).ok_or(CointegrationError::SingularCovariance {
        matrix: "Svv".to_string(),
    })?;
    let l_inv = chol
        .l()
        .try_inverse()
        .ok_or(CointegrationError::SingularCovariance {
            matrix: "Svv".to_string(),
        })?;

    let sym = &l_inv * &inner * l_inv.transpose();
    let sym = (&sym + sym.transpose()) * 0.5;
    let eigen = SymmetricEigen::new(sym);
    let raw_vectors = l_inv.transpose() * &eigen.eigenvectors;

    let normalized = normalize_eigenvectors(&raw_vectors, svv)?;
    let (mut eigenvalues, mut eigenvectors) =
        sort_eigenpairs_descending(&eigen.eigenvalues, &normalized);
    canonicalize_signs(&mut eigenvectors);

    for lambda in eigenvalues.iter_mut() {
        let clamped = lambda.clamp(0.0, EIGENVALUE_CEILING);
        if clamped != *lambda {
            log::warn!("eigenvalue {:.3e} outside [0, 1) clamped to {:.3e}", lambda, clamped);
            *lambda = clamped;
        }
    }

    log::debug!(
        "estimated {} eigen-pairs, eigenvalues = {:?}",
        m,
        eigenvalues.as_slice()
    );

    Ok(Eigensystem {
        eigenvalues,
        eigenvectors,
        max_imaginary_part,
    })
}
