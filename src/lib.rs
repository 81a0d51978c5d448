//! # Johansen Cointegration Test
//!
//! Maximum-likelihood testing for cointegration among multiple time series.
//!
//! The Johansen procedure estimates candidate cointegrating relations by
//! reduced-rank regression and decides how many of them are statistically
//! supported with likelihood-ratio tests against tabulated critical values.
//!
//! ## Quick Start
//!
//! ```rust
//! use johansen_cointegration::{
//!     johansen, DeterministicTrend, JohansenConfig, SignificanceLevel, StatisticKind,
//! };
//! use johansen_cointegration::generators::{cointegrated_pair, GeneratorConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let x = cointegrated_pair(&GeneratorConfig {
//!         length: 250,
//!         seed: Some(42),
//!         ..GeneratorConfig::default()
//!     })?;
//!
//!     let config = JohansenConfig::new(1, DeterministicTrend::RestrictedConstant)?
//!         .with_statistic(StatisticKind::Trace)
//!         .with_significance(SignificanceLevel::NinetyFive);
//!
//!     let result = johansen(x, config)?;
//!     for outcome in &result.outcomes {
//!         println!(
//!             "rank <= {}: {:.2} vs {:.2}",
//!             outcome.rank, outcome.statistic, outcome.critical_value
//!         );
//!     }
//!     println!("estimated rank: {}", result.estimated_rank());
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - [`regression`]: residuals U and V of the differenced and lagged-level
//!   series on lagged differences and deterministic terms
//! - [`estimation`]: moment matrices, eigenproblem, Svv-normalization and
//!   descending ordering of the eigen-pairs
//! - [`hypothesis`]: trace and maximum-eigenvalue statistics per rank
//! - [`critical_values`]: immutable Osterwald-Lenum tables
//! - [`johansen`](mod@johansen): the orchestrating [`JohansenProcedure`]
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: stage summaries at `debug`,
//! numerical-instability warnings at `warn`. Install any logger to see them.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod config;
pub mod critical_values;
pub mod errors;
pub mod linear_algebra;

// Procedure stages
pub mod estimation;
pub mod generators;
pub mod hypothesis;
pub mod johansen;
pub mod regression;

// Re-exports for convenience - main public API
pub use config::{DeterministicTrend, JohansenConfig, SignificanceLevel, StatisticKind};
pub use critical_values::{CriticalValueKey, CriticalValueTable};
pub use errors::{CointResult, CointegrationError};
pub use estimation::{estimate, Eigensystem, MomentMatrices, IMAGINARY_TOLERANCE};
pub use hypothesis::{HypothesisTester, RankTestOutcome};
pub use johansen::{johansen, JohansenProcedure, JohansenResult};
pub use regression::{residualize, AuxiliaryRegression, Residuals};
