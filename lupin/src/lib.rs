//! Variational Bayesian linear regression with optional Automatic
//! Relevance Determination (ARD).
//!
//! A deterministic alternative to MCMC for the Gaussian linear model
//!
//! ```text
//! y | w, τ ~ N(X w, τ⁻¹ I)
//! w | τ, α ~ N(0, (τ α)⁻¹)        α shared, or one α[j] per coefficient (ARD)
//! τ ~ Gamma(a0, b0),  α ~ Gamma(c0, d0)
//! ```
//!
//! fitted by mean-field coordinate ascent. Each iteration inverts the
//! `D x D` coefficient precision matrix, so the cost grows as `O(D³)`
//! per iteration and dominates run time for wide design matrices.
//!
//! # Usage
//!
//! ```ignore
//! use lupin::{design::add_intercept, fit, VbOptions};
//!
//! let x = add_intercept(&raw_predictors);
//! let options = VbOptions { ard: true, ..VbOptions::default() };
//! let res = fit(&x, &y, &options)?;
//! println!("{} {}", res.coef(), res.sigma());
//! ```

/// Design matrix helpers (intercept column)
pub mod design;

/// Ordinary least squares reference fit
pub mod ols;

/// Synthetic data for demonstrations and tests
pub mod simulate;

/// Evidence lower bound
pub mod vb_elbo;

/// Error taxonomy
pub mod vb_errors;

/// Result bundle
pub mod vb_fit;

/// Hyperparameters and stopping rules
pub mod vb_options;

/// Coordinate ascent loop
pub mod vb_solver;

pub use vb_errors::{VbError, VbResult};
pub use vb_fit::{VbFit, VbSummary};
pub use vb_options::VbOptions;
pub use vb_solver::{fit, fit_with_cancel, fit_with_intercept};
