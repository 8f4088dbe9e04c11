use crate::vb_options::VbOptions;
use matrix_param::dvector_gamma::GammaVector;
use matrix_param::traits::Inference;
use nalgebra::{DMatrix, DVector};
use serde::Serialize;

/// Fitted variational posterior. Immutable once returned by
/// [`crate::fit`].
#[derive(Debug, Clone)]
pub struct VbFit {
    pub(crate) coef: DVector<f64>,
    pub(crate) coef_covariance: DMatrix<f64>,
    pub(crate) sigma: f64,
    pub(crate) elbo: f64,
    pub(crate) elbo_trace: Vec<f64>,
    pub(crate) iterations: usize,
    pub(crate) tolerance: f64,
    pub(crate) hit_iteration_cap: bool,
    pub(crate) noise_precision: GammaVector,
    pub(crate) coef_precision: GammaVector,
    pub(crate) expected_alpha: DVector<f64>,
    pub(crate) options: VbOptions,
}

impl VbFit {
    /// posterior mean of the coefficients, intercept first when the
    /// design matrix carries one
    pub fn coef(&self) -> &DVector<f64> {
        &self.coef
    }

    /// `V = (diag(E[α]) + XᵀX)⁻¹`, the coefficient covariance up to the
    /// noise scale τ⁻¹
    pub fn coef_covariance(&self) -> &DMatrix<f64> {
        &self.coef_covariance
    }

    /// Posterior standard deviation of each coefficient,
    /// `sqrt(V[j,j] / E[τ])`
    pub fn coef_sd(&self) -> DVector<f64> {
        let e_tau = self.noise_precision.posterior_mean()[0];
        self.coef_covariance.diagonal().map(|v| (v / e_tau).sqrt())
    }

    /// Residual scale `sqrt(1 / (E_wτ / ‖w‖²))` with
    /// `E_wτ = E[τ]‖w‖² + tr(V)`, evaluated at the last iterate.
    ///
    /// This mixes an expected sum of squares with a precision, so read
    /// it as a legacy summary rather than the posterior predictive
    /// noise level (`1 / sqrt(E[τ])` is closer to that).
    ///
    /// `NaN` when `‖w‖² = 0`, where the ratio is undefined.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// ELBO at the last iteration
    pub fn elbo(&self) -> f64 {
        self.elbo
    }

    /// ELBO after each iteration
    pub fn elbo_trace(&self) -> &[f64] {
        &self.elbo_trace
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// `|ΔELBO|` of the last iteration
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// The loop stopped at `max_iter` without reaching `tol`
    pub fn hit_iteration_cap(&self) -> bool {
        self.hit_iteration_cap
    }

    /// `q(τ) = Gamma(a_N, b_N)`
    pub fn noise_precision(&self) -> &GammaVector {
        &self.noise_precision
    }

    /// `q(α)`: one component without ARD, one per coefficient with ARD
    pub fn coef_precision(&self) -> &GammaVector {
        &self.coef_precision
    }

    /// `E[α]` broadcast to one value per coefficient
    pub fn expected_alpha(&self) -> &DVector<f64> {
        &self.expected_alpha
    }

    pub fn options(&self) -> &VbOptions {
        &self.options
    }

    pub fn summary(&self) -> VbSummary {
        VbSummary {
            coef: self.coef.iter().copied().collect(),
            coef_sd: self.coef_sd().iter().copied().collect(),
            sigma: self.sigma,
            elbo: self.elbo,
            iterations: self.iterations,
            tolerance: self.tolerance,
            hit_iteration_cap: self.hit_iteration_cap,
            noise_precision_mean: self.noise_precision.posterior_mean()[0],
            noise_precision_sd: self.noise_precision.posterior_sd()[0],
            expected_alpha: self.expected_alpha.iter().copied().collect(),
            options: self.options,
        }
    }
}

/// Plain-data view of a [`VbFit`] for reports
#[derive(Debug, Clone, Serialize)]
pub struct VbSummary {
    pub coef: Vec<f64>,
    pub coef_sd: Vec<f64>,
    pub sigma: f64,
    pub elbo: f64,
    pub iterations: usize,
    pub tolerance: f64,
    pub hit_iteration_cap: bool,
    pub noise_precision_mean: f64,
    pub noise_precision_sd: f64,
    pub expected_alpha: Vec<f64>,
    pub options: VbOptions,
}
