//! Mean-field coordinate ascent for Bayesian linear regression.
//!
//! Alternates between
//! - `q(w, τ)`: `V = (diag(E[α]) + XᵀX)⁻¹`, `w = V Xᵀy`, `τ ~ Gamma(a_N, b_N)`
//! - `q(α)`: `α[g] ~ Gamma(c_N, d_N[g])` over precision groups
//!
//! until the ELBO stops changing.

use crate::design::add_intercept;
use crate::vb_elbo::{evidence_lower_bound, ElboTerms};
use crate::vb_errors::{VbError, VbResult};
use crate::vb_fit::VbFit;
use crate::vb_options::VbOptions;

use log::{debug, info, warn};
use matrix_param::dvector_gamma::GammaVector;
use matrix_param::traits::{Inference, TwoStatParam};
use matrix_util::traits::SpdOps;
use nalgebra::{DMatrix, DVector};
use std::sync::atomic::{AtomicBool, Ordering};

/// Fit the model to a design matrix `x` (N x D, intercept column
/// included if wanted) and response `y` (N).
///
/// Each iteration inverts a `D x D` matrix via Cholesky, `O(D³)`.
///
/// # Errors
/// * [`VbError::InvalidInput`] for mismatched, empty, or non-finite
///   data and invalid options
/// * [`VbError::SingularSystem`] if `diag(E[α]) + XᵀX` is not
///   positive-definite at some iteration
pub fn fit(x: &DMatrix<f64>, y: &DVector<f64>, options: &VbOptions) -> VbResult<VbFit> {
    let never = AtomicBool::new(false);
    fit_with_cancel(x, y, options, &never)
}

/// [`fit`] after prepending the intercept column to raw predictors
pub fn fit_with_intercept(
    x_raw: &DMatrix<f64>,
    y: &DVector<f64>,
    options: &VbOptions,
) -> VbResult<VbFit> {
    fit(&add_intercept(x_raw), y, options)
}

/// [`fit`] that checks `cancel` before every iteration and stops with
/// [`VbError::Cancelled`] once it is set.
pub fn fit_with_cancel(
    x: &DMatrix<f64>,
    y: &DVector<f64>,
    options: &VbOptions,
    cancel: &AtomicBool,
) -> VbResult<VbFit> {
    options.validate()?;
    let obs = Observations::new(x, y)?;
    let groups = PrecisionGroups::new(obs.ncols(), options.ard);

    info!(
        "VB linear regression: N = {}, D = {}, ARD = {}",
        obs.nrows(),
        obs.ncols(),
        options.ard
    );

    let mut state = PosteriorState::init(&obs, &groups, options);
    let mut elbo_trace = Vec::with_capacity(options.max_iter.min(1024));

    let mut iteration = 0;
    let mut lq = 0.0;
    let mut tol_current;

    // at least one iteration, whatever `tol` is
    loop {
        if cancel.load(Ordering::Relaxed) {
            return Err(VbError::Cancelled {
                iteration: iteration + 1,
            });
        }

        iteration += 1;
        state = coordinate_step(&obs, &groups, &state, iteration)?;

        let lq_new = state.elbo(&obs);
        tol_current = (lq_new - lq).abs();
        lq = lq_new;
        elbo_trace.push(lq);

        debug!("[{}] ELBO = {}, |ΔELBO| = {:e}", iteration, lq, tol_current);

        if tol_current <= options.tol || iteration >= options.max_iter {
            break;
        }
    }

    let hit_iteration_cap = tol_current > options.tol;

    if hit_iteration_cap {
        warn!(
            "stopped at max_iter = {} with |ΔELBO| = {:e} > tol = {:e}",
            options.max_iter, tol_current, options.tol
        );
    } else {
        info!("converged after {} iterations, ELBO = {}", iteration, lq);
    }

    let sigma = residual_scale(state.e_wtau, state.w.norm_squared());
    if !sigma.is_finite() {
        warn!("residual scale is undefined for a null fit (‖w‖² = 0)");
    }

    Ok(VbFit {
        coef: state.w,
        coef_covariance: state.v,
        sigma,
        elbo: lq,
        elbo_trace,
        iterations: iteration,
        tolerance: tol_current,
        hit_iteration_cap,
        noise_precision: state.noise,
        coef_precision: state.alpha,
        expected_alpha: state.e_alpha,
        options: *options,
    })
}

/// `sqrt(1 / (E_wτ / ‖w‖²))`, `NaN` when it is undefined
fn residual_scale(e_wtau: f64, ww: f64) -> f64 {
    if ww > 0.0 && e_wtau > 0.0 {
        (1.0 / (e_wtau / ww)).sqrt()
    } else {
        f64::NAN
    }
}

/// Data and their sufficient statistics, computed once per fit
pub(crate) struct Observations<'a> {
    x: &'a DMatrix<f64>,
    y: &'a DVector<f64>,
    xx: DMatrix<f64>,
    xy: DVector<f64>,
}

impl<'a> Observations<'a> {
    pub(crate) fn new(x: &'a DMatrix<f64>, y: &'a DVector<f64>) -> VbResult<Self> {
        if x.nrows() != y.len() {
            return Err(VbError::InvalidInput(format!(
                "predictor matrix has {} rows but the response has {} entries",
                x.nrows(),
                y.len()
            )));
        }
        if x.nrows() == 0 || x.ncols() == 0 {
            return Err(VbError::InvalidInput(format!(
                "empty predictor matrix ({} x {})",
                x.nrows(),
                x.ncols()
            )));
        }
        if let Some(i) = x.iter().position(|v| !v.is_finite()) {
            return Err(VbError::InvalidInput(format!(
                "non-finite predictor at row {}, column {}",
                i % x.nrows(),
                i / x.nrows()
            )));
        }
        if let Some(i) = y.iter().position(|v| !v.is_finite()) {
            return Err(VbError::InvalidInput(format!(
                "non-finite response at row {}",
                i
            )));
        }

        Ok(Self {
            x,
            y,
            xx: x.tr_mul(x),
            xy: x.tr_mul(y),
        })
    }

    pub(crate) fn nrows(&self) -> usize {
        self.x.nrows()
    }

    pub(crate) fn ncols(&self) -> usize {
        self.x.ncols()
    }

    /// `‖y - Xw‖²`
    fn rss(&self, w: &DVector<f64>) -> f64 {
        (self.y - self.x * w).norm_squared()
    }
}

/// Coefficients sharing one Gamma posterior over their prior
/// precision: all of them without ARD, each on its own with ARD.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PrecisionGroups {
    dim: usize,
    ard: bool,
}

impl PrecisionGroups {
    pub(crate) fn new(dim: usize, ard: bool) -> Self {
        Self { dim, ard }
    }

    pub(crate) fn len(&self) -> usize {
        if self.ard {
            self.dim
        } else {
            1
        }
    }

    fn group(&self, j: usize) -> usize {
        if self.ard {
            j
        } else {
            0
        }
    }

    /// shape increments: half the group size
    fn shape_stat(&self) -> DVector<f64> {
        let mut stat = DVector::zeros(self.len());
        for j in 0..self.dim {
            stat[self.group(j)] += 0.5;
        }
        stat
    }

    /// rate increments: `1/2 Σ_{j in g} (E[τ] w[j]² + V[j,j])`
    fn rate_stat(&self, w: &DVector<f64>, v: &DMatrix<f64>, e_tau: f64) -> DVector<f64> {
        let mut stat = DVector::zeros(self.len());
        for j in 0..self.dim {
            stat[self.group(j)] += 0.5 * (e_tau * w[j] * w[j] + v[(j, j)]);
        }
        stat
    }

    /// one value per coefficient from one value per group
    fn broadcast(&self, per_group: &DVector<f64>) -> DVector<f64> {
        DVector::from_fn(self.dim, |j, _| per_group[self.group(j)])
    }
}

/// Variational parameters after one iteration; replaced as a whole by
/// the next one.
#[derive(Debug, Clone)]
pub(crate) struct PosteriorState {
    pub(crate) w: DVector<f64>,
    pub(crate) v: DMatrix<f64>,
    pub(crate) log_det_v: f64,
    /// `‖y - Xw‖²` at this `w`
    pub(crate) rss: f64,
    /// `q(τ)`, shape fixed at `a0 + N/2`
    pub(crate) noise: GammaVector,
    /// `q(α)`, shape fixed at `c0 + |g|/2`
    pub(crate) alpha: GammaVector,
    /// `E[α]` per coefficient
    pub(crate) e_alpha: DVector<f64>,
    /// `E[τ]‖w‖² + tr(V)`
    pub(crate) e_wtau: f64,
}

impl PosteriorState {
    /// `w = 0`, `E[α] = c0 / d0`
    pub(crate) fn init(obs: &Observations, groups: &PrecisionGroups, options: &VbOptions) -> Self {
        let dd = obs.ncols();
        let w = DVector::zeros(dd);
        let rss = obs.rss(&w);

        let mut noise = GammaVector::new(1, options.a0, options.b0);
        noise.update_stat(
            &DVector::from_element(1, 0.5 * obs.nrows() as f64),
            &DVector::zeros(1),
        );
        noise.calibrate();

        let mut alpha = GammaVector::new(groups.len(), options.c0, options.d0);
        alpha.update_stat(&groups.shape_stat(), &DVector::zeros(groups.len()));
        alpha.calibrate();

        Self {
            w,
            v: DMatrix::zeros(dd, dd),
            log_det_v: 0.0,
            rss,
            noise,
            alpha,
            e_alpha: DVector::from_element(dd, options.c0 / options.d0),
            e_wtau: 0.0,
        }
    }

    fn elbo(&self, obs: &Observations) -> f64 {
        evidence_lower_bound(&ElboTerms {
            nobs: obs.nrows(),
            rss: self.rss,
            xx: &obs.xx,
            v: &self.v,
            log_det_v: self.log_det_v,
            noise: &self.noise,
            alpha: &self.alpha,
        })
    }
}

/// `q(w, τ)` given `E[α]`, then `q(α)` given `q(w, τ)`
pub(crate) fn coordinate_step(
    obs: &Observations,
    groups: &PrecisionGroups,
    prev: &PosteriorState,
    iteration: usize,
) -> VbResult<PosteriorState> {
    let nn = obs.nrows() as f64;

    /////////////////////////////////////////////
    // 1. noise precision: b_N from previous w //
    /////////////////////////////////////////////

    // wᵀ diag(E[α]) w
    let penalty = prev
        .w
        .iter()
        .zip(prev.e_alpha.iter())
        .map(|(w, a)| a * w * w)
        .sum::<f64>();

    let mut noise = prev.noise.clone();
    noise.update_stat(
        &DVector::from_element(1, 0.5 * nn),
        &DVector::from_element(1, 0.5 * (prev.rss + penalty)),
    );
    noise.calibrate();
    let e_tau = noise.posterior_mean()[0];

    //////////////////////////////////////
    // 2. coefficients: V and w = V Xᵀy //
    //////////////////////////////////////

    let v_inv = obs.xx.add_diagonal(prev.e_alpha.as_slice());
    let (v, log_det_v_inv) = v_inv
        .spd_inverse_logdet()
        .ok_or(VbError::SingularSystem { iteration })?;

    let w = &v * &obs.xy;
    let rss = obs.rss(&w);
    let e_wtau = e_tau * w.norm_squared() + v.trace();

    ////////////////////////////////////////
    // 3. coefficient precision per group //
    ////////////////////////////////////////

    let mut alpha = prev.alpha.clone();
    alpha.update_stat(&groups.shape_stat(), &groups.rate_stat(&w, &v, e_tau));
    alpha.calibrate();
    let e_alpha = groups.broadcast(alpha.posterior_mean());

    Ok(PosteriorState {
        w,
        v,
        log_det_v: -log_det_v_inv,
        rss,
        noise,
        alpha,
        e_alpha,
        e_wtau,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn toy_data() -> (DMatrix<f64>, DVector<f64>) {
        #[rustfmt::skip]
        let x = DMatrix::from_row_slice(6, 3, &[
            1.0, 0.5, -1.2,
            1.0, -0.3, 0.8,
            1.0, 1.7, 0.1,
            1.0, -1.1, -0.4,
            1.0, 0.2, 1.5,
            1.0, 0.9, -0.7,
        ]);
        let y = DVector::from_vec(vec![0.3, 1.9, 2.8, -1.0, 3.1, 0.4]);
        (x, y)
    }

    #[test]
    fn groups_partition_coefficients() {
        let shared = PrecisionGroups::new(4, false);
        assert_eq!(shared.len(), 1);
        assert_eq!(shared.shape_stat().as_slice(), &[2.0]);

        let ard = PrecisionGroups::new(4, true);
        assert_eq!(ard.len(), 4);
        assert_eq!(ard.shape_stat().as_slice(), &[0.5; 4]);

        let v = DMatrix::from_diagonal(&DVector::from_vec(vec![0.1, 0.2, 0.3, 0.4]));
        let w = DVector::from_vec(vec![1.0, -1.0, 2.0, 0.0]);
        let shared_rate = shared.rate_stat(&w, &v, 2.0)[0];
        let ard_rate = ard.rate_stat(&w, &v, 2.0).sum();
        // 1/2 (E[τ] ‖w‖² + tr(V))
        assert_abs_diff_eq!(shared_rate, 0.5 * (2.0 * 6.0 + 1.0), epsilon = 1e-12);
        assert_abs_diff_eq!(shared_rate, ard_rate, epsilon = 1e-12);
    }

    #[test]
    fn initial_state_follows_priors() {
        let (x, y) = toy_data();
        let options = VbOptions::default();
        let obs = Observations::new(&x, &y).unwrap();

        let state = PosteriorState::init(&obs, &PrecisionGroups::new(3, false), &options);
        assert_eq!(state.noise.shape()[0], options.a0 + 3.0);
        assert_eq!(state.alpha.shape()[0], options.c0 + 1.5);
        assert_eq!(state.rss, y.norm_squared());
        assert!(state.e_alpha.iter().all(|&a| a == options.c0 / options.d0));

        let state = PosteriorState::init(&obs, &PrecisionGroups::new(3, true), &options);
        assert!(state.alpha.shape().iter().all(|&c| c == options.c0 + 0.5));
    }

    #[test]
    fn uniform_precision_gives_same_coefficient_update() {
        let (x, y) = toy_data();
        let options = VbOptions::default();
        let obs = Observations::new(&x, &y).unwrap();

        let shared = PrecisionGroups::new(3, false);
        let ard = PrecisionGroups::new(3, true);

        // advance once so that w != 0, then force a uniform E[α]
        let mut start_shared = PosteriorState::init(&obs, &shared, &options);
        start_shared = coordinate_step(&obs, &shared, &start_shared, 1).unwrap();
        start_shared.e_alpha.fill(0.7);

        let mut start_ard = PosteriorState::init(&obs, &ard, &options);
        start_ard.w = start_shared.w.clone();
        start_ard.rss = start_shared.rss;
        start_ard.e_alpha.fill(0.7);

        let next_shared = coordinate_step(&obs, &shared, &start_shared, 2).unwrap();
        let next_ard = coordinate_step(&obs, &ard, &start_ard, 2).unwrap();

        assert_eq!(next_shared.w, next_ard.w);
        assert_eq!(next_shared.v, next_ard.v);
        assert_eq!(next_shared.log_det_v, next_ard.log_det_v);
        assert_eq!(next_shared.e_wtau, next_ard.e_wtau);

        // E[α]‖w‖² vs wᵀ diag(E[α]) w
        let b_shared = next_shared.noise.rate()[0];
        let b_expected = options.b0
            + 0.5 * (start_shared.rss + 0.7 * start_shared.w.norm_squared());
        assert_abs_diff_eq!(b_shared, b_expected, epsilon = 1e-10);
        assert_abs_diff_eq!(b_shared, next_ard.noise.rate()[0], epsilon = 1e-10);
    }

    #[test]
    fn singular_system_is_reported_with_iteration() {
        let (x, y) = toy_data();
        let obs = Observations::new(&x, &y).unwrap();
        let groups = PrecisionGroups::new(3, true);

        let mut state = PosteriorState::init(&obs, &groups, &VbOptions::default());
        // a negative precision large enough to break positive-definiteness
        state.e_alpha[1] = -1e6;

        let err = coordinate_step(&obs, &groups, &state, 4).unwrap_err();
        assert_eq!(err, VbError::SingularSystem { iteration: 4 });
    }

    #[test]
    fn residual_scale_policy() {
        assert_abs_diff_eq!(residual_scale(4.0, 1.0), 0.5);
        assert!(residual_scale(1.0, 0.0).is_nan());
        assert!(residual_scale(0.0, 0.0).is_nan());
    }
}
