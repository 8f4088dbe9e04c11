use crate::io::*;
use crate::traits::*;
use nalgebra::DVector;
use special::Gamma;

/// Gamma-distributed parameters `λ[g] ~ Gamma(a[g], b[g])` (shape, rate)
/// sharing one prior `Gamma(a0, b0)`.
///
/// The shape and rate are kept as sufficient statistics on top of the
/// prior, so a variational update is `update_stat(Δa, Δb)` followed by
/// `calibrate()` to refresh the posterior summaries.
#[derive(Debug, Clone)]
pub struct GammaVector {
    //////////////////////
    // hyper parameters //
    //////////////////////
    a0: f64,
    b0: f64,
    ///////////////////////////
    // sufficient statistics //
    ///////////////////////////
    a_stat: DVector<f64>,
    b_stat: DVector<f64>,
    //////////////////////////
    // estimated parameters //
    //////////////////////////
    estimated_mean: DVector<f64>,
    estimated_sd: DVector<f64>,
    estimated_log_mean: DVector<f64>,
}

impl GammaVector {
    /// prior shape `a0`
    pub fn prior_shape(&self) -> f64 {
        self.a0
    }

    /// prior rate `b0`
    pub fn prior_rate(&self) -> f64 {
        self.b0
    }

    /// posterior shape `a0 + Σ Δa`
    pub fn shape(&self) -> &DVector<f64> {
        &self.a_stat
    }

    /// posterior rate `b0 + Σ Δb`
    pub fn rate(&self) -> &DVector<f64> {
        &self.b_stat
    }
}

impl ParamIo for GammaVector {}

impl TwoStatParam for GammaVector {
    type Mat = DVector<f64>;
    type Scalar = f64;

    fn new(dim: usize, a: Self::Scalar, b: Self::Scalar) -> Self {
        let mut ret = Self {
            a0: a,
            b0: b,
            a_stat: DVector::from_element(dim, a),
            b_stat: DVector::from_element(dim, b),
            estimated_mean: DVector::zeros(dim),
            estimated_sd: DVector::zeros(dim),
            estimated_log_mean: DVector::zeros(dim),
        };
        ret.calibrate();
        ret
    }

    fn add_stat(&mut self, add_a: &Self::Mat, add_b: &Self::Mat) {
        self.a_stat += add_a;
        self.b_stat += add_b;
    }

    fn update_stat(&mut self, update_a: &Self::Mat, update_b: &Self::Mat) {
        self.reset_stat();
        self.add_stat(update_a, update_b);
    }

    fn reset_stat(&mut self) {
        self.a_stat.fill(self.a0);
        self.b_stat.fill(self.b0);
    }

    fn calibrate(&mut self) {
        self.map_calibrate_mean();
        self.map_calibrate_sd();
        self.map_calibrate_log_mean();
    }

    fn map_calibrate_mean(&mut self) {
        self.estimated_mean = self.a_stat.zip_map(&self.b_stat, |a, b| a / b);
    }

    fn map_calibrate_sd(&mut self) {
        self.estimated_sd = self.a_stat.zip_map(&self.b_stat, |a, b| a.sqrt() / b);
    }

    fn map_calibrate_log_mean(&mut self) {
        self.estimated_log_mean = self
            .a_stat
            .zip_map(&self.b_stat, |a, b| a.digamma() - b.ln());
    }
}

impl Inference for GammaVector {
    type Mat = DVector<f64>;
    type Scalar = f64;

    fn posterior_mean(&self) -> &Self::Mat {
        &self.estimated_mean
    }

    fn posterior_sd(&self) -> &Self::Mat {
        &self.estimated_sd
    }

    fn posterior_log_mean(&self) -> &Self::Mat {
        &self.estimated_log_mean
    }

    fn len(&self) -> usize {
        self.a_stat.len()
    }
}
