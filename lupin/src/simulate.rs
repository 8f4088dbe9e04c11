use crate::design::add_intercept;
use anyhow::Result;
use log::info;
use matrix_util::traits::SampleOps;
use nalgebra::{DMatrix, DVector};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

const SEED_EFFECTS: u64 = 0x5eed_0001;
const SEED_NOISE: u64 = 0x5eed_0002;

/// Simulated regression data
#[derive(Debug, Clone)]
pub struct SimulatedData {
    /// raw predictors (N x d), no intercept column
    pub x: DMatrix<f64>,
    /// response (N)
    pub y: DVector<f64>,
    /// true coefficients (d + 1), intercept first
    pub beta: DVector<f64>,
}

/// Parameters of a sparse design: only the first `num_causal`
/// predictors carry an effect
#[derive(Debug, Clone)]
pub struct SparseSimParams {
    pub nobs: usize,
    pub num_predictors: usize,
    pub num_causal: usize,
    pub intercept: f64,
    pub effect_sd: f64,
    pub noise_sd: f64,
    pub seed: u64,
}

fn normal(sd: f64) -> Result<Normal<f64>> {
    Normal::new(0.0, sd).map_err(|e| anyhow::anyhow!("invalid standard deviation {}: {}", sd, e))
}

/// `y = [1, X] β + ε`, `X[i,j] ~ N(0,1)`, `ε[i] ~ N(0, noise_sd²)`
///
/// * `nobs` - number of observations N
/// * `beta` - coefficients with the intercept first, so `d = len - 1`
/// * `noise_sd` - residual standard deviation
/// * `seed` - random seed
pub fn simulate_linear(
    nobs: usize,
    beta: &DVector<f64>,
    noise_sd: f64,
    seed: u64,
) -> Result<SimulatedData> {
    if beta.is_empty() {
        anyhow::bail!("need at least the intercept coefficient");
    }
    if noise_sd < 0.0 {
        anyhow::bail!("noise_sd must be non-negative");
    }

    let num_predictors = beta.len() - 1;
    info!(
        "simulating {} observations x {} predictors, noise sd = {}",
        nobs, num_predictors, noise_sd
    );

    let x = DMatrix::<f64>::rnorm(nobs, num_predictors, seed);

    let mut rng = StdRng::seed_from_u64(seed ^ SEED_NOISE);
    let noise_dist = normal(noise_sd)?;
    let noise = DVector::from_fn(nobs, |_, _| noise_dist.sample(&mut rng));

    let y = add_intercept(&x) * beta + noise;

    Ok(SimulatedData {
        x,
        y,
        beta: beta.clone(),
    })
}

/// Sparse effects `β[j] ~ N(0, effect_sd²)` for `j <= num_causal`,
/// zero for the rest.
pub fn simulate_sparse(params: &SparseSimParams) -> Result<SimulatedData> {
    if params.num_causal > params.num_predictors {
        anyhow::bail!(
            "num_causal ({}) > num_predictors ({})",
            params.num_causal,
            params.num_predictors
        );
    }

    let mut rng = StdRng::seed_from_u64(params.seed ^ SEED_EFFECTS);
    let effect_dist = normal(params.effect_sd)?;

    let beta = DVector::from_fn(params.num_predictors + 1, |j, _| match j {
        0 => params.intercept,
        j if j <= params.num_causal => effect_dist.sample(&mut rng),
        _ => 0.0,
    });

    simulate_linear(params.nobs, &beta, params.noise_sd, params.seed)
}
