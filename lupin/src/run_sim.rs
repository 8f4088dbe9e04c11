use anyhow::Result;
use clap::Args;
use log::info;
use nalgebra::DVector;

use lupin::simulate::{simulate_linear, simulate_sparse, SparseSimParams};
use matrix_util::common_io::mkdir;
use matrix_util::traits::IoOps;

#[derive(Args, Debug)]
pub struct SimArgs {
    #[arg(short = 'n', long, default_value_t = 100, help = "Number of observations")]
    nobs: usize,

    #[arg(
        short = 'd',
        long,
        default_value_t = 3,
        help = "Number of predictors (ignored with --coef)"
    )]
    num_predictors: usize,

    #[arg(
        long,
        value_delimiter(','),
        allow_hyphen_values = true,
        help = "True coefficients, intercept first",
        long_help = "Comma-separated true coefficients with the intercept first.\n\
		     Example: --coef 1,2,3,5 gives y = 1 + 2 X1 + 3 X2 + 5 X3 + ε"
    )]
    coef: Option<Vec<f64>>,

    #[arg(
        long,
        help = "Number of non-zero effects (default: all predictors)",
        long_help = "Only the first K predictors carry an effect drawn\n\
		     from N(0, effect-sd²); the rest are exactly zero."
    )]
    num_causal: Option<usize>,

    #[arg(long, default_value_t = 1.0, help = "Intercept of the sparse design")]
    intercept: f64,

    #[arg(long, default_value_t = 1.0, help = "Standard deviation of the effects")]
    effect_sd: f64,

    #[arg(long, default_value_t = 1.0, help = "Residual standard deviation")]
    noise_sd: f64,

    #[arg(long, default_value_t = 42, help = "Random seed")]
    seed: u64,

    #[arg(short, long, required = true, help = "Output header")]
    out: Box<str>,
}

pub fn run_sim(args: &SimArgs) -> Result<()> {
    let sim = match &args.coef {
        Some(coef) => simulate_linear(
            args.nobs,
            &DVector::from_column_slice(coef),
            args.noise_sd,
            args.seed,
        )?,
        None => simulate_sparse(&SparseSimParams {
            nobs: args.nobs,
            num_predictors: args.num_predictors,
            num_causal: args.num_causal.unwrap_or(args.num_predictors),
            intercept: args.intercept,
            effect_sd: args.effect_sd,
            noise_sd: args.noise_sd,
            seed: args.seed,
        })?,
    };

    mkdir(&args.out)?;

    sim.x.to_tsv(&format!("{}.x.tsv", args.out))?;
    sim.y.to_tsv(&format!("{}.y.tsv", args.out))?;
    sim.beta.to_tsv(&format!("{}.beta.tsv", args.out))?;

    let param_file = format!("{}.parameters.json", args.out);
    let params = serde_json::json!({
        "command": "simulate",
        "num_observations": args.nobs,
        "num_predictors": sim.x.ncols(),
        "num_causal": args.num_causal,
        "coef": args.coef,
        "intercept": args.intercept,
        "effect_sd": args.effect_sd,
        "noise_sd": args.noise_sd,
        "seed": args.seed,
    });
    std::fs::write(&param_file, serde_json::to_string_pretty(&params)?)?;
    info!("Wrote parameters: {}", param_file);

    Ok(())
}
