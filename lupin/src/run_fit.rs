use anyhow::Result;
use clap::Args;
use log::info;
use nalgebra::{DMatrix, DVector};

use lupin::design::add_intercept;
use lupin::ols::ols;
use lupin::{fit, VbOptions};
use matrix_param::io::ParamIo;
use matrix_util::common_io::{mkdir, write_types};
use matrix_util::traits::{IoOps, MatOps};

#[derive(Args, Debug)]
pub struct FitArgs {
    #[arg(
        short = 'x',
        long = "x-data",
        required = true,
        help = "Predictor matrix file (N x d)",
        long_help = "Predictor matrix, one observation per line.\n\
		     An intercept column is added unless --no-intercept."
    )]
    x_file: Box<str>,

    #[arg(
        short = 'y',
        long = "y-data",
        required = true,
        help = "Response file (N)",
        long_help = "Response vector, one value per line (or a single row)."
    )]
    y_file: Box<str>,

    #[arg(short, long, required = true, help = "Output header")]
    out: Box<str>,

    #[arg(long, default_value = "\t", help = "Field separator of the input files")]
    delim: Box<str>,

    #[arg(long, default_value_t = false, help = "Skip the first line of each input file")]
    header: bool,

    #[arg(long, default_value_t = false, help = "Do not prepend an intercept column")]
    no_intercept: bool,

    #[arg(
        long,
        default_value_t = false,
        help = "Standardize predictor columns before fitting"
    )]
    standardize: bool,

    #[arg(
        long,
        default_value_t = false,
        help = "Automatic relevance determination",
        long_help = "Give each coefficient its own prior precision\n\
		     so that irrelevant predictors shrink toward zero."
    )]
    ard: bool,

    #[arg(long, default_value_t = 1e-2, help = "Noise precision prior shape a0")]
    a0: f64,

    #[arg(long, default_value_t = 1e-4, help = "Noise precision prior rate b0")]
    b0: f64,

    #[arg(long, default_value_t = 1e-2, help = "Coefficient precision prior shape c0")]
    c0: f64,

    #[arg(long, default_value_t = 1e-4, help = "Coefficient precision prior rate d0")]
    d0: f64,

    #[arg(long, default_value_t = 1e-8, help = "ELBO convergence tolerance")]
    tol: f64,

    #[arg(long, default_value_t = 1000, help = "Maximum number of iterations")]
    max_iter: usize,

    #[arg(
        long,
        default_value_t = false,
        help = "Also report ordinary least squares estimates"
    )]
    ols: bool,
}

impl FitArgs {
    fn options(&self) -> VbOptions {
        VbOptions {
            a0: self.a0,
            b0: self.b0,
            c0: self.c0,
            d0: self.d0,
            tol: self.tol,
            max_iter: self.max_iter,
            ard: self.ard,
        }
    }
}

pub fn run_fit(args: &FitArgs) -> Result<()> {
    let skip = args.header.then_some(0);
    let delim: &str = &args.delim;

    let mut x = DMatrix::<f64>::read_file_delim(&args.x_file, delim, skip)?;
    let y = DVector::<f64>::read_file_delim(&args.y_file, delim, skip)?;
    info!("read X: {} x {}, y: {}", x.nrows(), x.ncols(), y.len());

    if args.standardize {
        x.scale_columns_inplace();
    }

    let x = if args.no_intercept {
        x
    } else {
        add_intercept(&x)
    };

    let res = fit(&x, &y, &args.options())?;

    mkdir(&args.out)?;

    let coef_file = format!("{}.coef.tsv", args.out);
    res.coef().to_tsv(&coef_file)?;

    let elbo_file = format!("{}.elbo.tsv", args.out);
    write_types(res.elbo_trace(), &elbo_file)?;

    ParamIo::to_tsv(res.coef_precision(), &format!("{}.alpha", args.out))?;

    let mut summary = serde_json::to_value(res.summary())?;

    if args.ols {
        let ols_fit = ols(&x, &y)?;
        summary["ols_coef"] = serde_json::json!(ols_fit.coef.iter().collect::<Vec<_>>());
        summary["ols_sigma"] = serde_json::json!(ols_fit.sigma);
    }

    let summary_file = format!("{}.summary.json", args.out);
    std::fs::write(&summary_file, serde_json::to_string_pretty(&summary)?)?;

    info!(
        "wrote {}, {}, {}",
        coef_file, elbo_file, summary_file
    );
    Ok(())
}
