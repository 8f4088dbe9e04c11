mod run_fit;
mod run_sim;

use run_fit::*;
use run_sim::*;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;

#[derive(Parser, Debug)]
#[command(
    name = "lupin",
    version,
    about = "Variational Bayesian linear regression",
    long_about = "Linear regression with a normal-inverse-gamma prior fitted by\n\
		  mean-field variational inference, optionally with automatic\n\
		  relevance determination (one prior precision per coefficient)."
)]
struct Cli {
    #[arg(short = 'v', long, global = true, help = "Verbose logging")]
    verbose: bool,

    #[command(subcommand)]
    commands: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Fit a regression model",
        long_about = "Fit y ~ [1, X] by coordinate ascent variational inference.\n\
		      Writes {out}.coef.tsv, {out}.elbo.tsv,\n\
		      {out}.alpha.{mean,sd,log_mean}.tsv and {out}.summary.json"
    )]
    Fit(FitArgs),

    #[command(
        about = "Simulate regression data",
        long_about = "Simulate y = [1, X] β + ε with standard normal predictors.\n\
		      Writes {out}.x.tsv, {out}.y.tsv, {out}.beta.tsv\n\
		      and {out}.parameters.json"
    )]
    Simulate(SimArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    match &cli.commands {
        Commands::Fit(args) => {
            run_fit(args)?;
        }
        Commands::Simulate(args) => {
            run_sim(args)?;
        }
    }

    info!("Done");
    Ok(())
}
