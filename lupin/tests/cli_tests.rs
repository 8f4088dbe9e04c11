use matrix_util::traits::IoOps;
use nalgebra::{DMatrix, DVector};
use std::process::Command;

fn lupin(args: &[&str]) -> anyhow::Result<()> {
    let status = Command::new(env!("CARGO_BIN_EXE_lupin")).args(args).status()?;
    anyhow::ensure!(status.success(), "lupin {:?} failed: {}", args, status);
    Ok(())
}

#[test]
fn simulate_then_fit() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let sim = dir.path().join("sim").to_string_lossy().to_string();
    let out = dir.path().join("fit/res").to_string_lossy().to_string();

    lupin(&[
        "simulate", "-n", "100", "--coef", "1,2,3,5", "--noise-sd", "2", "--seed", "7", "-o", &sim,
    ])?;

    let x = DMatrix::<f64>::from_tsv(&format!("{}.x.tsv", sim), None)?;
    let y = DVector::<f64>::from_tsv(&format!("{}.y.tsv", sim), None)?;
    assert_eq!(x.shape(), (100, 3));
    assert_eq!(y.len(), 100);

    lupin(&[
        "fit",
        "-x",
        &format!("{}.x.tsv", sim),
        "-y",
        &format!("{}.y.tsv", sim),
        "--ard",
        "--ols",
        "-o",
        &out,
    ])?;

    let coef = DVector::<f64>::from_tsv(&format!("{}.coef.tsv", out), None)?;
    let elbo = DVector::<f64>::from_tsv(&format!("{}.elbo.tsv", out), None)?;
    let alpha = DVector::<f64>::from_tsv(&format!("{}.alpha.mean.tsv", out), None)?;
    assert_eq!(coef.len(), 4);
    assert_eq!(alpha.len(), 4);
    assert!(!elbo.is_empty());

    let summary: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(format!("{}.summary.json", out))?)?;
    assert_eq!(summary["iterations"].as_u64(), Some(elbo.len() as u64));
    assert_eq!(summary["options"]["ard"].as_bool(), Some(true));
    assert_eq!(summary["ols_coef"].as_array().map(|a| a.len()), Some(4));

    let params: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(format!("{}.parameters.json", sim))?)?;
    assert_eq!(params["seed"].as_u64(), Some(7));
    Ok(())
}

#[test]
fn fit_rejects_mismatched_files() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let x_file = dir.path().join("x.tsv").to_string_lossy().to_string();
    let y_file = dir.path().join("y.tsv").to_string_lossy().to_string();

    DMatrix::<f64>::from_element(5, 2, 1.0).to_tsv(&x_file)?;
    DVector::<f64>::zeros(4).to_tsv(&y_file)?;

    let status = Command::new(env!("CARGO_BIN_EXE_lupin"))
        .args(["fit", "-x", &x_file, "-y", &y_file, "-o", &x_file])
        .status()?;
    assert!(!status.success());
    Ok(())
}
