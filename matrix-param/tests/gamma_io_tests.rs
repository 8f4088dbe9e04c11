use matrix_param::dvector_gamma::GammaVector;
use matrix_param::io::ParamIo;
use matrix_param::traits::{Inference, TwoStatParam};
use matrix_util::traits::IoOps;
use nalgebra::DVector;

#[test]
fn gamma_summaries_to_tsv() -> anyhow::Result<()> {
    let mut param = GammaVector::new(4, 0.5, 0.25);
    param.update_stat(
        &DVector::from_element(4, 0.5),
        &DVector::from_vec(vec![1.0, 2.0, 3.0, 4.0]),
    );
    param.calibrate();

    let dir = tempfile::tempdir()?;
    let header = dir.path().join("alpha");
    let header = header.to_str().unwrap();
    ParamIo::to_tsv(&param, header)?;

    let mean = DVector::<f64>::from_tsv(&format!("{}.mean.tsv", header), None)?;
    assert_eq!(&mean, param.posterior_mean());

    let sd = DVector::<f64>::from_tsv(&format!("{}.sd.tsv", header), None)?;
    assert_eq!(&sd, param.posterior_sd());

    let log_mean = DVector::<f64>::from_tsv(&format!("{}.log_mean.tsv", header), None)?;
    assert_eq!(log_mean.len(), 4);

    Ok(())
}
