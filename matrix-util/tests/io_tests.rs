use matrix_util::common_io::write_lines;
use matrix_util::traits::{IoOps, SampleOps};
use nalgebra::{DMatrix, DVector};

#[test]
fn dmatrix_io_test() -> anyhow::Result<()> {
    let xx = DMatrix::<f64>::rnorm(50, 20, 7);

    let dir = tempfile::tempdir()?;
    let tsv_file = dir.path().join("x.tsv.gz");
    let tsv_file = tsv_file.to_str().unwrap();
    xx.to_tsv(tsv_file)?;

    let yy = DMatrix::<f64>::read_file_delim(tsv_file, "\t", None)?;

    assert_eq!(xx, yy);

    Ok(())
}

#[test]
fn dvector_io_test() -> anyhow::Result<()> {
    let xx = DVector::from_vec(vec![1.5, -2.0, 3.25, 0.0]);

    let dir = tempfile::tempdir()?;
    let file = dir.path().join("y.tsv");
    let file = file.to_str().unwrap();
    xx.to_tsv(file)?;

    let yy = DVector::<f64>::from_tsv(file, None)?;
    assert_eq!(xx, yy);

    Ok(())
}

#[test]
fn header_and_comments_are_skipped() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let file = dir.path().join("with_header.csv");
    let file = file.to_str().unwrap();

    let lines: Vec<Box<str>> = vec![
        "# simulated".into(),
        "x1,x2".into(),
        "1,2".into(),
        "".into(),
        "3,4".into(),
    ];
    write_lines(&lines, file)?;

    let xx = DMatrix::<f64>::read_file_delim(file, ",", Some(0))?;
    assert_eq!(xx, DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]));

    Ok(())
}

#[test]
fn ragged_and_malformed_rows_fail() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;

    let ragged = dir.path().join("ragged.tsv");
    let ragged = ragged.to_str().unwrap();
    write_lines(&[Box::from("1\t2"), Box::from("3")], ragged)?;
    assert!(DMatrix::<f64>::from_tsv(ragged, None).is_err());

    let words = dir.path().join("words.tsv");
    let words = words.to_str().unwrap();
    write_lines(&[Box::from("1\tabc")], words)?;
    assert!(DMatrix::<f64>::from_tsv(words, None).is_err());

    let wide = dir.path().join("wide.tsv");
    let wide = wide.to_str().unwrap();
    write_lines(&[Box::from("1\t2"), Box::from("3\t4")], wide)?;
    assert!(DVector::<f64>::from_tsv(wide, None).is_err());

    Ok(())
}

#[test]
fn undecodable_line_is_an_error() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let file = dir.path().join("corrupt.tsv");

    let mut bytes = b"1\t2\n3\t4\n".to_vec();
    bytes.extend_from_slice(&[0xff, 0xfe]);
    bytes.extend_from_slice(b"\t5\n6\t7\n8\t9\n");
    std::fs::write(&file, bytes)?;

    let res = DMatrix::<f64>::from_tsv(file.to_str().unwrap(), None);
    assert!(res.is_err());

    Ok(())
}
