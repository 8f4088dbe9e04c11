use flate2::read::GzDecoder;
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

///
/// Write every line into the output_file
///
/// * `lines` - vector of lines
/// * `output_file` - file name--either gzipped or not
///
pub fn write_lines(lines: &[Box<str>], output_file_path: &str) -> anyhow::Result<()> {
    write_types(lines, output_file_path)
}

///
/// Write each element on its own line
///
/// * `lines` - anything displayable
/// * `output_file` - file name--either gzipped or not
///
pub fn write_types<T>(lines: &[T], output_file_path: &str) -> anyhow::Result<()>
where
    T: std::fmt::Display,
{
    let mut buf = open_buf_writer(output_file_path)?;
    for line in lines {
        if let Err(e) = writeln!(buf, "{}", line) {
            if e.kind() == std::io::ErrorKind::BrokenPipe {
                return Ok(());
            } else {
                return Err(anyhow::anyhow!("unexpected error: {}", e));
            }
        }
    }
    buf.flush()?;
    Ok(())
}

pub struct ReadLinesOut<T: Send> {
    pub lines: Vec<Vec<T>>,
    pub header: Vec<Box<str>>,
}

fn is_data_line(line: &str) -> bool {
    !(line.trim().is_empty() || line.starts_with('#') || line.starts_with('%'))
}

///
/// Read lines and parse each of them into a vector of values.
/// Blank lines and lines starting with `#` or `%` are skipped.
///
/// * `input_file` - file name--either gzipped or not
/// * `delim` - field separator
/// * `hdr_line` - location of a header line (`None` = no header line)
///
pub fn read_lines_of_types<T>(
    input_file: &str,
    delim: &str,
    hdr_line: Option<usize>,
) -> anyhow::Result<ReadLinesOut<T>>
where
    T: Send + std::str::FromStr,
    <T as std::str::FromStr>::Err: std::fmt::Display,
{
    let mut lines_raw: Vec<Box<str>> = vec![];
    for (i, line) in open_buf_reader(input_file)?.lines().enumerate() {
        let line = line.map_err(|e| anyhow::anyhow!("{}: line {}: {}", input_file, i + 1, e))?;
        if is_data_line(&line) {
            lines_raw.push(line.into_boxed_str());
        }
    }

    let mut header = vec![];

    let data_lines = match hdr_line {
        Some(n_skip) => {
            if lines_raw.len() < (n_skip + 1) {
                return Err(anyhow::anyhow!("not enough lines in {}", input_file));
            }
            header.extend(
                lines_raw[n_skip]
                    .split(delim)
                    .map(|x| x.trim().to_owned().into_boxed_str()),
            );
            &lines_raw[(n_skip + 1)..]
        }
        None => &lines_raw[..],
    };

    // parsing in parallel keeps the line order of `collect`
    let lines = data_lines
        .par_iter()
        .enumerate()
        .map(|(i, line)| -> anyhow::Result<Vec<T>> {
            line.split(delim)
                .map(|word| {
                    word.trim().parse::<T>().map_err(|e| {
                        anyhow::anyhow!("{}: line {}: `{}`: {}", input_file, i + 1, word, e)
                    })
                })
                .collect()
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(ReadLinesOut { lines, header })
}

///
/// Open a file for reading, and return a buffered reader
/// * `input_file` - file name--either gzipped or not
pub fn open_buf_reader(input_file: &str) -> anyhow::Result<Box<dyn BufRead>> {
    let ext = Path::new(input_file).extension().and_then(|x| x.to_str());
    let file = File::open(input_file)
        .map_err(|e| anyhow::anyhow!("failed to open {}: {}", input_file, e))?;
    match ext {
        Some("gz") => Ok(Box::new(BufReader::new(GzDecoder::new(file)))),
        _ => Ok(Box::new(BufReader::new(file))),
    }
}

///
/// Open a file for writing, and return a buffered writer
/// * `output_file` - file name--either gzipped or not
pub fn open_buf_writer(output_file: &str) -> anyhow::Result<Box<dyn Write>> {
    // we can simply override with stdout
    if output_file.eq_ignore_ascii_case("stdout") {
        return Ok(Box::new(BufWriter::new(std::io::stdout())));
    }

    let ext = Path::new(output_file).extension().and_then(|x| x.to_str());
    match ext {
        Some("gz") => {
            let output_file = File::create(output_file)?;
            let encoder =
                flate2::write::GzEncoder::new(output_file, flate2::Compression::default());
            Ok(Box::new(BufWriter::new(encoder)))
        }
        _ => {
            let output_file = File::create(output_file)?;
            Ok(Box::new(BufWriter::new(output_file)))
        }
    }
}

///
/// Create the parent directory of a file if needed
/// * `file` - file name
///
pub fn mkdir(file: &str) -> anyhow::Result<()> {
    let path = Path::new(file);
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    Ok(())
}
