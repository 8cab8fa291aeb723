//! Plain-text numeric file helpers shared by the readers and exporters.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::Path;

use crate::error::{Error, Result, Stage};

/// Significant digits of a default-configured C++ output stream.
const GENERAL_PRECISION: i32 = 6;

pub fn open(stage: Stage, path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| Error::io(stage, path, e))
}

pub fn create(stage: Stage, path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| Error::io(stage, path, e))
}

/// Non-blank lines with their 1-based line numbers.
pub fn numbered_lines<R: BufRead>(
    reader: R,
    stage: Stage,
    path: &Path,
) -> impl Iterator<Item = Result<(usize, String)>> {
    reader
        .lines()
        .enumerate()
        .map(move |(i, line)| match line {
            Ok(l) => Ok((i + 1, l)),
            Err(e) => Err(Error::io(stage, path, e)),
        })
        .filter(|r| !matches!(r, Ok((_, l)) if l.trim().is_empty()))
}

pub fn parse_value(stage: Stage, path: &Path, line: usize, token: &str) -> Result<f64> {
    token.parse::<f64>().map_err(|_| Error::Parse {
        stage,
        path: path.to_path_buf(),
        line,
        reason: format!("'{token}' is not a number"),
    })
}

/// Parse every whitespace-separated token of a line.
pub fn parse_row(stage: Stage, path: &Path, line_no: usize, line: &str) -> Result<Vec<f64>> {
    line.split_whitespace()
        .map(|tok| parse_value(stage, path, line_no, tok))
        .collect()
}

/// `%g`-style rendering with 6 significant digits, as `operator<<` prints a double.
pub fn format_general(v: f64) -> String {
    if v.is_nan() {
        return "nan".into();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf".into() } else { "-inf".into() };
    }
    if v == 0.0 {
        return if v.is_sign_negative() { "-0".into() } else { "0".into() };
    }

    // Exponent after rounding to the target precision, e.g. 999999.5 -> 1e+06
    let sci = format!("{:.*e}", (GENERAL_PRECISION - 1) as usize, v);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m.to_string(), e.parse::<i32>().unwrap_or(0)),
        None => (sci.clone(), 0),
    };

    if exp < -4 || exp >= GENERAL_PRECISION {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", strip_zeros(&mantissa), sign, exp.abs())
    } else {
        let decimals = (GENERAL_PRECISION - 1 - exp) as usize;
        strip_zeros(&format!("{v:.decimals$}")).to_string()
    }
}

fn strip_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
