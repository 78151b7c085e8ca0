use std::io::{BufRead, Write};
use std::num::IntErrorKind;

use anyhow::Result;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RatingInputError {
    #[error("Please enter an integer between 1 and 5")]
    NotANumber,
    #[error("Only numbers from 1 to 5 are accepted")]
    OutOfRange,
}

pub fn parse_rating(input: &str) -> Result<u8, RatingInputError> {
    // An integer too wide for i64 is still an integer, just not a rating.
    let n: i64 = input.trim().parse().map_err(|e: std::num::ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => RatingInputError::OutOfRange,
        _ => RatingInputError::NotANumber,
    })?;
    match n {
        1..=5 => Ok(n as u8),
        _ => Err(RatingInputError::OutOfRange),
    }
}

/// Ask for a rating on `out`, read one line from `input` and validate it.
///
/// The outer error is I/O; the inner one is a bad answer, which the caller
/// reports and exits on.
pub fn prompt_rating(
    mut input: impl BufRead,
    mut out: impl Write,
) -> Result<Result<u8, RatingInputError>> {
    write!(out, "Enter the rating you like (1..5): ")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let rating = parse_rating(&line);
    if let Ok(n) = rating {
        writeln!(out, "You chose: {}", n)?;
    }
    Ok(rating)
}
