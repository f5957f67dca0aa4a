//! Parsing of numbered selections typed at search and suggestion prompts.

use thiserror::Error;

/// Why a typed selection was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// A token was not a number.
    #[error("'{0}' is not a number. Please enter valid package numbers.")]
    NotANumber(String),
    /// A number was outside `1..=len`.
    #[error("{index} is out of range (1-{len}).")]
    OutOfRange {
        /// The number the operator typed.
        index: usize,
        /// Number of choices that were listed.
        len: usize,
    },
}

/// What: Turn a line like `"1 2 3"` or `"1,2,3"` into zero-based indices.
///
/// Inputs:
/// - `input`: Raw operator input.
/// - `len`: Number of listed choices (numbered from 1).
///
/// Output:
/// - `Ok(indices)` in the typed order with repeats dropped; an empty vector
///   when the input is blank (skip).
///
/// # Errors
/// - `NotANumber` for any non-numeric token.
/// - `OutOfRange` for `0` or numbers above `len`.
///
/// Details:
/// - Commas and whitespace are both separators and may be mixed.
pub fn parse_selection(input: &str, len: usize) -> Result<Vec<usize>, SelectionError> {
    let mut picked = Vec::new();
    for token in input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        let index: usize = token
            .parse()
            .map_err(|_| SelectionError::NotANumber(token.to_string()))?;
        if index == 0 || index > len {
            return Err(SelectionError::OutOfRange { index, len });
        }
        if !picked.contains(&(index - 1)) {
            picked.push(index - 1);
        }
    }
    Ok(picked)
}
