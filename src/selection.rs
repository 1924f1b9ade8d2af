/*============================================================
  Synavera Project: Syn-Seek
  Module: synseek::selection
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Translate an operator selection line (numbers and `a-b`
    ranges) into zero-based indices into the search listing.

  Security / Safety Notes:
    Pure parsing; no I/O. Aborts are returned as typed values
    and only the binary entry point decides to exit.

  Dependencies:
    thiserror for the abort taxonomy.

  Operational Scope:
    Invoked once per search session after the listing and
    banner have been shown.

  Revision History:
    2025-11-12 COD  Authored selection parser.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Side-effect-free parsing
    - Offending input named in every abort
============================================================*/

use thiserror::Error;

/// Token that ends the session without installing anything.
pub const QUIT_SENTINEL: &str = "q";

/// Outcomes that stop a selection from being installed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// Operator asked to quit; not a failure.
    #[error("selection cancelled")]
    Quit,
    #[error("`{token}` is not a package number")]
    InvalidToken { token: String },
    #[error("`{token}` is not a valid range (expected e.g. 2-5)")]
    InvalidRange { token: String },
    #[error("`{token}` is out of bounds, numbering starts at 1")]
    ZeroIndex { token: String },
    #[error("package number {number} is out of bounds, only {available} listed")]
    OutOfRange { number: usize, available: usize },
}

/// Parse one selection line into zero-based indices, in token order.
///
/// Tokens are separated by single spaces; empty tokens are skipped. A token
/// containing `-` is an inclusive range split on the first dash. Results are
/// neither sorted nor deduplicated, and `b-a` with `b > a` contributes
/// nothing. Every produced index must address one of the `available`
/// entries; bounds are checked before a range is expanded.
pub fn parse_selection(line: &str, available: usize) -> Result<Vec<usize>, SelectionError> {
    let mut indices = Vec::new();

    for token in line.split(' ').filter(|token| !token.is_empty()) {
        if let Some((start, end)) = token.split_once('-') {
            let (start, end) = match (parse_number(start), parse_number(end)) {
                (Some(start), Some(end)) => (start, end),
                _ => {
                    return Err(SelectionError::InvalidRange {
                        token: token.to_string(),
                    })
                }
            };
            if start == 0 || end == 0 {
                return Err(SelectionError::ZeroIndex {
                    token: token.to_string(),
                });
            }
            if start <= end {
                check_bounds(end, available)?;
                indices.extend(start - 1..end);
            }
        } else if let Some(number) = parse_number(token) {
            if number == 0 {
                return Err(SelectionError::ZeroIndex {
                    token: token.to_string(),
                });
            }
            check_bounds(number, available)?;
            indices.push(number - 1);
        } else if token == QUIT_SENTINEL {
            return Err(SelectionError::Quit);
        } else {
            return Err(SelectionError::InvalidToken {
                token: token.to_string(),
            });
        }
    }

    Ok(indices)
}

fn check_bounds(number: usize, available: usize) -> Result<(), SelectionError> {
    if number > available {
        return Err(SelectionError::OutOfRange { number, available });
    }
    Ok(())
}

// Digits only: `str::parse` would also accept a leading `+`.
fn parse_number(raw: &str) -> Option<usize> {
    if raw.is_empty() || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
