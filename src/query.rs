//! Query-string parsing for `/api/add`
//!
//! Only the `a` and `b` keys are recognised. Tokens are split the same way the
//! service always has: on `&`, then on `=` with trailing empty pieces dropped,
//! keeping tokens that yield exactly a key and a value.

use crate::arithmetic::is_blank;
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Missing parameters. Use: /api/add?a=5&b=3")]
    Missing,

    #[error("Invalid number format")]
    InvalidNumber(#[source] ParseIntError),
}

/// Operands extracted from the query; absent keys default to 0
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AddOperands {
    pub a: i32,
    pub b: i32,
}

/// Parse `a` and `b` out of a raw query string
///
/// Unknown keys are ignored and later duplicates win.
pub fn parse_add_query(raw: Option<&str>) -> Result<AddOperands, QueryError> {
    let query = match raw {
        Some(q) if !is_blank(Some(q)) => q,
        _ => return Err(QueryError::Missing),
    };

    let mut operands = AddOperands::default();
    for token in query.split('&') {
        let Some((key, value)) = split_pair(token) else {
            continue;
        };
        match key {
            "a" => operands.a = value.parse().map_err(QueryError::InvalidNumber)?,
            "b" => operands.b = value.parse().map_err(QueryError::InvalidNumber)?,
            _ => {}
        }
    }
    Ok(operands)
}

/// Split `key=value`, ignoring trailing empty pieces (`a=5=` is `a`, `5`)
fn split_pair(token: &str) -> Option<(&str, &str)> {
    let mut pieces: Vec<&str> = token.split('=').collect();
    while pieces.last().is_some_and(|p| p.is_empty()) {
        pieces.pop();
    }
    match pieces.as_slice() {
        [key, value] => Some((*key, *value)),
        _ => None,
    }
}
