use pepextend::engine::config::PlacementMethod;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error(
        "Invalid chain identifier '{0}'. Expected a single letter, digit or blank (e.g., 'A' or ' ')."
    )]
    InvalidChainId(String),

    #[error(
        "Invalid placement method '{0}'. Expected 'additive-angles' or 'rotation-matrix'."
    )]
    InvalidPlacementMethod(String),

    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidKeyValue(String),
}

/// Parses a chain identifier. A value made only of spaces selects the blank chain.
pub fn parse_chain_id(s: &str) -> Result<char, ParseError> {
    if !s.is_empty() && s.chars().all(|c| c == ' ') {
        return Ok(' ');
    }
    let mut chars = s.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphanumeric() => Ok(c),
        _ => Err(ParseError::InvalidChainId(s.to_string())),
    }
}

pub fn parse_placement_method(s: &str) -> Result<PlacementMethod, ParseError> {
    s.parse()
        .map_err(|_| ParseError::InvalidPlacementMethod(s.to_string()))
}

/// Splits a `KEY=VALUE` override at the first `=`.
pub fn parse_key_value(s: &str) -> Result<(&str, &str), ParseError> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(ParseError::InvalidKeyValue(s.to_string())),
    }
}
