use crate::core::utils::identifiers::three_letter_code;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResidueCodeError {
    #[error("Unrecognized residue code '{0}': expected one of the 20 standard one-letter codes or a three-letter code")]
    Unrecognized(String),
}

/// A validated three-letter residue code, used as the key into a template store.
///
/// One-letter input is mapped through the standard residue table; three-letter input is
/// upper-cased and kept as is, so non-standard residues with a custom template can be
/// requested by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResidueCode(String);

impl ResidueCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ResidueCode {
    type Err = ResidueCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => three_letter_code(letter)
                .map(|code| Self(code.to_string()))
                .ok_or_else(|| ResidueCodeError::Unrecognized(trimmed.to_string())),
            _ if trimmed.len() == 3 && trimmed.chars().all(|c| c.is_ascii_alphanumeric()) => {
                Ok(Self(trimmed.to_ascii_uppercase()))
            }
            _ => Err(ResidueCodeError::Unrecognized(trimmed.to_string())),
        }
    }
}

impl fmt::Display for ResidueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
