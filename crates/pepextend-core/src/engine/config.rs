use crate::core::models::residue::ResidueCode;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid chain identifier '{0}': expected a single ASCII letter, digit or blank")]
    InvalidChainId(char),
    #[error("Unknown placement method '{0}': expected 'additive-angles' or 'rotation-matrix'")]
    InvalidPlacementMethod(String),
}

/// How the template is rotated onto the chain's bond direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlacementMethod {
    /// Adds the polar and azimuthal offsets between the two bond directions to every
    /// atom's spherical coordinates.
    #[default]
    AdditiveAngles,
    /// Applies the minimal proper rotation taking the template bond onto the target bond.
    RotationMatrix,
}

impl PlacementMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AdditiveAngles => "additive-angles",
            Self::RotationMatrix => "rotation-matrix",
        }
    }
}

impl FromStr for PlacementMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "additive-angles" | "additive" => Ok(Self::AdditiveAngles),
            "rotation-matrix" | "rotation" => Ok(Self::RotationMatrix),
            _ => Err(ConfigError::InvalidPlacementMethod(s.to_string())),
        }
    }
}

impl fmt::Display for PlacementMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of one extend run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtendConfig {
    pub residue: ResidueCode,
    /// Chain to extend. `None` selects the first chain named in the file.
    pub chain_id: Option<char>,
    pub method: PlacementMethod,
}

#[derive(Default)]
pub struct ExtendConfigBuilder {
    residue: Option<ResidueCode>,
    chain_id: Option<char>,
    method: Option<PlacementMethod>,
}

impl ExtendConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn residue(mut self, residue: ResidueCode) -> Self {
        self.residue = Some(residue);
        self
    }
    pub fn chain_id(mut self, chain_id: char) -> Self {
        self.chain_id = Some(chain_id);
        self
    }
    pub fn method(mut self, method: PlacementMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn build(self) -> Result<ExtendConfig, ConfigError> {
        if let Some(chain_id) = self.chain_id {
            if !(chain_id.is_ascii_alphanumeric() || chain_id == ' ') {
                return Err(ConfigError::InvalidChainId(chain_id));
            }
        }
        Ok(ExtendConfig {
            residue: self
                .residue
                .ok_or(ConfigError::MissingParameter("residue"))?,
            chain_id: self.chain_id,
            method: self.method.unwrap_or_default(),
        })
    }
}
