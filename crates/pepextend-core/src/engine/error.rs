use thiserror::Error;

use super::config::ConfigError;
use super::placement::PlacementError;
use crate::core::io::pdb::PdbError;
use crate::core::models::residue::ResidueCodeError;
use crate::core::templates::library::TemplateError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Structure file error: {source}")]
    Pdb {
        #[from]
        source: PdbError,
    },

    #[error("Template error: {source}")]
    Template {
        #[from]
        source: TemplateError,
    },

    #[error("Placement failed: {source}")]
    Placement {
        #[from]
        source: PlacementError,
    },

    #[error(transparent)]
    ResidueCode(#[from] ResidueCodeError),

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Chain '{chain_id}' has no ATOM records")]
    ChainNotFound { chain_id: char },

    #[error("Structure contains no ATOM records to extend")]
    NoAtomRecords,
}
