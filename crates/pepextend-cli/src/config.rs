use crate::cli::ExtendArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use pepextend::core::models::residue::ResidueCode;
use pepextend::engine::config as core_config;
use pepextend::engine::error::EngineError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialPlacementConfig {
    method: Option<String>,
    #[serde(rename = "chain-id")]
    chain_id: Option<char>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialTemplatesConfig {
    path: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialExtendConfig {
    placement: Option<PartialPlacementConfig>,
    templates: Option<PartialTemplatesConfig>,
}

/// Everything the `extend` command needs after merging file, flags and `--set` values.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtendSettings {
    pub extend: core_config::ExtendConfig,
    /// Template file or directory; `None` selects the built-in library.
    pub templates: Option<PathBuf>,
}

impl PartialExtendConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Layers the command line over the file values: explicit flags win over the file,
    /// and `--set` values win over both.
    pub fn merge_with_cli(mut self, args: &ExtendArgs) -> Result<ExtendSettings> {
        if let Some(method) = args.method {
            self.placement_mut().method = Some(method.to_string());
        }
        if let Some(chain_id) = args.chain {
            self.placement_mut().chain_id = Some(chain_id);
        }
        if let Some(path) = &args.templates {
            self.templates.get_or_insert_with(Default::default).path = Some(path.clone());
        }
        self.apply_set_values(&args.set_values)?;

        let residue: ResidueCode = args.residue.parse().map_err(EngineError::from)?;
        let placement = self.placement.unwrap_or_default();

        let mut builder = core_config::ExtendConfigBuilder::new().residue(residue);
        if let Some(method) = placement.method {
            let method = parser::parse_placement_method(&method)
                .map_err(|e| CliError::Config(e.to_string()))?;
            builder = builder.method(method);
        }
        if let Some(chain_id) = placement.chain_id {
            builder = builder.chain_id(chain_id);
        }

        Ok(ExtendSettings {
            extend: builder.build().map_err(EngineError::from)?,
            templates: self.templates.and_then(|t| t.path),
        })
    }

    fn placement_mut(&mut self) -> &mut PartialPlacementConfig {
        self.placement.get_or_insert_with(Default::default)
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value_str) = parser::parse_key_value(kv_pair)
                .map_err(|e| CliError::Config(e.to_string()))?;

            match key {
                "placement.method" => {
                    self.placement_mut().method = Some(value_str.to_string());
                }
                "placement.chain-id" => {
                    self.placement_mut().chain_id = Some(
                        parser::parse_chain_id(value_str)
                            .map_err(|e| CliError::Config(e.to_string()))?,
                    );
                }
                "templates.path" => {
                    self.templates.get_or_insert_with(Default::default).path =
                        Some(PathBuf::from(value_str));
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}
