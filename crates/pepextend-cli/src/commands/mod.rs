pub mod extend;
pub mod templates;

use crate::error::{CliError, Result};
use pepextend::core::templates::library::TemplateLibrary;
use pepextend::engine::error::EngineError;
use std::path::Path;
use tracing::info;

/// Loads the template library named on the command line or in the config file,
/// falling back to the built-in templates.
pub fn load_template_library(path: Option<&Path>) -> Result<TemplateLibrary> {
    let library = match path {
        None => {
            info!("Using built-in residue templates.");
            TemplateLibrary::builtin()
        }
        Some(dir) if dir.is_dir() => {
            info!("Loading residue templates from directory {:?}", dir);
            TemplateLibrary::load_directory(dir)
        }
        Some(file) => {
            info!("Loading residue templates from file {:?}", file);
            TemplateLibrary::load(file)
        }
    }
    .map_err(EngineError::from)?;

    if library.is_empty() {
        return Err(CliError::Config(format!(
            "No residue templates found in {:?}",
            path.unwrap_or(Path::new("<builtin>"))
        )));
    }
    Ok(library)
}
