use crate::cli::ExtendArgs;
use crate::commands::load_template_library;
use crate::config::PartialExtendConfig;
use crate::error::{CliError, Result};
use pepextend::{
    core::io::{pdb::PdbFile, traits::StructureFile},
    engine::error::EngineError,
    workflows,
};
use tracing::info;

pub fn run(args: ExtendArgs) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialExtendConfig::from_file(path)?,
        None => PartialExtendConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let settings = partial_config.merge_with_cli(&args)?;

    let library = load_template_library(settings.templates.as_deref())?;

    info!("Loading input structure from {:?}", &args.input);
    let document = PdbFile::read_from_path(&args.input).map_err(EngineError::from)?;

    info!("Invoking the extend workflow...");
    let outcome = workflows::extend::run(&document, &library, &settings.extend)?;

    info!("Writing extended structure to {:?}", &args.output);
    PdbFile::write_to_path(&outcome.document, &args.output).map_err(|e| {
        CliError::FileWriting {
            path: args.output.clone(),
            source: e.into(),
        }
    })?;

    println!(
        "✓ Appended {} ({} atoms) as residue {} of chain {}, written to: {}",
        outcome.residue_code,
        outcome.placed_atoms.len(),
        outcome.residue_index,
        outcome.chain_id,
        args.output.display()
    );
    Ok(())
}
