use crate::core::io::pdb::{PdbDocument, PdbLine, PdbRecord, SeqresRecord, atom_records};
use crate::core::models::atom::Atom;
use crate::core::templates::library::{TemplateSource, load_residue_template};
use crate::core::utils::identifiers::{
    BACKBONE_CARBON, BACKBONE_NITROGEN, SEQRES_RESIDUES_PER_LINE,
};
use crate::engine::config::ExtendConfig;
use crate::engine::error::EngineError;
use crate::engine::placement::{BackboneSource, PlacementError, place_residue_with};
use nalgebra::Point3;
use tracing::{debug, info, instrument, trace};

/// The rewritten document together with what was appended to it.
#[derive(Debug, Clone)]
pub struct ExtendOutcome {
    pub document: PdbDocument,
    pub chain_id: char,
    pub residue_code: String,
    pub residue_index: isize,
    pub placed_atoms: Vec<Atom>,
}

/// The terminal backbone of the chain being extended and where new lines go.
#[derive(Debug, Clone, PartialEq)]
struct ChainTail {
    nitrogen: Point3<f64>,
    carbon: Point3<f64>,
    last_serial: usize,
    last_residue_index: isize,
    last_atom_line: usize,
    terminal_line: Option<usize>,
}

/// Appends one residue to a chain of `document`.
///
/// The input document is not modified; the rewritten copy is returned in the outcome.
/// Any failure aborts the whole rewrite.
#[instrument(skip_all, name = "extend_workflow")]
pub fn run<S: TemplateSource + ?Sized>(
    document: &PdbDocument,
    source: &S,
    config: &ExtendConfig,
) -> Result<ExtendOutcome, EngineError> {
    let residue_code = config.residue.as_str();
    info!(residue = residue_code, method = %config.method, "Starting extend workflow.");

    // === Phase 1: Locate the chain end ===
    let chain_id = select_chain(document, config.chain_id)?;
    let tail = locate_chain_tail(document, chain_id)?;
    debug!(
        chain = %chain_id,
        nitrogen = ?tail.nitrogen,
        carbon = ?tail.carbon,
        last_serial = tail.last_serial,
        "Located chain tail."
    );

    let seqres_count = document
        .seqres()
        .find(|record| record.chain_id == chain_id)
        .map(|record| record.residue_count);
    let residue_index = match seqres_count {
        Some(count) => count as isize + 1,
        None => tail.last_residue_index + 1,
    };

    // === Phase 2: Build and place the residue ===
    let mut atoms = load_residue_template(source, residue_code, residue_index)?;
    debug!(atoms = atoms.len(), residue_index, "Loaded residue template.");
    place_residue_with(&mut atoms, &tail.nitrogen, &tail.carbon, config.method)?;

    let records = atom_records(&mut atoms, chain_id, tail.last_serial + 1);
    for record in &records {
        trace!(serial = record.serial, name = %record.name, position = ?record.position, "Placed atom.");
    }

    // === Phase 3: Rewrite the document ===
    let new_lines: Vec<PdbLine> = records.into_iter().map(PdbLine::from).collect();
    let document = rewrite_document(document, chain_id, residue_code, &tail, new_lines);

    info!(
        chain = %chain_id,
        residue_index,
        atoms = atoms.len(),
        "Extend workflow complete."
    );
    Ok(ExtendOutcome {
        document,
        chain_id,
        residue_code: residue_code.to_string(),
        residue_index,
        placed_atoms: atoms,
    })
}

fn select_chain(document: &PdbDocument, requested: Option<char>) -> Result<char, EngineError> {
    let chain_id = match requested {
        Some(chain_id) => chain_id,
        None => document
            .seqres()
            .map(|record| record.chain_id)
            .next()
            .or_else(|| document.atoms().map(|atom| atom.chain_id).next())
            .ok_or(EngineError::NoAtomRecords)?,
    };

    if document.atoms().any(|atom| atom.chain_id == chain_id) {
        Ok(chain_id)
    } else {
        Err(EngineError::ChainNotFound { chain_id })
    }
}

fn locate_chain_tail(document: &PdbDocument, chain_id: char) -> Result<ChainTail, EngineError> {
    let mut nitrogen = None;
    let mut carbon = None;
    let mut last_atom = None;
    let mut terminal_line = None;

    for (index, line) in document.lines.iter().enumerate() {
        match &line.record {
            PdbRecord::Atom(atom) if atom.chain_id == chain_id => {
                match atom.name.as_str() {
                    BACKBONE_NITROGEN => nitrogen = Some(atom.position),
                    BACKBONE_CARBON => carbon = Some(atom.position),
                    _ => {}
                }
                last_atom = Some((index, atom.serial, atom.residue_index));
            }
            // Another chain starts without a TER closing this one.
            PdbRecord::Atom(_) if last_atom.is_some() => break,
            PdbRecord::Terminal if last_atom.is_some() => {
                terminal_line = Some(index);
                break;
            }
            _ => {}
        }
    }

    let (last_atom_line, last_serial, last_residue_index) =
        last_atom.ok_or(EngineError::ChainNotFound { chain_id })?;
    let missing = |atom_name| PlacementError::MissingBackboneAtom {
        atom_name,
        location: BackboneSource::ChainTail,
    };

    Ok(ChainTail {
        nitrogen: nitrogen.ok_or_else(|| missing(BACKBONE_NITROGEN))?,
        carbon: carbon.ok_or_else(|| missing(BACKBONE_CARBON))?,
        last_serial,
        last_residue_index,
        last_atom_line,
        terminal_line,
    })
}

fn rewrite_document(
    document: &PdbDocument,
    chain_id: char,
    residue_code: &str,
    tail: &ChainTail,
    new_atom_lines: Vec<PdbLine>,
) -> PdbDocument {
    let chain_seqres: Vec<usize> = document
        .lines
        .iter()
        .enumerate()
        .filter(|(_, line)| {
            matches!(&line.record, PdbRecord::Seqres(seqres) if seqres.chain_id == chain_id)
        })
        .map(|(index, _)| index)
        .collect();
    let new_count = document
        .seqres()
        .find(|record| record.chain_id == chain_id)
        .map(|record| record.residue_count + 1);
    let last_seqres = chain_seqres.last().copied();

    let mut lines: Vec<PdbLine> =
        Vec::with_capacity(document.lines.len() + new_atom_lines.len() + 2);
    let mut new_atom_lines = Some(new_atom_lines);

    for (index, line) in document.lines.iter().enumerate() {
        match (&line.record, new_count) {
            (PdbRecord::Seqres(seqres), Some(count)) if chain_seqres.contains(&index) => {
                let mut updated = SeqresRecord {
                    residue_count: count,
                    ..seqres.clone()
                };
                if Some(index) != last_seqres {
                    lines.push(updated.into());
                } else if updated.residues.len() < SEQRES_RESIDUES_PER_LINE {
                    updated.residues.push(residue_code.to_string());
                    lines.push(updated.into());
                } else {
                    let overflow = SeqresRecord {
                        line_index: updated.line_index + 1,
                        chain_id,
                        residue_count: count,
                        residues: vec![residue_code.to_string()],
                    };
                    lines.push(updated.into());
                    lines.push(overflow.into());
                }
            }
            _ if Some(index) == tail.terminal_line => {
                lines.extend(new_atom_lines.take().into_iter().flatten());
                lines.push(PdbLine::terminal());
            }
            _ => {
                lines.push(line.clone());
                if tail.terminal_line.is_none() && index == tail.last_atom_line {
                    lines.extend(new_atom_lines.take().into_iter().flatten());
                    lines.push(PdbLine::terminal());
                }
            }
        }
    }

    PdbDocument { lines }
}
