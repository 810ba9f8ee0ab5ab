use crate::core::io::pdb::{AtomRecord, PdbParseErrorKind};
use crate::core::models::atom::Atom;
use nalgebra::Point3;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use thiserror::Error;

const BUILTIN_TEMPLATES: &str = include_str!("../../../data/templates.toml");
const BUILTIN_ORIGIN: &str = "<builtin templates>";

/// File extensions recognized by [`TemplateLibrary::load_directory`].
const TEMPLATE_FILE_EXTENSIONS: [&str; 2] = ["txt", "pdb"];

/// Widths of the atom name (columns 13-16) and element (columns 77-78) fields.
const MAX_ATOM_NAME_LEN: usize = 4;
const MAX_SYMBOL_LEN: usize = 2;

/// One atom of a residue template: element, in-residue name and idealized position.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateAtom {
    pub name: String,
    pub symbol: String,
    pub position: [f64; 3],
}

/// Type alias for the raw template data loaded from TOML files, keyed by residue code.
type RawTemplateFile = HashMap<String, Vec<TemplateAtom>>;

/// Read-only lookup of residue geometry templates by three-letter code.
///
/// The placement workflow only depends on this trait, so tests and callers can supply
/// synthetic templates without touching the built-in library.
pub trait TemplateSource {
    fn lookup(&self, residue_code: &str) -> Option<&[TemplateAtom]>;
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Malformed ATOM record in template '{path}' on line {line}: {kind}")]
    MalformedRecord {
        path: String,
        line: usize,
        kind: PdbParseErrorKind,
    },
    #[error("Template for residue '{residue}' defines atom '{atom_name}' more than once")]
    DuplicateAtomName { residue: String, atom_name: String },
    #[error("Template for residue '{residue}' has invalid atom '{atom_name}': {reason}")]
    InvalidAtomField {
        residue: String,
        atom_name: String,
        reason: &'static str,
    },
    #[error("Residue '{residue}' is defined by more than one file in '{path}'")]
    DuplicateTemplate { residue: String, path: String },
    #[error("No geometry template found for residue '{0}'")]
    NotFound(String),
}

/// An immutable collection of residue templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateLibrary {
    templates: HashMap<String, Vec<TemplateAtom>>,
}

impl TemplateLibrary {
    /// Returns the idealized templates of the 20 standard residues shipped with the crate.
    pub fn builtin() -> Result<Self, TemplateError> {
        Self::from_toml_str(BUILTIN_TEMPLATES, BUILTIN_ORIGIN)
    }

    /// Loads templates from a TOML file of `[[CODE]]` tables.
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let content = std::fs::read_to_string(path).map_err(|e| TemplateError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content, &path.to_string_lossy())
    }

    /// Loads one template per file from a directory of ATOM-record files named after
    /// their residue code (e.g. `ALA.txt`, `GLY.pdb`). Other files are ignored.
    ///
    /// Two files for the same code (`GLY.txt` and `gly.pdb`) are rejected with
    /// [`TemplateError::DuplicateTemplate`].
    pub fn load_directory(dir: &Path) -> Result<Self, TemplateError> {
        let io_error = |path: &Path, source| TemplateError::Io {
            path: path.to_string_lossy().to_string(),
            source,
        };

        let mut library = Self::default();
        for entry in std::fs::read_dir(dir).map_err(|e| io_error(dir, e))? {
            let path = entry.map_err(|e| io_error(dir, e))?.path();
            let is_template = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| TEMPLATE_FILE_EXTENSIONS.contains(&ext));
            let Some(code) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if !is_template || !path.is_file() {
                continue;
            }

            let content = std::fs::read_to_string(&path).map_err(|e| io_error(&path, e))?;
            let atoms = parse_record_template(&content, &path)?;
            if library.lookup(&code.trim().to_ascii_uppercase()).is_some() {
                return Err(TemplateError::DuplicateTemplate {
                    residue: code.to_ascii_uppercase(),
                    path: dir.to_string_lossy().to_string(),
                });
            }
            library.insert(code, atoms)?;
        }
        Ok(library)
    }

    fn from_toml_str(content: &str, origin: &str) -> Result<Self, TemplateError> {
        let raw: RawTemplateFile = toml::from_str(content).map_err(|e| TemplateError::Toml {
            path: origin.to_string(),
            source: e,
        })?;
        let mut library = Self::default();
        for (code, atoms) in raw {
            library.insert(&code, atoms)?;
        }
        Ok(library)
    }

    /// Adds or replaces the template for `residue_code` (stored upper-cased).
    ///
    /// # Errors
    ///
    /// - [`TemplateError::InvalidAtomField`] if an atom name is empty or wider than four
    ///   characters, a symbol is wider than two, or a coordinate is not finite.
    /// - [`TemplateError::DuplicateAtomName`] if two atoms share a name.
    pub fn insert(
        &mut self,
        residue_code: &str,
        atoms: Vec<TemplateAtom>,
    ) -> Result<(), TemplateError> {
        let code = residue_code.trim().to_ascii_uppercase();
        let mut seen = HashSet::new();
        for atom in &atoms {
            if let Some(reason) = invalid_field(atom) {
                return Err(TemplateError::InvalidAtomField {
                    residue: code,
                    atom_name: atom.name.clone(),
                    reason,
                });
            }
            if !seen.insert(atom.name.as_str()) {
                return Err(TemplateError::DuplicateAtomName {
                    residue: code,
                    atom_name: atom.name.clone(),
                });
            }
        }
        self.templates.insert(code, atoms);
        Ok(())
    }

    /// Residue codes with their template sizes, sorted by code.
    pub fn summary(&self) -> BTreeMap<&str, usize> {
        self.templates
            .iter()
            .map(|(code, atoms)| (code.as_str(), atoms.len()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateSource for TemplateLibrary {
    fn lookup(&self, residue_code: &str) -> Option<&[TemplateAtom]> {
        self.templates.get(residue_code).map(Vec::as_slice)
    }
}

fn invalid_field(atom: &TemplateAtom) -> Option<&'static str> {
    if atom.name.trim().is_empty() {
        Some("atom name is empty")
    } else if atom.name.chars().count() > MAX_ATOM_NAME_LEN {
        Some("atom name is wider than 4 columns")
    } else if atom.symbol.chars().count() > MAX_SYMBOL_LEN {
        Some("element symbol is wider than 2 columns")
    } else if !atom.position.iter().all(|c| c.is_finite()) {
        Some("coordinates must be finite")
    } else {
        None
    }
}

fn parse_record_template(content: &str, path: &Path) -> Result<Vec<TemplateAtom>, TemplateError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| line.starts_with("ATOM"))
        .map(|(line_num, line)| {
            let record = AtomRecord::parse(line).map_err(|kind| TemplateError::MalformedRecord {
                path: path.to_string_lossy().to_string(),
                line: line_num + 1,
                kind,
            })?;
            Ok(TemplateAtom {
                name: record.name,
                symbol: record.symbol,
                position: [record.position.x, record.position.y, record.position.z],
            })
        })
        .collect()
}

/// Builds a fresh, independently owned atom list for one residue.
///
/// Every atom is a copy of the template entry, stamped with `residue_code` and
/// `residue_index`.
///
/// # Errors
///
/// Returns [`TemplateError::NotFound`] if `source` has no template for `residue_code`.
pub fn load_residue_template<S: TemplateSource + ?Sized>(
    source: &S,
    residue_code: &str,
    residue_index: isize,
) -> Result<Vec<Atom>, TemplateError> {
    let template = source
        .lookup(residue_code)
        .ok_or_else(|| TemplateError::NotFound(residue_code.to_string()))?;

    Ok(template
        .iter()
        .map(|entry| {
            let mut atom = Atom::new(&entry.symbol, &entry.name, Point3::from(entry.position));
            atom.assign_residue(residue_code, residue_index);
            atom
        })
        .collect())
}
