use crate::core::io::traits::StructureFile;
use crate::core::models::atom::Atom;
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Width every generated record is padded to.
pub const RECORD_WIDTH: usize = 80;

const OCCUPANCY: f64 = 1.0;
const TEMPERATURE_FACTOR: f64 = 0.0;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed {record} record on line {line}: {kind}")]
    MalformedRecord {
        line: usize,
        record: &'static str,
        kind: PdbParseErrorKind,
    },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: &'static str, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: &'static str, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: &'static str },
    #[error("Line is too short ({found} chars, need at least {expected})")]
    LineTooShort { expected: usize, found: usize },
    #[error("Record type in columns {columns} is not '{expected}'")]
    UnexpectedRecordType {
        columns: &'static str,
        expected: &'static str,
    },
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end.min(line.len())).unwrap_or("").trim()
}

fn parse_int<T: std::str::FromStr>(
    line: &str,
    start: usize,
    end: usize,
    columns: &'static str,
) -> Result<T, PdbParseErrorKind> {
    let value = slice_and_trim(line, start, end);
    if value.is_empty() {
        return Err(PdbParseErrorKind::MissingRequiredField { columns });
    }
    value.parse().map_err(|_| PdbParseErrorKind::InvalidInt {
        columns,
        value: value.to_string(),
    })
}

fn parse_float(
    line: &str,
    start: usize,
    end: usize,
    columns: &'static str,
) -> Result<f64, PdbParseErrorKind> {
    let value = slice_and_trim(line, start, end);
    value
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
        .ok_or_else(|| PdbParseErrorKind::InvalidFloat {
            columns,
            value: value.to_string(),
        })
}

fn parse_chain_id(line: &str, column: usize) -> char {
    line.get(column..column + 1)
        .and_then(|s| s.chars().next())
        .unwrap_or(' ')
}

fn pad_record(content: String) -> String {
    format!("{:<width$}", content, width = RECORD_WIDTH)
}

/// A parsed ATOM record.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    pub serial: usize,
    pub name: String,
    pub residue_name: String,
    pub chain_id: char,
    pub residue_index: isize,
    pub position: Point3<f64>,
    pub symbol: String,
}

impl AtomRecord {
    /// Minimum line length covering the Z coordinate field.
    const MIN_LENGTH: usize = 54;

    pub fn parse(line: &str) -> Result<Self, PdbParseErrorKind> {
        if !line.starts_with("ATOM") {
            return Err(PdbParseErrorKind::UnexpectedRecordType {
                columns: "1-4",
                expected: "ATOM",
            });
        }
        if line.len() < Self::MIN_LENGTH {
            return Err(PdbParseErrorKind::LineTooShort {
                expected: Self::MIN_LENGTH,
                found: line.len(),
            });
        }

        let name = slice_and_trim(line, 12, 16);
        if name.is_empty() {
            return Err(PdbParseErrorKind::MissingRequiredField { columns: "13-16" });
        }

        Ok(Self {
            serial: parse_int(line, 6, 11, "7-11")?,
            name: name.to_string(),
            residue_name: slice_and_trim(line, 17, 20).to_string(),
            chain_id: parse_chain_id(line, 21),
            residue_index: parse_int(line, 22, 26, "23-26")?,
            position: Point3::new(
                parse_float(line, 30, 38, "31-38")?,
                parse_float(line, 38, 46, "39-46")?,
                parse_float(line, 46, 54, "47-54")?,
            ),
            symbol: slice_and_trim(line, 76, 78).to_string(),
        })
    }

    pub fn from_atom(atom: &Atom, serial: usize, chain_id: char) -> Self {
        Self {
            serial,
            name: atom.name.clone(),
            residue_name: atom.residue_name.clone(),
            chain_id,
            residue_index: atom.residue_index,
            position: atom.position,
            symbol: atom.symbol.clone(),
        }
    }

    /// Renders the record as an 80-column ATOM line.
    pub fn to_line(&self) -> String {
        format!(
            "ATOM  {:>5} {:>4} {:<3} {}{:>4}    {:8.3}{:8.3}{:8.3}{:6.2}{:6.2}          {:>2}  ",
            self.serial,
            self.name,
            self.residue_name,
            self.chain_id,
            self.residue_index,
            self.position.x,
            self.position.y,
            self.position.z,
            OCCUPANCY,
            TEMPERATURE_FACTOR,
            self.symbol,
        )
    }
}

/// A parsed SEQRES record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeqresRecord {
    pub line_index: usize,
    pub chain_id: char,
    pub residue_count: usize,
    pub residues: Vec<String>,
}

impl SeqresRecord {
    const MIN_LENGTH: usize = 17;

    pub fn parse(line: &str) -> Result<Self, PdbParseErrorKind> {
        if !line.starts_with("SEQRES") {
            return Err(PdbParseErrorKind::UnexpectedRecordType {
                columns: "1-6",
                expected: "SEQRES",
            });
        }
        if line.len() < Self::MIN_LENGTH {
            return Err(PdbParseErrorKind::LineTooShort {
                expected: Self::MIN_LENGTH,
                found: line.len(),
            });
        }

        Ok(Self {
            line_index: parse_int(line, 7, 10, "8-10")?,
            chain_id: parse_chain_id(line, 11),
            residue_count: parse_int(line, 13, 17, "14-17")?,
            residues: line
                .get(19..)
                .unwrap_or("")
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        })
    }

    /// Renders the record as an 80-column SEQRES line.
    pub fn to_line(&self) -> String {
        pad_record(format!(
            "SEQRES {:>3} {} {:>4}  {}",
            self.line_index,
            self.chain_id,
            self.residue_count,
            self.residues.join(" ")
        ))
    }
}

/// Renders the chain terminator that closes an extended chain.
pub fn format_terminal_line() -> String {
    pad_record("TER".to_string())
}

/// Stamps consecutive serial numbers onto `atoms`, starting at `first_serial`, and
/// returns the ATOM records to write for them.
pub fn atom_records(atoms: &mut [Atom], chain_id: char, first_serial: usize) -> Vec<AtomRecord> {
    atoms
        .iter_mut()
        .zip(first_serial..)
        .map(|(atom, serial)| {
            atom.serial = Some(serial);
            AtomRecord::from_atom(atom, serial, chain_id)
        })
        .collect()
}

/// The classification of one line of a structure file.
#[derive(Debug, Clone, PartialEq)]
pub enum PdbRecord {
    Atom(AtomRecord),
    Seqres(SeqresRecord),
    Terminal,
    Other,
}

/// One line of a structure file: the text to write back and what it was parsed as.
#[derive(Debug, Clone, PartialEq)]
pub struct PdbLine {
    pub raw: String,
    pub record: PdbRecord,
}

impl PdbLine {
    /// Classifies a raw input line. ATOM and SEQRES lines must parse.
    pub fn parse(raw: String) -> Result<Self, (&'static str, PdbParseErrorKind)> {
        let record = if raw.starts_with("ATOM") {
            PdbRecord::Atom(AtomRecord::parse(&raw).map_err(|kind| ("ATOM", kind))?)
        } else if raw.starts_with("SEQRES") {
            PdbRecord::Seqres(SeqresRecord::parse(&raw).map_err(|kind| ("SEQRES", kind))?)
        } else if raw.starts_with("TER") {
            PdbRecord::Terminal
        } else {
            PdbRecord::Other
        };
        Ok(Self { raw, record })
    }

    pub fn terminal() -> Self {
        Self {
            raw: format_terminal_line(),
            record: PdbRecord::Terminal,
        }
    }
}

impl From<AtomRecord> for PdbLine {
    fn from(record: AtomRecord) -> Self {
        Self {
            raw: record.to_line(),
            record: PdbRecord::Atom(record),
        }
    }
}

impl From<SeqresRecord> for PdbLine {
    fn from(record: SeqresRecord) -> Self {
        Self {
            raw: record.to_line(),
            record: PdbRecord::Seqres(record),
        }
    }
}

/// An in-memory structure file, kept line by line in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdbDocument {
    pub lines: Vec<PdbLine>,
}

impl PdbDocument {
    pub fn atoms(&self) -> impl Iterator<Item = &AtomRecord> {
        self.lines.iter().filter_map(|line| match &line.record {
            PdbRecord::Atom(atom) => Some(atom),
            _ => None,
        })
    }

    pub fn seqres(&self) -> impl Iterator<Item = &SeqresRecord> {
        self.lines.iter().filter_map(|line| match &line.record {
            PdbRecord::Seqres(seqres) => Some(seqres),
            _ => None,
        })
    }
}

pub struct PdbFile;

impl StructureFile for PdbFile {
    type Document = PdbDocument;
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Document, Self::Error> {
        let mut document = PdbDocument::default();
        for (line_num, line_res) in reader.lines().enumerate() {
            let line = PdbLine::parse(line_res?).map_err(|(record, kind)| {
                PdbError::MalformedRecord {
                    line: line_num + 1,
                    record,
                    kind,
                }
            })?;
            document.lines.push(line);
        }
        Ok(document)
    }

    fn write_to(document: &Self::Document, writer: &mut impl Write) -> Result<(), Self::Error> {
        for line in &document.lines {
            writeln!(writer, "{}", line.raw)?;
        }
        Ok(())
    }
}
