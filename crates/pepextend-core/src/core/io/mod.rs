//! Provides input/output functionality for structure files.
//!
//! This module reads fixed-column structure files into line-preserving documents,
//! renders new ATOM, SEQRES and TER records with exact column layout, and exposes a
//! trait-based interface for reading and writing documents from paths or streams.

pub mod pdb;
pub mod traits;
