//! # Core Module
//!
//! This module provides the stateless building blocks of the residue builder: data
//! models, structure file I/O, residue templates and the geometric primitives the
//! placement engine is written in.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms and validated residue codes
//! - **File I/O** ([`io`]) - Fixed-column ATOM, SEQRES and TER records, read and written line by line
//! - **Structural Knowledge** ([`templates`]) - Idealized residue geometry keyed by residue code
//! - **Utilities** ([`utils`]) - Vector algebra, spherical coordinates and residue identifiers
//!
//! Nothing in this module keeps state between calls; every operation is a pure function of
//! its inputs or an explicit file read.

pub mod io;
pub mod models;
pub mod templates;
pub mod utils;
