//! # Core Models Module
//!
//! Data structures for the residues being appended to a chain.
//!
//! - [`atom`] - A single atom with its element, in-residue name, owning residue and position
//! - [`residue`] - Validated residue codes used to select a geometry template
//!
//! ```ignore
//! use pepextend::core::models::{atom::Atom, residue::ResidueCode};
//!
//! let code: ResidueCode = "A".parse()?;
//! let mut atom = Atom::new("C", "CA", Point3::new(1.46, 0.0, 0.0));
//! atom.assign_residue(code.as_str(), 42);
//! ```

pub mod atom;
pub mod residue;
