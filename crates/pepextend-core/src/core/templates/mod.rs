//! # Templates Module
//!
//! Residue geometry templates: idealized coordinates of every heavy atom of a residue,
//! expressed in a local frame where the backbone nitrogen sits at the origin.
//!
//! ## Overview
//!
//! A template is looked up by three-letter code and copied into fresh [`Atom`] values for
//! each placement, so the stored reference geometry is never mutated. Templates come from
//! one of three places:
//!
//! - **Built-in library** - the 20 standard residues, compiled into the crate
//! - **TOML files** - `[[CODE]]` tables with `name`, `symbol` and `position` keys
//! - **Record directories** - one file of ATOM records per residue, named `<CODE>.txt`
//!   or `<CODE>.pdb`
//!
//! ## Usage
//!
//! ```ignore
//! use pepextend::core::templates::library::{TemplateLibrary, load_residue_template};
//!
//! let library = TemplateLibrary::builtin()?;
//! let atoms = load_residue_template(&library, "GLY", 4)?;
//! ```
//!
//! [`Atom`]: crate::core::models::atom::Atom

pub mod library;
