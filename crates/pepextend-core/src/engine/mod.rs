//! # Engine Module
//!
//! This module implements the residue placement engine: the geometry that re-anchors a
//! residue template onto the terminal backbone of an existing chain.
//!
//! ## Overview
//!
//! Placement takes the template's own N→C bond and the chain's last N→C bond, rotates the
//! template so the two directions coincide and translates it so the new nitrogen sits one
//! peptide bond length beyond the chain's last carbon. Two rotation methods are offered:
//!
//! - **Additive angles** - the polar and azimuthal differences between the two bond
//!   directions are added to every atom's spherical coordinates
//! - **Rotation matrix** - the minimal proper rotation between the two directions is applied
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Extend parameters, placement method selection and the builder
//! - **Placement** ([`placement`]) - The rigid move itself and its failure modes
//! - **Error Handling** ([`error`]) - The aggregate error surfaced by workflows

pub mod config;
pub mod error;
pub mod placement;
