//! Stateless helpers shared by the rest of the crate: 3D vector and spherical-coordinate
//! math, and the static residue/atom naming tables.

pub mod geometry;
pub mod identifiers;
