//! # Workflows Module
//!
//! High-level entry points that tie the `core` and `engine` layers together into complete
//! procedures on a structure document.
//!
//! - **Extend Workflow** ([`extend`]) - Appends one residue to a chain: locates the chain
//!   end, places the residue template, renumbers the new atoms and rewrites the sequence
//!   and terminal records.

pub mod extend;
