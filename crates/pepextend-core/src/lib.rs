//! # pepextend Core Library
//!
//! A library for growing protein chains one residue at a time: it places an idealized
//! residue template onto the terminal backbone of an existing chain and rewrites the
//! structure file to include it.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Atom`, `ResidueCode`), vector and
//!   spherical-coordinate geometry, residue templates and fixed-column record I/O.
//!
//! - **[`engine`]: The Logic Core.** The placement engine that rotates and translates a
//!   template onto the chain end, together with its configuration and error types.
//!
//! - **[`workflows`]: The Public API.** Complete procedures on a structure document, such
//!   as appending a residue, built from the `engine` and `core` layers.

pub mod core;
pub mod engine;
pub mod workflows;
