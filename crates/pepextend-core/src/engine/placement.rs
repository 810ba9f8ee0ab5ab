use super::config::PlacementMethod;
use crate::core::models::atom::Atom;
use crate::core::utils::geometry::{
    add, normalize, rotation_to_align, scale, subtract, to_cartesian, to_spherical,
};
use crate::core::utils::identifiers::{BACKBONE_CARBON, BACKBONE_NITROGEN};
use nalgebra::{Point3, Vector3};
use std::fmt;
use thiserror::Error;
use tracing::trace;

/// Idealized length of the peptide C-N bond, in Angstroms.
pub const PEPTIDE_BOND_LENGTH: f64 = 1.32;

/// Which backbone a placement input came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackboneSource {
    Template,
    ChainTail,
}

impl fmt::Display for BackboneSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template => f.write_str("residue template"),
            Self::ChainTail => f.write_str("chain tail"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlacementError {
    #[error("Backbone atom '{atom_name}' not found in the {location}")]
    MissingBackboneAtom {
        atom_name: &'static str,
        location: BackboneSource,
    },

    #[error("Backbone N and C of the {location} do not define a bond direction")]
    DegenerateGeometry { location: BackboneSource },
}

/// Re-anchors a residue template onto the end of a chain using additive spherical angles.
///
/// See [`place_residue_with`].
#[inline]
pub fn place_residue(
    atoms: &mut [Atom],
    last_nitrogen: &Point3<f64>,
    last_carbon: &Point3<f64>,
) -> Result<(), PlacementError> {
    place_residue_with(atoms, last_nitrogen, last_carbon, PlacementMethod::AdditiveAngles)
}

/// Moves every atom of `atoms` so that the template's own N→C bond points along the
/// chain's terminal N→C direction and its N sits [`PEPTIDE_BOND_LENGTH`] beyond the
/// chain's last carbon.
///
/// Positions are only written once all inputs have been validated, so an error leaves
/// `atoms` untouched.
///
/// # Errors
///
/// - [`PlacementError::MissingBackboneAtom`] if the template has no atom named `N` or `C`.
/// - [`PlacementError::DegenerateGeometry`] if either N→C vector has zero or non-finite length.
pub fn place_residue_with(
    atoms: &mut [Atom],
    last_nitrogen: &Point3<f64>,
    last_carbon: &Point3<f64>,
    method: PlacementMethod,
) -> Result<(), PlacementError> {
    // --- Phase 1: Bond directions ---
    let target_direction = normalize(&subtract(&last_carbon.coords, &last_nitrogen.coords))
        .map_err(|_| PlacementError::DegenerateGeometry {
            location: BackboneSource::ChainTail,
        })?;

    let template_nitrogen = find_template_atom(atoms, BACKBONE_NITROGEN)?;
    let template_carbon = find_template_atom(atoms, BACKBONE_CARBON)?;
    let template_direction = normalize(&subtract(&template_carbon.coords, &template_nitrogen.coords))
        .map_err(|_| PlacementError::DegenerateGeometry {
            location: BackboneSource::Template,
        })?;

    // --- Phase 2: Anchor ---
    let anchor = add(
        &last_carbon.coords,
        &scale(PEPTIDE_BOND_LENGTH, &target_direction),
    );
    trace!(
        anchor = ?anchor,
        target = ?target_direction,
        template = ?template_direction,
        %method,
        "Computed placement frame"
    );

    // --- Phase 3: Rigid move ---
    match method {
        PlacementMethod::AdditiveAngles => {
            let target = to_spherical(&target_direction);
            let template = to_spherical(&template_direction);
            let d_theta = target.theta - template.theta;
            let d_phi = target.phi - template.phi;

            move_atoms(atoms, &template_nitrogen, &anchor, |offset| {
                let s = to_spherical(offset);
                to_cartesian(s.r, s.theta + d_theta, s.phi + d_phi)
            });
        }
        PlacementMethod::RotationMatrix => {
            let rotation = rotation_to_align(&template_direction, &target_direction);
            move_atoms(atoms, &template_nitrogen, &anchor, |offset| rotation * offset);
        }
    }

    Ok(())
}

fn find_template_atom(
    atoms: &[Atom],
    atom_name: &'static str,
) -> Result<Point3<f64>, PlacementError> {
    atoms
        .iter()
        .find(|atom| atom.name == atom_name)
        .map(|atom| atom.position)
        .ok_or(PlacementError::MissingBackboneAtom {
            atom_name,
            location: BackboneSource::Template,
        })
}

fn move_atoms<F>(atoms: &mut [Atom], origin: &Point3<f64>, anchor: &Vector3<f64>, rotate: F)
where
    F: Fn(&Vector3<f64>) -> Vector3<f64>,
{
    for atom in atoms.iter_mut() {
        let offset = subtract(&atom.position.coords, &origin.coords);
        atom.position = Point3::from(add(&rotate(&offset), anchor));
    }
}
