use nalgebra::Point3;

/// Represents one atom of a residue being built or written.
///
/// Atoms are created by the template loader as copies of reference coordinates,
/// stamped with the owning residue's name and index, moved once by the placement
/// engine and numbered only when they are rendered into output records.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The element symbol (e.g., "C", "N", "S").
    pub symbol: String,
    /// The name of the atom within its residue (e.g., "N", "CA", "CB").
    pub name: String,
    /// Three-letter code of the owning residue. Empty until the loader assigns it.
    pub residue_name: String,
    /// 1-based sequence position of the owning residue within its chain.
    pub residue_index: isize,
    /// Global atom serial number, assigned at format time.
    pub serial: Option<usize>,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    /// Creates a new `Atom` that does not yet belong to any residue.
    ///
    /// # Arguments
    ///
    /// * `symbol` - The element symbol.
    /// * `name` - The name of the atom within its residue.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(symbol: &str, name: &str, position: Point3<f64>) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            residue_name: String::new(),
            residue_index: 0,
            serial: None,
            position,
        }
    }

    /// Attaches residue metadata to the atom.
    pub fn assign_residue(&mut self, residue_name: &str, residue_index: isize) {
        self.residue_name = residue_name.to_string();
        self.residue_index = residue_index;
    }
}
