use phf::{Map, Set, phf_map, phf_set};

pub const BACKBONE_NITROGEN: &str = "N";
pub const BACKBONE_CARBON: &str = "C";

/// Maximum number of residue codes carried by one SEQRES record.
pub const SEQRES_RESIDUES_PER_LINE: usize = 13;

static ONE_TO_THREE_LETTER: Map<char, &'static str> = phf_map! {
    'A' => "ALA", 'G' => "GLY", 'I' => "ILE", 'L' => "LEU", 'P' => "PRO",
    'V' => "VAL", 'F' => "PHE", 'W' => "TRP", 'Y' => "TYR", 'D' => "ASP",
    'E' => "GLU", 'R' => "ARG", 'H' => "HIS", 'K' => "LYS", 'S' => "SER",
    'T' => "THR", 'C' => "CYS", 'M' => "MET", 'N' => "ASN", 'Q' => "GLN",
};

static STANDARD_RESIDUES: Set<&'static str> = phf_set! {
    "ALA", "GLY", "ILE", "LEU", "PRO", "VAL", "PHE", "TRP", "TYR", "ASP",
    "GLU", "ARG", "HIS", "LYS", "SER", "THR", "CYS", "MET", "ASN", "GLN",
};

/// Looks up the three-letter code of a standard residue. Returns `None` for anything
/// outside the 20 standard one-letter codes; lowercase letters are not accepted.
pub fn three_letter_code(one_letter: char) -> Option<&'static str> {
    ONE_TO_THREE_LETTER.get(&one_letter).copied()
}

pub fn is_standard_residue(code: &str) -> bool {
    STANDARD_RESIDUES.contains(code.trim())
}
