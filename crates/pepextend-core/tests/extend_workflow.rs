use pepextend::core::io::pdb::{PdbDocument, PdbError, PdbFile, PdbParseErrorKind, RECORD_WIDTH};
use pepextend::core::io::traits::StructureFile;
use pepextend::core::models::residue::{ResidueCode, ResidueCodeError};
use pepextend::core::templates::library::{TemplateAtom, TemplateError, TemplateLibrary};
use pepextend::engine::config::{ExtendConfig, ExtendConfigBuilder, PlacementMethod};
use pepextend::engine::error::EngineError;
use pepextend::engine::placement::{BackboneSource, PEPTIDE_BOND_LENGTH, PlacementError};
use pepextend::workflows::extend::{self, ExtendOutcome};
use std::io::{BufReader, Cursor};

const SINGLE_CHAIN: &str = "\
HEADER    TEST CHAIN
SEQRES   1 A    2  ALA GLY
ATOM      1    N ALA A   1       7.000   0.000   0.000  1.00  0.00           N
ATOM      2   CA ALA A   1       8.460   0.000   0.000  1.00  0.00           C
ATOM      3    C ALA A   1       9.000   1.400   0.000  1.00  0.00           C
ATOM      4    N GLY A   2      10.000   0.000   0.000  1.00  0.00           N
ATOM      5   CA GLY A   2      10.500   1.000   0.000  1.00  0.00           C
ATOM      6    C GLY A   2      11.000   0.000   0.000  1.00  0.00           C
TER       7      GLY A   2
END
";

fn parse(content: &str) -> PdbDocument {
    PdbFile::read_from(&mut BufReader::new(Cursor::new(content))).unwrap()
}

fn render(document: &PdbDocument) -> String {
    let mut buffer = Vec::new();
    PdbFile::write_to(document, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

fn template_atom(name: &str, symbol: &str, position: [f64; 3]) -> TemplateAtom {
    TemplateAtom {
        name: name.to_string(),
        symbol: symbol.to_string(),
        position,
    }
}

/// A template whose N→C bond already points along +X, so placing it onto a chain growing
/// along +X is a pure translation with easily predicted coordinates.
fn axis_aligned_library() -> TemplateLibrary {
    let mut library = TemplateLibrary::default();
    library
        .insert(
            "ALA",
            vec![
                template_atom("N", "N", [0.0, 0.0, 0.0]),
                template_atom("CA", "C", [0.5, 1.0, 0.0]),
                template_atom("C", "C", [2.0, 0.0, 0.0]),
                template_atom("O", "O", [2.5, -1.0, 0.0]),
            ],
        )
        .unwrap();
    library
}

fn config(code: &str) -> ExtendConfig {
    ExtendConfigBuilder::new()
        .residue(code.parse().unwrap())
        .build()
        .unwrap()
}

fn extend_str(content: &str, config: &ExtendConfig) -> Result<ExtendOutcome, EngineError> {
    extend::run(&parse(content), &axis_aligned_library(), config)
}

#[test]
fn appends_residue_after_last_atom_and_replaces_terminal_record() {
    let outcome = extend_str(SINGLE_CHAIN, &config("A")).unwrap();

    let expected = format!(
        "HEADER    TEST CHAIN\n\
         {:<80}\n\
         ATOM      1    N ALA A   1       7.000   0.000   0.000  1.00  0.00           N\n\
         ATOM      2   CA ALA A   1       8.460   0.000   0.000  1.00  0.00           C\n\
         ATOM      3    C ALA A   1       9.000   1.400   0.000  1.00  0.00           C\n\
         ATOM      4    N GLY A   2      10.000   0.000   0.000  1.00  0.00           N\n\
         ATOM      5   CA GLY A   2      10.500   1.000   0.000  1.00  0.00           C\n\
         ATOM      6    C GLY A   2      11.000   0.000   0.000  1.00  0.00           C\n\
         ATOM      7    N ALA A   3      12.320   0.000   0.000  1.00  0.00           N  \n\
         ATOM      8   CA ALA A   3      12.820   1.000   0.000  1.00  0.00           C  \n\
         ATOM      9    C ALA A   3      14.320   0.000   0.000  1.00  0.00           C  \n\
         ATOM     10    O ALA A   3      14.820  -1.000   0.000  1.00  0.00           O  \n\
         {:<80}\n\
         END\n",
        "SEQRES   1 A    3  ALA GLY ALA", "TER"
    );
    assert_eq!(render(&outcome.document), expected);
    assert_eq!(outcome.chain_id, 'A');
    assert_eq!(outcome.residue_code, "ALA");
    assert_eq!(outcome.residue_index, 3);
}

#[test]
fn placed_atoms_carry_serials_and_residue_metadata() {
    let outcome = extend_str(SINGLE_CHAIN, &config("ala")).unwrap();

    let serials: Vec<_> = outcome.placed_atoms.iter().map(|a| a.serial).collect();
    assert_eq!(serials, vec![Some(7), Some(8), Some(9), Some(10)]);
    assert!(outcome
        .placed_atoms
        .iter()
        .all(|a| a.residue_name == "ALA" && a.residue_index == 3));
}

#[test]
fn generated_lines_are_full_width_records() {
    let outcome = extend_str(SINGLE_CHAIN, &config("A")).unwrap();
    let rendered = render(&outcome.document);

    let generated: Vec<_> = rendered
        .lines()
        .filter(|l| l.starts_with("SEQRES") || l.starts_with("TER") || l.contains(" ALA A   3 "))
        .collect();
    assert_eq!(generated.len(), 6);
    for line in generated {
        assert_eq!(line.len(), RECORD_WIDTH, "line {:?}", line);
    }
}

#[test]
fn full_sequence_line_overflows_into_a_new_line() {
    let content = SINGLE_CHAIN.replace(
        "SEQRES   1 A    2  ALA GLY",
        "SEQRES   1 A   13  ALA GLY ALA GLY ALA GLY ALA GLY ALA GLY ALA GLY ALA",
    );

    let outcome = extend_str(&content, &config("A")).unwrap();
    let rendered = render(&outcome.document);
    let seqres: Vec<_> = rendered.lines().filter(|l| l.starts_with("SEQRES")).collect();

    assert_eq!(seqres.len(), 2);
    assert_eq!(
        seqres[0].trim_end(),
        "SEQRES   1 A   14  ALA GLY ALA GLY ALA GLY ALA GLY ALA GLY ALA GLY ALA"
    );
    assert_eq!(seqres[1], format!("{:<80}", "SEQRES   2 A   14  ALA"));
    assert_eq!(outcome.residue_index, 14);
}

#[test]
fn every_sequence_line_of_the_chain_gets_the_new_count() {
    let content = SINGLE_CHAIN.replace(
        "SEQRES   1 A    2  ALA GLY",
        "SEQRES   1 A   15  ALA GLY ALA GLY ALA GLY ALA GLY ALA GLY ALA GLY ALA\n\
         SEQRES   2 A   15  GLY ALA",
    );

    let outcome = extend_str(&content, &config("A")).unwrap();
    let rendered = render(&outcome.document);
    let seqres: Vec<_> = rendered.lines().filter(|l| l.starts_with("SEQRES")).collect();

    assert_eq!(seqres.len(), 2);
    assert!(seqres[0].starts_with("SEQRES   1 A   16  ALA GLY"));
    assert_eq!(seqres[1].trim_end(), "SEQRES   2 A   16  GLY ALA ALA");
    assert_eq!(outcome.residue_index, 16);
}

#[test]
fn chain_without_terminal_record_gets_one_after_the_new_atoms() {
    let content = "\
SEQRES   1 A    1  GLY
SEQRES   1 B    1  SER
ATOM      1    N GLY A   1      10.000   0.000   0.000  1.00  0.00           N
ATOM      2    C GLY A   1      11.000   0.000   0.000  1.00  0.00           C
TER       3      GLY A   1
ATOM      8    N SER B   1      30.000   0.000   0.000  1.00  0.00           N
ATOM      9    C SER B   1      31.000   0.000   0.000  1.00  0.00           C
END
";
    let config = ExtendConfigBuilder::new()
        .residue("A".parse().unwrap())
        .chain_id('B')
        .build()
        .unwrap();

    let outcome = extend_str(content, &config).unwrap();
    let rendered = render(&outcome.document);
    let lines: Vec<_> = rendered.lines().collect();

    assert_eq!(lines[0], "SEQRES   1 A    1  GLY", "other chains pass through");
    assert_eq!(lines[1].trim_end(), "SEQRES   1 B    2  SER ALA");
    assert_eq!(lines[4], "TER       3      GLY A   1");
    assert_eq!(
        &lines[7..11],
        &[
            "ATOM     10    N ALA B   2      32.320   0.000   0.000  1.00  0.00           N  ",
            "ATOM     11   CA ALA B   2      32.820   1.000   0.000  1.00  0.00           C  ",
            "ATOM     12    C ALA B   2      34.320   0.000   0.000  1.00  0.00           C  ",
            "ATOM     13    O ALA B   2      34.820  -1.000   0.000  1.00  0.00           O  ",
        ]
    );
    assert_eq!(lines[11].trim_end(), "TER");
    assert_eq!(lines[12], "END");
    assert_eq!(outcome.chain_id, 'B');
}

#[test]
fn residue_index_follows_last_atom_without_sequence_records() {
    let content: String = SINGLE_CHAIN
        .lines()
        .filter(|l| !l.starts_with("SEQRES"))
        .map(|l| format!("{}\n", l))
        .collect();

    let outcome = extend_str(&content, &config("A")).unwrap();

    assert_eq!(outcome.residue_index, 3);
    assert!(render(&outcome.document).lines().all(|l| !l.starts_with("SEQRES")));
}

#[test]
fn builtin_templates_attach_at_peptide_bond_length() {
    for method in [PlacementMethod::AdditiveAngles, PlacementMethod::RotationMatrix] {
        let config = ExtendConfigBuilder::new()
            .residue("W".parse().unwrap())
            .method(method)
            .build()
            .unwrap();
        let library = TemplateLibrary::builtin().unwrap();

        let outcome = extend::run(&parse(SINGLE_CHAIN), &library, &config).unwrap();

        let reparsed = parse(&render(&outcome.document));
        let new_n = reparsed
            .atoms()
            .find(|a| a.residue_index == 3 && a.name == "N")
            .unwrap();
        let last_c = reparsed
            .atoms()
            .find(|a| a.residue_index == 2 && a.name == "C")
            .unwrap();
        let bond = (new_n.position - last_c.position).norm();
        assert!((bond - PEPTIDE_BOND_LENGTH).abs() < 2e-3, "{}: bond {}", method, bond);
        assert_eq!(reparsed.atoms().filter(|a| a.residue_name == "TRP").count(), 14);
    }
}

#[test]
fn unrecognized_one_letter_code_is_rejected_before_placement() {
    let result = "X".parse::<ResidueCode>().map_err(EngineError::from);
    assert!(matches!(
        result,
        Err(EngineError::ResidueCode(ResidueCodeError::Unrecognized(ref code))) if code == "X"
    ));
}

#[test]
fn missing_template_fails_the_rewrite() {
    let result = extend_str(SINGLE_CHAIN, &config("MSE"));
    assert!(matches!(
        result,
        Err(EngineError::Template {
            source: TemplateError::NotFound(ref code)
        }) if code == "MSE"
    ));
}

#[test]
fn chain_tail_without_carbon_fails_the_rewrite() {
    let content: String = SINGLE_CHAIN
        .lines()
        .filter(|l| !l.contains("    C ALA") && !l.contains("    C GLY"))
        .map(|l| format!("{}\n", l))
        .collect();

    let result = extend_str(&content, &config("A"));

    assert!(matches!(
        result,
        Err(EngineError::Placement {
            source: PlacementError::MissingBackboneAtom {
                atom_name: "C",
                location: BackboneSource::ChainTail
            }
        })
    ));
}

#[test]
fn requested_chain_must_exist() {
    let config = ExtendConfigBuilder::new()
        .residue("A".parse().unwrap())
        .chain_id('Q')
        .build()
        .unwrap();
    let result = extend_str(SINGLE_CHAIN, &config);
    assert!(matches!(
        result,
        Err(EngineError::ChainNotFound { chain_id: 'Q' })
    ));
}

#[test]
fn malformed_atom_record_is_reported_with_its_line_number() {
    let content = SINGLE_CHAIN.replace("  10.500", "  10.5x0");
    let result = PdbFile::read_from(&mut BufReader::new(Cursor::new(content)))
        .map_err(EngineError::from);

    match result {
        Err(EngineError::Pdb {
            source: PdbError::MalformedRecord { line, record, .. },
        }) => {
            assert_eq!(line, 7);
            assert_eq!(record, "ATOM");
        }
        other => panic!("expected a malformed record error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn non_finite_chain_tail_coordinate_is_rejected_by_the_reader() {
    let content = SINGLE_CHAIN.replace("  11.000   0.000", "     nan   0.000");
    let result = PdbFile::read_from(&mut BufReader::new(Cursor::new(content)));

    assert!(matches!(
        result,
        Err(PdbError::MalformedRecord {
            line: 8,
            kind: PdbParseErrorKind::InvalidFloat { columns: "31-38", .. },
            ..
        })
    ));
}

#[test]
fn blank_chain_can_be_requested_explicitly() {
    let content = SINGLE_CHAIN.replace(" A ", "   ");
    let config = ExtendConfigBuilder::new()
        .residue("A".parse().unwrap())
        .chain_id(' ')
        .build()
        .unwrap();

    let outcome = extend_str(&content, &config).unwrap();

    assert_eq!(outcome.chain_id, ' ');
    assert_eq!(outcome.residue_index, 3);
    let rendered = render(&outcome.document);
    assert!(rendered.contains("SEQRES   1      3  ALA GLY ALA"));
    assert_eq!(rendered.lines().filter(|l| l.contains(" ALA     3 ")).count(), 4);
}
