mod common;

use common::constants;
use rstest::rstest;
use scanforge::error::ScanForgeError;
use scanforge::table::{PrefixGroup, ScancodeTable};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_header_declares_prefix_groups() {
    let csv = "F0,E0,E0 F0\nA,1C,F0 1C\n";
    let table = ScancodeTable::from_reader(csv.as_bytes()).unwrap();

    assert_eq!(
        table.prefixes,
        vec![
            PrefixGroup::new(vec![0xf0]),
            PrefixGroup::new(vec![0xe0]),
            PrefixGroup::new(vec![0xe0, 0xf0]),
        ]
    );
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0].make, vec![0x1c]);
    assert_eq!(table.rows[0].brk, vec![0xf0, 0x1c]);
}

#[test]
fn test_comments_blank_cells_and_quoted_names() {
    let csv = "\
E0,,F0
# extended keys
\"KP,\",E0 4A, E0 F0 4A 

ESC,76,F0 76
";
    let table = ScancodeTable::from_reader(csv.as_bytes()).unwrap();

    assert_eq!(table.prefixes.len(), 2);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0].name, "KP,");
    assert_eq!(table.rows[1].name, "ESC");
    assert_eq!(table.rows[1].row, 2);
}

#[test]
fn test_resolve_emits_make_then_break() {
    let table = ScancodeTable::from_reader("E0\nRGUI,E0 27,E0 F0 27\n".as_bytes()).unwrap();
    let recs = table.resolve(&constants(&[("RGUI", 0xa6)])).unwrap();

    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].sequence, vec![0xe0, 0x27]);
    assert!(!recs[0].is_break);
    assert_eq!(recs[1].sequence, vec![0xe0, 0xf0, 0x27]);
    assert!(recs[1].is_break);
    assert!(recs.iter().all(|r| r.key_code == 0xa6 && r.label == "RGUI"));
}

#[test]
fn test_unresolved_name_fails_whole_table() {
    let table =
        ScancodeTable::from_reader("F0\nA,1C,F0 1C\nZZ,1A,F0 1A\n".as_bytes()).unwrap();
    let err = table.resolve(&constants(&[("A", 0x62)])).unwrap_err();

    match err {
        ScanForgeError::UnresolvedKeycode { name, row } => {
            assert_eq!(name, "ZZ");
            assert_eq!(row, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
#[case::short_row("F0\nA,1C\n")]
#[case::missing_name("F0\n,1C,F0 1C\n")]
fn test_malformed_rows(#[case] csv: &str) {
    let err = ScancodeTable::from_reader(csv.as_bytes()).unwrap_err();
    assert!(
        matches!(err, ScanForgeError::MalformedRow { row: 1, .. }),
        "{err}"
    );
}

#[rstest]
#[case::bad_header("G0\n")]
#[case::bad_make("F0\nA,1C 2,F0 1C\nB,XY,F0 1C\n")]
#[case::too_wide("F0\nA,1C,F0 1C0\n")]
fn test_invalid_hex(#[case] csv: &str) {
    let err = ScancodeTable::from_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, ScanForgeError::InvalidHex { .. }), "{err}");
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "F0,E0").unwrap();
    writeln!(file, "A,1C,F0 1C").unwrap();
    writeln!(file, "LGUI,E0 1F,E0 F0 1F").unwrap();

    let table = ScancodeTable::load_from_file(file.path()).unwrap();
    assert_eq!(table.prefixes.len(), 2);
    assert_eq!(table.rows.len(), 2);
}

#[test]
fn test_missing_file_is_io_error() {
    let err = ScancodeTable::load_from_file("/definitely/not/here.csv").unwrap_err();
    assert!(matches!(err, ScanForgeError::Io(_)));
}
