use alertscope::table::{read_table, TableError};
use std::io::Cursor;

#[test]
fn reads_headers_rows_and_trims_header_names() {
    let data = " Description , Elemento \nCPU high,host-a\nDisk low,host-b\n";
    let t = read_table(Cursor::new(data), b',').unwrap();
    assert_eq!(t.columns(), ["Description", "Elemento"]);
    assert_eq!(t.len(), 2);
    assert_eq!(t.value(0, "Description"), "CPU high");
    assert_eq!(t.value(1, "Elemento"), "host-b");
}

#[test]
fn quoted_cells_keep_embedded_newlines() {
    let data = "Description,Elemento\n\"CPU high\nclimbing fast\",host-a\n";
    let t = read_table(Cursor::new(data), b',').unwrap();
    assert_eq!(t.len(), 1);
    assert_eq!(t.value(0, "Description"), "CPU high\nclimbing fast");
}

#[test]
fn respects_the_supplied_delimiter() {
    let data = "Description;Elemento\nCPU high;host-a\n";
    let t = read_table(Cursor::new(data), b';').unwrap();
    assert_eq!(t.columns(), ["Description", "Elemento"]);
    assert_eq!(t.value(0, "Elemento"), "host-a");
}

#[test]
fn short_rows_pad_with_empty_cells() {
    let data = "A,B,C\nx\ny,z\n";
    let t = read_table(Cursor::new(data), b',').unwrap();
    assert_eq!(t.len(), 2);
    assert_eq!(t.value(0, "B"), "");
    assert_eq!(t.value(1, "B"), "z");
    assert_eq!(t.value(1, "C"), "");
}

#[test]
fn non_utf8_bytes_degrade_to_replacement_chars() {
    // "Descripción" in latin-1; lossy decoding must not abort the read.
    let data = b"Descripci\xf3n,CI\nCPU alta,host-a\n".to_vec();
    let t = read_table(Cursor::new(data), b',').unwrap();
    assert_eq!(t.len(), 1);
    assert!(t.columns()[0].contains('\u{FFFD}'));
    assert_eq!(t.value(0, "CI"), "host-a");
}

#[test]
fn empty_input_reports_missing_header() {
    let err = read_table(Cursor::new(""), b',').unwrap_err();
    assert!(matches!(err, TableError::NoHeader));
}

#[test]
fn unknown_columns_and_rows_read_as_empty() {
    let data = "A\nx\n";
    let t = read_table(Cursor::new(data), b',').unwrap();
    assert_eq!(t.value(0, "missing"), "");
    assert_eq!(t.value(99, "A"), "");
    assert!(t.column_values("missing").is_empty());
}
