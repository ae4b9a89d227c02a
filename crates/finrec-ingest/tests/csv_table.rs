use std::io::Write;

use finrec_ingest::read_csv_table;
use tempfile::NamedTempFile;

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write csv");
    file
}

#[test]
fn reads_headers_and_rows() {
    let file = write_csv("Move Date,Item No.,Qty\n01/01/2023,60330045,-123\n");
    let table = read_csv_table(file.path()).expect("read table");
    assert_eq!(table.headers, vec!["Move Date", "Item No.", "Qty"]);
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0], vec!["01/01/2023", "60330045", "-123"]);
}

#[test]
fn strips_bom_and_skips_blank_rows() {
    let file = write_csv("\u{feff}Item No,Total Price\n0998877,12.50\n,\n0998878,3\n");
    let table = read_csv_table(file.path()).expect("read table");
    assert_eq!(table.headers[0], "Item No");
    assert_eq!(table.rows.len(), 2);
}

#[test]
fn quoted_cells_keep_embedded_commas() {
    let file = write_csv("Description,Total\n\"Beef, diced\",5.10\n");
    let table = read_csv_table(file.path()).expect("read table");
    assert_eq!(table.rows[0][0], "Beef, diced");
}

#[test]
fn row_maps_with_supplied_headers_rekey_reference_extracts() {
    let file = write_csv("id,name,cat\n709,Depot A,NFSI Fresh\n");
    let table = read_csv_table(file.path()).expect("read table");
    let rows = table.row_maps_with_headers(&["depot_id", "depot_name", "depot_category"]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("depot_id").map(String::as_str), Some("709"));
    assert_eq!(
        rows[0].get("depot_category").map(String::as_str),
        Some("NFSI Fresh")
    );
}
