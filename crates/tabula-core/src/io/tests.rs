//! Tests for io module

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::error::TableError;
use crate::table::{Cell, Column, DataTable, DataType, Schema};

use super::reader::{classify, promote};
use super::{read, write};

fn write_csv(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_classify() {
    assert_eq!(classify("42"), DataType::Integer);
    assert_eq!(classify("-7"), DataType::Integer);
    assert_eq!(classify("3.14"), DataType::Double);
    assert_eq!(classify("1e3"), DataType::Double);
    assert_eq!(classify("TRUE"), DataType::Boolean);
    assert_eq!(classify("false"), DataType::Boolean);
    assert_eq!(classify("hello"), DataType::String);
}

#[test]
fn test_promotion_lattice() {
    assert_eq!(promote(None, DataType::Integer), DataType::Integer);
    assert_eq!(
        promote(Some(DataType::Integer), DataType::Integer),
        DataType::Integer
    );
    assert_eq!(
        promote(Some(DataType::Integer), DataType::Double),
        DataType::Double
    );
    assert_eq!(
        promote(Some(DataType::Double), DataType::Integer),
        DataType::Double
    );
    assert_eq!(
        promote(Some(DataType::Integer), DataType::String),
        DataType::String
    );
    assert_eq!(
        promote(Some(DataType::String), DataType::Integer),
        DataType::String
    );
    assert_eq!(
        promote(Some(DataType::Boolean), DataType::Integer),
        DataType::String
    );
    assert_eq!(
        promote(Some(DataType::Double), DataType::Boolean),
        DataType::String
    );
}

#[test]
fn test_read_infers_column_types() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "mixed.csv",
        "id,price,active,label\n1,9.5,true,red\n2,10,false,blue\n3,11.25,TRUE,green\n",
    );

    let table = read(&path, ",").unwrap();
    let schema = table.schema();
    assert_eq!(schema.dtype_of("id").unwrap(), DataType::Integer);
    // Integer and Double mixed in one column promote to Double.
    assert_eq!(schema.dtype_of("price").unwrap(), DataType::Double);
    assert_eq!(schema.dtype_of("active").unwrap(), DataType::Boolean);
    assert_eq!(schema.dtype_of("label").unwrap(), DataType::String);

    assert_eq!(table.get_value("price", 1).unwrap(), &Cell::Double(10.0));
    assert_eq!(table.get_value("active", 2).unwrap(), &Cell::Bool(true));
}

#[test]
fn test_read_ragged_rows_and_blanks() {
    // Blank cell and a short row: both become NA; the "30" in the first
    // field makes the name column String by promotion.
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "people.csv", "name,age\nAna,23\nLuis,\n30\n");

    let table = read(&path, ",").unwrap();
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.schema().dtype_of("age").unwrap(), DataType::Integer);
    assert_eq!(table.schema().dtype_of("name").unwrap(), DataType::String);

    assert_eq!(table.get_value("age", 0).unwrap(), &Cell::Int(23));
    assert_eq!(table.get_value("age", 1).unwrap(), &Cell::Na);
    assert_eq!(table.get_value("age", 2).unwrap(), &Cell::Na);
    assert_eq!(table.get_value("name", 2).unwrap(), &Cell::Str("30".into()));
}

#[test]
fn test_read_whitespace_cells_do_not_influence_inference() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "ws.csv", "a,b\n  ,1\n   ,2\n");

    let table = read(&path, ",").unwrap();
    // Column of only whitespace cells defaults to String.
    assert_eq!(table.schema().dtype_of("a").unwrap(), DataType::String);
    assert_eq!(table.schema().dtype_of("b").unwrap(), DataType::Integer);
    assert_eq!(table.get_value("a", 0).unwrap(), &Cell::Na);
}

#[test]
fn test_read_trims_header_labels() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "trim.csv", " a , b \n1,2\n");

    let table = read(&path, ",").unwrap();
    assert_eq!(table.column_labels(), vec!["a", "b"]);
}

#[test]
fn test_read_rejects_blank_header_field() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "blank_header.csv", "a,,c\n1,2,3\n");

    assert!(matches!(read(&path, ","), Err(TableError::Schema(_))));
}

#[test]
fn test_read_custom_delimiter() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "semi.csv", "x;y\n1;2\n3;4\n");

    let table = read(&path, ";").unwrap();
    assert_eq!(table.column_labels(), vec!["x", "y"]);
    assert_eq!(table.get_value("y", 1).unwrap(), &Cell::Int(4));
}

#[test]
fn test_read_header_only_yields_empty_table() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "header.csv", "a,b\n");

    let table = read(&path, ",").unwrap();
    assert_eq!(table.row_count(), 0);
    assert_eq!(table.column_count(), 2);
    assert_eq!(table.schema().dtype_of("a").unwrap(), DataType::String);
}

#[test]
fn test_read_failures() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "empty.csv", "");

    assert!(matches!(
        read(&path, ","),
        Err(TableError::EmptyInput(_))
    ));
    assert!(matches!(
        read(&path, ""),
        Err(TableError::InvalidArgument(_))
    ));
    assert!(matches!(
        read("", ","),
        Err(TableError::InvalidArgument(_))
    ));
    assert!(matches!(
        read(dir.path().join("missing.csv"), ","),
        Err(TableError::Io(_))
    ));
}

#[test]
fn test_write_renders_na_and_header() {
    let schema = Schema::new(vec![
        Column::new("name", DataType::String),
        Column::new("age", DataType::Integer),
    ])
    .unwrap();
    let table = DataTable::from_rows(
        schema,
        vec![
            vec![Cell::Str("Ana".into()), Cell::Int(23)],
            vec![Cell::Str("Luis".into()), Cell::Na],
        ],
    )
    .unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.csv");
    write(&table, &path, ",", true).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "name,age\nAna,23\nLuis,NA\n");

    write(&table, &path, ",", false).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "Ana,23\nLuis,NA\n");

    assert!(matches!(
        write(&table, "", ",", true),
        Err(TableError::InvalidArgument(_))
    ));
    assert!(matches!(
        write(&table, &path, "", true),
        Err(TableError::InvalidArgument(_))
    ));
}

#[test]
fn test_round_trip_preserves_cells() {
    let schema = Schema::new(vec![
        Column::new("name", DataType::String),
        Column::new("count", DataType::Integer),
        Column::new("ratio", DataType::Double),
        Column::new("flag", DataType::Boolean),
    ])
    .unwrap();
    let table = DataTable::from_rows(
        schema,
        vec![
            vec![
                Cell::Str("alpha".into()),
                Cell::Int(1),
                Cell::Double(0.5),
                Cell::Bool(true),
            ],
            vec![
                Cell::Str("beta".into()),
                Cell::Int(2),
                // Whole-valued doubles write as "30.0" and stay Double.
                Cell::Double(30.0),
                Cell::Bool(false),
            ],
        ],
    )
    .unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roundtrip.csv");
    write(&table, &path, ",", true).unwrap();
    let back = read(&path, ",").unwrap();

    assert_eq!(back.schema(), table.schema());
    assert_eq!(back.row_count(), table.row_count());
    for (row, orig) in back.rows().zip(table.rows()) {
        assert_eq!(row.values(), orig.values());
    }
}

#[test]
fn test_written_na_reads_back_as_text_in_string_columns() {
    // NA has no dedicated wire form: it writes as the literal "NA", which a
    // re-read classifies as String. Numeric columns containing NA therefore
    // degrade to String on a write/read cycle.
    let schema = Schema::new(vec![Column::new("v", DataType::Integer)]).unwrap();
    let table =
        DataTable::from_rows(schema, vec![vec![Cell::Int(1)], vec![Cell::Na]]).unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("na.csv");
    write(&table, &path, ",", true).unwrap();
    let back = read(&path, ",").unwrap();

    assert_eq!(back.schema().dtype_of("v").unwrap(), DataType::String);
    assert_eq!(back.get_value("v", 1).unwrap(), &Cell::Str("NA".into()));
}
