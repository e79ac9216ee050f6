use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Cell, RawTable};
use super::TableError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`                  – comma separated, first record is the header
/// * `.tsv` / `.tab` / `.txt` – tab separated, first record is the header
/// * `.json`                 – array of arrays or array of objects
/// * `.parquet`              – schema field names become the header
pub fn load_file(path: &Path) -> Result<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let source = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    match ext.as_str() {
        "csv" => load_delimited(path, b',', source),
        "tsv" | "tab" | "txt" => load_delimited(path, b'\t', source),
        "json" => load_json(path, source),
        "parquet" | "pq" => load_parquet(path, source),
        other => Err(TableError::UnsupportedExtension(other.to_string()).into()),
    }
}

/// Turn pasted spreadsheet text into a table.
///
/// Lines are split on `\n`, cells on `\t`. Returns `None` for blank input so
/// the caller can leave the current chart untouched.
pub fn parse_clipboard_text(text: &str) -> Option<RawTable> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let lines = text
        .split('\n')
        .map(|line| line.split('\t').map(str::to_string).collect())
        .collect();
    table_from_text_rows(lines, "clipboard").ok()
}

/// First row becomes the (trimmed) header, the rest are resolved into cells.
fn table_from_text_rows(
    mut lines: Vec<Vec<String>>,
    source: impl Into<String>,
) -> Result<RawTable> {
    if lines.is_empty() {
        return Err(TableError::MissingHeader.into());
    }
    let headers = lines
        .remove(0)
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let rows = lines
        .iter()
        .map(|line| line.iter().map(|c| Cell::parse(c)).collect())
        .collect();
    Ok(RawTable {
        headers,
        rows,
        source: source.into(),
    })
}

// ---------------------------------------------------------------------------
// CSV / TSV loader
// ---------------------------------------------------------------------------

fn load_delimited(path: &Path, delimiter: u8, source: String) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)
        .context("opening delimited text file")?;

    // Byte records: files saved in a legacy code page still load, with the
    // undecodable bytes replaced.
    let mut lines = Vec::new();
    for (row_no, result) in reader.byte_records().enumerate() {
        let record = result.with_context(|| format!("reading record {row_no}"))?;
        lines.push(
            record
                .iter()
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect(),
        );
    }

    table_from_text_rows(lines, source)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Two layouts are accepted:
///
/// ```json
/// [["A", "B"], [1, 10], [2, 20]]
/// ```
///
/// ```json
/// [{ "A": 1, "B": 10 }, { "A": 2 }]
/// ```
///
/// For objects the header is the union of keys in the order they are
/// first met; a missing key is a missing cell.
fn load_json(path: &Path, source: String) -> Result<RawTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .ok_or_else(|| TableError::MalformedJson("expected a top-level array".into()))?;

    if records.iter().all(JsonValue::is_array) {
        let lines = records
            .iter()
            .filter_map(JsonValue::as_array)
            .map(|row| row.iter().map(json_to_text).collect())
            .collect();
        return table_from_text_rows(lines, source);
    }

    let mut headers: Vec<String> = Vec::new();
    let mut objects = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| TableError::MalformedJson(format!("row {i} is not an object")))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
        objects.push(obj);
    }

    let rows = objects
        .iter()
        .map(|obj| {
            headers
                .iter()
                .map(|h| obj.get(h).map_or(Cell::Empty, |v| Cell::parse(&json_to_text(v))))
                .collect()
        })
        .collect();

    Ok(RawTable {
        headers,
        rows,
        source,
    })
}

fn json_to_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file as a table.
///
/// Numeric columns (any integer, float or decimal width) become numbers,
/// string columns are re-parsed like text cells, nulls are blanks and any
/// other type is kept as display text.
fn load_parquet(path: &Path, source: String) -> Result<RawTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;

    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();

    let reader = builder.build().context("building parquet reader")?;

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let columns = batch
            .columns()
            .iter()
            .enumerate()
            .map(|(i, col)| {
                column_cells(col).with_context(|| format!("decoding column '{}'", headers[i]))
            })
            .collect::<Result<Vec<_>>>()?;

        for row in 0..batch.num_rows() {
            rows.push(columns.iter().map(|col| col[row].clone()).collect());
        }
    }

    Ok(RawTable {
        headers,
        rows,
        source,
    })
}

/// Resolve every value of an Arrow column into a [`Cell`].
fn column_cells(col: &ArrayRef) -> Result<Vec<Cell>> {
    let len = col.len();
    match col.data_type() {
        dt if dt.is_numeric() => {
            let floats = cast(col.as_ref(), &DataType::Float64)?;
            let floats = floats.as_primitive::<Float64Type>();
            Ok((0..len)
                .map(|row| {
                    if floats.is_null(row) {
                        Cell::Empty
                    } else {
                        Cell::Number(floats.value(row))
                    }
                })
                .collect())
        }
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => (0..len)
            .map(|row| -> Result<Cell> {
                if col.is_null(row) {
                    Ok(Cell::Empty)
                } else {
                    Ok(Cell::parse(&array_value_to_string(col.as_ref(), row)?))
                }
            })
            .collect(),
        _ => (0..len)
            .map(|row| -> Result<Cell> {
                if col.is_null(row) {
                    Ok(Cell::Empty)
                } else {
                    Ok(Cell::Text(array_value_to_string(col.as_ref(), row)?))
                }
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int32Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn clipboard_text_splits_on_newlines_and_tabs() {
        let table = parse_clipboard_text("A\tB\r\n1\t10\r\n2\t x \n3\n").unwrap();
        assert_eq!(table.headers, vec!["A", "B"]);
        assert_eq!(table.source, "clipboard");
        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.cell(0, 1), Some(&Cell::Number(10.0)));
        assert_eq!(table.cell(1, 1), Some(&Cell::Text("x".into())));
        assert_eq!(table.cell(2, 1), None);
    }

    #[test]
    fn blank_clipboard_text_is_absent_input() {
        assert!(parse_clipboard_text("").is_none());
        assert!(parse_clipboard_text("  \n\t \n").is_none());
    }

    #[test]
    fn header_only_clipboard_has_no_rows() {
        let table = parse_clipboard_text("A\tB").unwrap();
        assert_eq!(table.headers, vec!["A", "B"]);
        assert_eq!(table.num_rows(), 0);
    }

    #[test]
    fn loads_ragged_csv() {
        let file = write_temp(".csv", "A,B\n1,10\n2\n3,oops\n");
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.headers, vec!["A", "B"]);
        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.cell(1, 1), None);
        assert_eq!(table.cell(2, 1), Some(&Cell::Text("oops".into())));
    }

    #[test]
    fn loads_tsv() {
        let file = write_temp(".tsv", "x\ty\n1.5\t-2\n");
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.headers, vec!["x", "y"]);
        assert_eq!(table.cell(0, 0), Some(&Cell::Number(1.5)));
        assert_eq!(table.cell(0, 1), Some(&Cell::Number(-2.0)));
    }

    #[test]
    fn loads_csv_with_non_utf8_bytes() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"caf\xe9,B\n1,10\n2,20\n").unwrap();
        file.flush().unwrap();

        let table = load_file(file.path()).unwrap();
        assert_eq!(table.headers, vec!["caf\u{FFFD}", "B"]);
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.cell(1, 1), Some(&Cell::Number(20.0)));
    }

    #[test]
    fn empty_csv_has_no_header() {
        let file = write_temp(".csv", "");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TableError>(),
            Some(TableError::MissingHeader)
        ));
    }

    #[test]
    fn loads_json_array_of_arrays() {
        let file = write_temp(".json", r#"[["A", "B"], [1, "10"], [2, null], [3]]"#);
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.headers, vec!["A", "B"]);
        assert_eq!(table.cell(0, 1), Some(&Cell::Number(10.0)));
        assert_eq!(table.cell(1, 1), Some(&Cell::Empty));
        assert_eq!(table.cell(2, 1), None);
    }

    #[test]
    fn loads_json_array_of_objects() {
        let file = write_temp(".json", r#"[{"A": 1, "B": 2}, {"A": 3, "C": "x"}]"#);
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.headers.len(), 3);
        let c = table.headers.iter().position(|h| h == "C").unwrap();
        let b = table.headers.iter().position(|h| h == "B").unwrap();
        assert_eq!(table.cell(0, c), Some(&Cell::Empty));
        assert_eq!(table.cell(1, b), Some(&Cell::Empty));
        assert_eq!(table.cell(1, c), Some(&Cell::Text("x".into())));
    }

    #[test]
    fn rejects_non_array_json() {
        let file = write_temp(".json", r#"{"A": [1, 2]}"#);
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TableError>(),
            Some(TableError::MalformedJson(_))
        ));
    }

    #[test]
    fn rejects_spreadsheet_binaries() {
        let err = load_file(Path::new("book.xlsx")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TableError>(),
            Some(TableError::UnsupportedExtension(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn loads_parquet_columns() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("height", DataType::Float64, true),
            Field::new("count", DataType::Int32, false),
            Field::new("note", DataType::Utf8, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Float64Array::from(vec![Some(1.5), None])),
                Arc::new(Int32Array::from(vec![3, 4])),
                Arc::new(StringArray::from(vec![Some("7"), Some("n/a")])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new()
            .suffix(".parquet")
            .tempfile()
            .unwrap();
        let out = std::fs::File::create(file.path()).unwrap();
        let mut writer = ArrowWriter::try_new(out, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(file.path()).unwrap();
        assert_eq!(table.headers, vec!["height", "count", "note"]);
        assert_eq!(
            table.rows[0],
            vec![Cell::Number(1.5), Cell::Number(3.0), Cell::Number(7.0)]
        );
        assert_eq!(
            table.rows[1],
            vec![Cell::Empty, Cell::Number(4.0), Cell::Text("n/a".into())]
        );
    }
}
