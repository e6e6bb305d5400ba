//! Delimited-text codec for frames.
//!
//! The staging side of every load: frames are encoded to delimited text
//! before upload, and staged or unloaded files decode back into frames.
//! Built on the `csv` crate; quoting and escaping follow standard CSV
//! dialect rules.

use serde::{Deserialize, Serialize};

use crate::redstage::error::{TransferError, TransferResult};
use crate::redstage::frame::{Column, FieldValue, Frame};

/// CSV dialect options for the tabular codec.
///
/// Defaults mirror the common staging shape: comma delimited, header line
/// included, row index serialized as the leading column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvOptions {
    pub delimiter: char,
    /// Write (and expect) a header line
    pub header: bool,
    /// Serialize the frame's index as the leading column
    pub index: bool,
    /// Header label for the index column; falls back to the index column's
    /// own name, then to `index`
    pub index_label: Option<String>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            delimiter: ',',
            header: true,
            index: true,
            index_label: None,
        }
    }
}

impl CsvOptions {
    /// The header label used for a serialized index column.
    pub fn resolve_index_label(&self, index: Option<&Column>) -> String {
        self.index_label
            .clone()
            .or_else(|| index.map(|c| c.name.clone()))
            .unwrap_or_else(|| "index".to_string())
    }
}

/// The delimiter as the single byte the codec needs. Multi-byte characters
/// cannot be a CSV delimiter, so anything outside ASCII is rejected.
fn delimiter_byte(options: &CsvOptions) -> TransferResult<u8> {
    if !options.delimiter.is_ascii() {
        return Err(TransferError::configuration(format!(
            "delimiter '{}' must be a single ASCII character",
            options.delimiter
        )));
    }
    Ok(options.delimiter as u8)
}

/// Encode a frame as delimited text.
///
/// The index column, when present and requested, leads every row. Null
/// values encode as empty fields.
pub fn frame_to_csv(frame: &Frame, options: &CsvOptions) -> TransferResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter_byte(options)?)
        .from_writer(Vec::new());

    let index_column = if options.index { frame.index() } else { None };

    if options.header {
        let mut header: Vec<String> = Vec::new();
        if index_column.is_some() {
            header.push(options.resolve_index_label(frame.index()));
        }
        header.extend(frame.column_names());
        writer
            .write_record(&header)
            .map_err(|e| TransferError::serialization(e.to_string()))?;
    }

    for row in 0..frame.num_rows() {
        let mut record: Vec<String> = Vec::new();
        if let Some(index) = index_column {
            record.push(index.values[row].to_string());
        }
        for column in frame.columns() {
            record.push(column.values[row].to_string());
        }
        writer
            .write_record(&record)
            .map_err(|e| TransferError::serialization(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| TransferError::serialization(e.to_string()))
}

/// Decode delimited text into a frame.
///
/// Field types are inferred per column from the decoded values: integer,
/// then float, then boolean, then timestamp, else text. A serialized index
/// comes back as a regular leading column; reattaching it as an index is the
/// caller's choice.
pub fn csv_to_frame(bytes: &[u8], options: &CsvOptions) -> TransferResult<Frame> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter_byte(options)?)
        .has_headers(options.header)
        .from_reader(bytes);

    let names: Vec<String> = if options.header {
        reader
            .headers()
            .map_err(|e| TransferError::serialization(e.to_string()))?
            .iter()
            .map(|h| h.to_string())
            .collect()
    } else {
        Vec::new()
    };

    let mut rows: Vec<Vec<FieldValue>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| TransferError::serialization(e.to_string()))?;
        rows.push(record.iter().map(FieldValue::infer_from_str).collect());
    }

    let width = rows.first().map(|r| r.len()).unwrap_or(names.len());
    let names = if names.is_empty() {
        (0..width).map(|i| format!("column_{}", i)).collect()
    } else {
        names
    };

    Frame::from_query(names, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redstage::frame::{Column, DType};

    fn sample_frame() -> Frame {
        Frame::new(vec![
            Column::from_i64("col1", vec![1, 2]),
            Column::from_strings("col2", vec!["x", "y"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_encode_without_index() {
        let bytes = frame_to_csv(&sample_frame(), &CsvOptions::default()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "col1,col2\n1,x\n2,y\n");
    }

    #[test]
    fn test_encode_with_index_leads_rows() {
        let frame = sample_frame()
            .with_index(Column::from_i64("id", vec![10, 20]))
            .unwrap();
        let bytes = frame_to_csv(&frame, &CsvOptions::default()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "id,col1,col2\n10,1,x\n20,2,y\n");
    }

    #[test]
    fn test_index_skipped_when_not_requested() {
        let frame = sample_frame()
            .with_index(Column::from_i64("id", vec![10, 20]))
            .unwrap();
        let options = CsvOptions {
            index: false,
            ..Default::default()
        };
        let text = String::from_utf8(frame_to_csv(&frame, &options).unwrap()).unwrap();
        assert_eq!(text, "col1,col2\n1,x\n2,y\n");
    }

    #[test]
    fn test_null_round_trips_as_empty_field() {
        let frame = Frame::new(vec![Column::new(
            "a",
            DType::Int64,
            vec![FieldValue::Integer(1), FieldValue::Null],
        )])
        .unwrap();
        let options = CsvOptions {
            index: false,
            ..Default::default()
        };
        let bytes = frame_to_csv(&frame, &options).unwrap();
        let decoded = csv_to_frame(&bytes, &options).unwrap();
        assert_eq!(decoded.columns()[0].values[1], FieldValue::Null);
    }

    #[test]
    fn test_decode_infers_column_types() {
        let decoded = csv_to_frame(b"n,s,f\n1,abc,1.5\n2,def,2.5\n", &CsvOptions::default())
            .unwrap();
        assert_eq!(decoded.columns()[0].dtype, DType::Int64);
        assert_eq!(decoded.columns()[1].dtype, DType::Object);
        assert_eq!(decoded.columns()[2].dtype, DType::Float64);
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let frame = sample_frame();
        let options = CsvOptions {
            index: false,
            ..Default::default()
        };
        let decoded = csv_to_frame(&frame_to_csv(&frame, &options).unwrap(), &options).unwrap();
        assert_eq!(decoded.sorted_rows(), frame.sorted_rows());
        assert_eq!(decoded.column_names(), frame.column_names());
    }

    #[test]
    fn test_float_column_round_trips_whole_values() {
        let frame = Frame::new(vec![Column::new(
            "price",
            DType::Float64,
            vec![FieldValue::Float(1.5), FieldValue::Float(2.0)],
        )])
        .unwrap();
        let options = CsvOptions {
            index: false,
            ..Default::default()
        };
        let bytes = frame_to_csv(&frame, &options).unwrap();
        assert_eq!(String::from_utf8(bytes.clone()).unwrap(), "price\n1.5\n2.0\n");

        let decoded = csv_to_frame(&bytes, &options).unwrap();
        assert_eq!(decoded.columns()[0].dtype, DType::Float64);
        assert_eq!(decoded.columns()[0].values[1], FieldValue::Float(2.0));
    }

    #[test]
    fn test_non_ascii_delimiter_is_rejected() {
        let options = CsvOptions {
            delimiter: '§',
            ..Default::default()
        };
        let encode = frame_to_csv(&sample_frame(), &options).unwrap_err();
        assert!(matches!(encode, TransferError::Configuration { .. }));
        let decode = csv_to_frame(b"a,b\n1,2\n", &options).unwrap_err();
        assert!(matches!(decode, TransferError::Configuration { .. }));
    }

    #[test]
    fn test_tab_delimited_dialect() {
        let options = CsvOptions {
            delimiter: '\t',
            index: false,
            ..Default::default()
        };
        let bytes = frame_to_csv(&sample_frame(), &options).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("col1\tcol2\n"));
        let decoded = csv_to_frame(text.as_bytes(), &options).unwrap();
        assert_eq!(decoded.num_rows(), 2);
    }
}
