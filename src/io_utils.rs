//! CSV reader and writer construction.
//!
//! Input tables are read through `csv` byte records and decoded with
//! `encoding_rs` so that exports saved in legacy code pages still load.
//! Delimiters are picked from the file extension (`.tsv` → tab, otherwise
//! comma) unless overridden.

use std::{
    fs::{File, OpenOptions},
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use encoding_rs::{Encoding, UTF_8};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

pub fn resolve_input_delimiter(path: &Path, provided: Option<u8>) -> u8 {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

pub fn open_csv_reader<R>(reader: R, delimiter: u8) -> csv::Reader<R>
where
    R: Read,
{
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(true);
    builder.from_reader(reader)
}

pub fn open_csv_reader_from_path(path: &Path, delimiter: u8) -> Result<csv::Reader<BufReader<File>>> {
    let file = File::open(path).with_context(|| format!("Opening input file {path:?}"))?;
    Ok(open_csv_reader(BufReader::new(file), delimiter))
}

/// Opens `path` for appending. The flag reports whether the file was created
/// empty, in which case the caller owes it a header row.
pub fn open_append_writer(path: &Path) -> Result<(csv::Writer<Box<dyn Write>>, bool)> {
    let fresh = std::fs::metadata(path).map(|meta| meta.len() == 0).unwrap_or(true);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Opening export file {path:?}"))?;
    let sink: Box<dyn Write> = Box::new(BufWriter::new(file));
    let writer = csv::WriterBuilder::new()
        .delimiter(DEFAULT_CSV_DELIMITER)
        .double_quote(true)
        .from_writer(sink);
    Ok((writer, fresh))
}

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(anyhow!(
            "Failed to decode text with encoding {}",
            encoding.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

pub fn decode_record(record: &csv::ByteRecord, encoding: &'static Encoding) -> Result<Vec<String>> {
    record
        .iter()
        .map(|field| decode_bytes(field, encoding))
        .collect()
}

pub fn reader_headers<R>(
    reader: &mut csv::Reader<R>,
    encoding: &'static Encoding,
) -> Result<Vec<String>>
where
    R: Read,
{
    let headers = reader.byte_headers()?.clone();
    decode_record(&headers, encoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tsv_extension_selects_tab_delimiter() {
        assert_eq!(resolve_input_delimiter(Path::new("balls.tsv"), None), b'\t');
        assert_eq!(resolve_input_delimiter(Path::new("balls.csv"), None), b',');
        assert_eq!(resolve_input_delimiter(Path::new("balls.tsv"), Some(b';')), b';');
    }

    #[test]
    fn legacy_encodings_decode() {
        let encoding = resolve_encoding(Some("windows-1252")).expect("known label");
        let decoded = decode_bytes(&[0x43, 0x61, 0x66, 0xE9], encoding).expect("decode");
        assert_eq!(decoded, "Café");
        assert!(resolve_encoding(Some("klingon")).is_err());
    }
}
