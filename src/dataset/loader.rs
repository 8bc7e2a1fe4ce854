use super::{Dataset, DatasetError, Row, SourceKey};

/// Name of the one column every dataset must carry.
pub const TEXT_COLUMN: &str = "text";

const UTF8_BOM: char = '\u{feff}';

/// Locate the `text` column, rejecting candidates that lack one.
///
/// Only an exact, case-sensitive match counts. Extra columns are ignored.
pub fn text_column_index<S: AsRef<str>>(columns: &[S]) -> Result<usize, DatasetError> {
    columns
        .iter()
        .position(|column| column.as_ref() == TEXT_COLUMN)
        .ok_or_else(|| DatasetError::MissingTextColumn {
            columns: columns
                .iter()
                .map(|column| column.as_ref().to_string())
                .collect(),
        })
}

/// Parse CSV bytes into an unlabeled [`Dataset`].
///
/// Empty or absent `text` cells become empty text rather than being dropped,
/// so row positions match the source file.
pub fn parse_csv(name: &str, bytes: &[u8]) -> Result<Dataset, DatasetError> {
    let key = SourceKey::from_bytes(name, bytes);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let columns: Vec<String> = reader
        .byte_headers()?
        .iter()
        .enumerate()
        .map(|(idx, raw)| {
            let header = String::from_utf8_lossy(raw);
            if idx == 0 {
                header.trim_start_matches(UTF8_BOM).to_string()
            } else {
                header.into_owned()
            }
        })
        .collect();
    let text_idx = text_column_index(&columns)?;

    let mut rows = Vec::new();
    let mut coerced = 0usize;
    for (idx, record) in reader.byte_records().enumerate() {
        let record = record?;
        let cell = record.get(text_idx).unwrap_or_default();
        let text = std::str::from_utf8(cell).map_err(|_| DatasetError::Encoding { row: idx + 1 })?;
        if text.is_empty() {
            coerced += 1;
        }
        rows.push(Row::new(text));
    }

    if coerced > 0 {
        tracing::debug!("{name}: {coerced} row(s) with empty text treated as empty strings");
    }
    tracing::debug!("{name}: parsed {} row(s), columns [{}]", rows.len(), columns.join(", "));
    Ok(Dataset::new(key, columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_text_and_ignores_extra_columns() {
        let csv = b"id,text,source\n1,I love this,web\n2,\"Quoted, with comma\",app\n";
        let dataset = parse_csv("reviews.csv", csv).unwrap();
        let texts: Vec<&str> = dataset.rows().iter().map(Row::text).collect();
        assert_eq!(texts, vec!["I love this", "Quoted, with comma"]);
        assert_eq!(dataset.columns(), ["id", "text", "source"]);
    }

    #[test]
    fn rejects_missing_text_column() {
        let err = parse_csv("bad.csv", b"comment,score\nnice,1\n").unwrap_err();
        match err {
            DatasetError::MissingTextColumn { columns } => {
                assert_eq!(columns, vec!["comment", "score"]);
            }
            other => panic!("expected MissingTextColumn, got {other:?}"),
        }
    }

    #[test]
    fn header_match_is_exact() {
        assert!(parse_csv("caps.csv", b"Text\nhello\n").is_err());
        assert!(parse_csv("space.csv", b" text\nhello\n").is_err());
        assert!(parse_csv("empty.csv", b"").is_err());
    }

    #[test]
    fn strips_byte_order_mark_from_first_header() {
        let dataset = parse_csv("bom.csv", "\u{feff}text\nhello\n".as_bytes()).unwrap();
        assert_eq!(dataset.rows()[0].text(), "hello");
    }

    #[test]
    fn empty_and_short_rows_become_empty_text() {
        let dataset = parse_csv("gaps.csv", b"id,text\n1,\n2\n3,ok\n").unwrap();
        let texts: Vec<&str> = dataset.rows().iter().map(Row::text).collect();
        assert_eq!(texts, vec!["", "", "ok"]);
    }

    #[test]
    fn reports_invalid_utf8_row() {
        let mut csv = b"text\nfine\n".to_vec();
        csv.extend_from_slice(&[0xff, 0xfe, b'\n']);
        match parse_csv("latin.csv", &csv) {
            Err(DatasetError::Encoding { row }) => assert_eq!(row, 2),
            other => panic!("expected Encoding error, got {other:?}"),
        }
    }

    #[test]
    fn text_column_index_finds_position() {
        assert_eq!(text_column_index(&["a", "text"]).unwrap(), 1);
        assert!(text_column_index::<&str>(&[]).is_err());
    }
}
