use thiserror::Error;

use crate::sheets::CellValue;

/// The 1-based sheet rows holding day markers on a tab, derived from
/// scanning the date column below the header. Recomputed per tab per run;
/// header layout is live spreadsheet state and never assumed stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    first: usize,
    last: usize,
}

impl RowSpan {
    pub const fn first(&self) -> usize {
        self.first
    }

    pub const fn last(&self) -> usize {
        self.last
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocateError {
    #[error("no column titled \"{name}\" in the header row")]
    PersonColumnNotFound { name: String },
    #[error("no day markers in the date column below the header row")]
    EmptyDateColumn,
}

/// Scans a header row left-to-right for the first cell whose string value
/// exactly equals `name` and returns its 0-based column index. Only string
/// cells can match; there is no fuzzy or partial matching.
pub fn find_person_column(header: &[CellValue], name: &str) -> Result<usize, LocateError> {
    header
        .iter()
        .position(|cell| cell.as_text() == Some(name))
        .ok_or_else(|| LocateError::PersonColumnNotFound {
            name: name.to_string(),
        })
}

/// Finds the row span of day markers. `rows` is the date-column read range
/// starting directly below `header_row`; the span ends at the LAST row whose
/// first cell normalizes to a positive integer, so gaps in the column do not
/// cut the scan short.
pub fn find_date_row_span(rows: &[Vec<CellValue>], header_row: usize) -> Result<RowSpan, LocateError> {
    let last_offset = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row.first().and_then(CellValue::as_day).is_some())
        .map(|(offset, _)| offset)
        .last()
        .ok_or(LocateError::EmptyDateColumn)?;

    Ok(RowSpan {
        first: header_row + 1,
        last: header_row + last_offset + 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    use crate::sheets::column_label;

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    #[test]
    fn test_find_person_column() {
        let header = vec![text("DATE"), text("DoW"), text("予定"), text("伊藤")];

        let index = find_person_column(&header, "伊藤").unwrap();
        assert_eq!(index, 3);
        assert_eq!(column_label(index), "D");
    }

    #[test]
    fn test_find_person_column_not_found() {
        let header = vec![text("DATE"), text("DoW"), text("予定"), text("伊藤")];

        assert_eq!(
            find_person_column(&header, "山田"),
            Err(LocateError::PersonColumnNotFound {
                name: "山田".to_string()
            })
        );
    }

    #[test]
    fn test_find_person_column_empty_header() {
        assert!(matches!(
            find_person_column(&[], "伊藤"),
            Err(LocateError::PersonColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_find_person_column_first_match_wins() {
        let header = vec![text("伊藤"), text("伊藤")];
        assert_eq!(find_person_column(&header, "伊藤"), Ok(0));
    }

    #[test]
    fn test_find_person_column_ignores_numeric_cells() {
        let header = vec![CellValue::Int(42), text("42")];
        assert_eq!(find_person_column(&header, "42"), Ok(1));
    }

    #[test]
    fn test_date_row_span() {
        let rows = vec![
            vec![CellValue::Int(1)],
            vec![CellValue::Int(2)],
            vec![CellValue::Int(3)],
        ];

        let span = find_date_row_span(&rows, 7).unwrap();
        assert_eq!(span.first(), 8);
        assert_eq!(span.last(), 10);
    }

    #[test]
    fn test_date_row_span_survives_gaps() {
        let rows = vec![
            vec![CellValue::Int(1)],
            vec![],
            vec![text("note")],
            vec![text("3")],
        ];

        let span = find_date_row_span(&rows, 7).unwrap();
        assert_eq!(span.last(), 11);
    }

    #[test]
    fn test_date_row_span_mixed_representations() {
        let rows = vec![
            vec![CellValue::Float(1.0)],
            vec![text("2")],
            vec![CellValue::Int(3)],
        ];

        let span = find_date_row_span(&rows, 4).unwrap();
        assert_eq!(span.first(), 5);
        assert_eq!(span.last(), 7);
    }

    #[test]
    fn test_date_row_span_empty_column() {
        assert_eq!(find_date_row_span(&[], 7), Err(LocateError::EmptyDateColumn));

        let non_markers = vec![vec![text("DATE")], vec![CellValue::Int(0)]];
        assert_eq!(
            find_date_row_span(&non_markers, 7),
            Err(LocateError::EmptyDateColumn)
        );
    }
}
