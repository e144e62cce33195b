use serde::{Deserialize, Serialize};

/// A single cell as returned by the spreadsheet API. Numbers may arrive as
/// native integers, floats or numeric strings depending on how the sheet was
/// filled in, so all comparisons go through the normalizing accessors.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl CellValue {
    /// Interprets the cell as a day-of-month marker. Anything that does not
    /// normalize to a positive integer is not a day marker.
    #[must_use]
    pub fn as_day(&self) -> Option<usize> {
        match self {
            Self::Int(number) if *number > 0 => Some(*number as usize),
            Self::Float(number) if *number as i64 > 0 => Some(*number as usize),
            Self::Text(text) => text
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|number| *number > 0)
                .map(|number| number as usize),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Converts a 0-based column index to its spreadsheet letter label
/// (bijective base-26: 0 -> "A", 25 -> "Z", 26 -> "AA").
#[must_use]
pub fn column_label(index: usize) -> String {
    let mut remaining = index + 1;
    let mut label = String::new();

    while remaining > 0 {
        remaining -= 1;
        label.insert(0, (b'A' + (remaining % 26) as u8) as char);
        remaining /= 26;
    }

    label
}

/// One pending single-cell update, addressed in A1 notation without the tab
/// prefix (the store prepends it when submitting the batch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellWrite {
    cell: String,
    value: String,
}

impl CellWrite {
    pub fn new(column: &str, row: usize, value: impl Into<String>) -> Self {
        Self {
            cell: format!("{column}{row}"),
            value: value.into(),
        }
    }

    pub fn cell(&self) -> &str {
        &self.cell
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_column_label() {
        assert_eq!(column_label(0), "A");
        assert_eq!(column_label(3), "D");
        assert_eq!(column_label(9), "J");
        assert_eq!(column_label(25), "Z");
        assert_eq!(column_label(26), "AA");
        assert_eq!(column_label(27), "AB");
        assert_eq!(column_label(701), "ZZ");
        assert_eq!(column_label(702), "AAA");
    }

    #[test]
    fn test_as_day_normalization() {
        assert_eq!(CellValue::Int(5).as_day(), Some(5));
        assert_eq!(CellValue::Float(5.0).as_day(), Some(5));
        assert_eq!(CellValue::Text("12".to_string()).as_day(), Some(12));
        assert_eq!(CellValue::Text(" 12 ".to_string()).as_day(), Some(12));
    }

    #[test]
    fn test_as_day_rejects_non_markers() {
        assert_eq!(CellValue::Int(0).as_day(), None);
        assert_eq!(CellValue::Int(-3).as_day(), None);
        assert_eq!(CellValue::Float(0.5).as_day(), None);
        assert_eq!(CellValue::Text("DATE".to_string()).as_day(), None);
        assert_eq!(CellValue::Text(String::new()).as_day(), None);
        assert_eq!(CellValue::Bool(true).as_day(), None);
    }

    #[test]
    fn test_as_text_only_matches_strings() {
        assert_eq!(CellValue::Text("伊藤".to_string()).as_text(), Some("伊藤"));
        assert_eq!(CellValue::Int(5).as_text(), None);
    }

    #[test]
    fn test_cell_write_address() {
        let write = CellWrite::new("J", 27, "週休");
        assert_eq!(write.cell(), "J27");
        assert_eq!(write.value(), "週休");
    }
}
