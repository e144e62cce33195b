use std::io::Read;
use std::path::Path;

use log::info;
use thiserror::Error;

use crate::time::{CalendarMonth, InvalidCalendarMonth};

/// The configured month <-> tab bindings, loaded once per run from a CSV
/// source with a `month,sheet_name` header and months formatted `YYYY-MM`.
///
/// Both lookups return `None` for unmapped inputs: months outside the
/// planning horizon are a normal, expected outcome and callers skip them
/// silently. Duplicate months are a data-quality issue; the first binding
/// wins.
#[derive(Debug, Clone)]
pub struct SheetMap {
    mappings: Vec<SheetMapping>,
}

#[derive(Debug, Clone)]
struct SheetMapping {
    month: CalendarMonth,
    sheet_name: String,
}

impl SheetMap {
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, MappingError> {
        let path = path.as_ref();
        let map = Self::from_csv_reader(csv::ReaderBuilder::new().flexible(true).from_path(path)?)?;
        info!("loaded {} sheet mappings from {}", map.len(), path.display());
        Ok(map)
    }

    pub fn from_csv_reader<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, MappingError> {
        let mut mappings = Vec::new();

        for record in reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();

            if record.len() != 2 {
                return Err(MappingError::ColumnCount {
                    line,
                    found: record.len(),
                });
            }

            let month = record[0]
                .parse::<CalendarMonth>()
                .map_err(|source| MappingError::Month { line, source })?;

            mappings.push(SheetMapping {
                month,
                sheet_name: record[1].to_string(),
            });
        }

        Ok(Self { mappings })
    }

    /// The tab bound to `month`, if any.
    #[must_use]
    pub fn resolve_tab(&self, month: CalendarMonth) -> Option<&str> {
        self.mappings
            .iter()
            .find(|mapping| mapping.month == month)
            .map(|mapping| mapping.sheet_name.as_str())
    }

    /// The inverse lookup: the month a tab is bound to, if any.
    #[must_use]
    pub fn resolve_month(&self, tab: &str) -> Option<CalendarMonth> {
        self.mappings
            .iter()
            .find(|mapping| mapping.sheet_name == tab)
            .map(|mapping| mapping.month)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum MappingError {
    #[error("failed to read mapping file: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: expected 2 columns but found {found}")]
    ColumnCount { line: u64, found: usize },
    #[error("line {line}: {source}")]
    Month {
        line: u64,
        #[source]
        source: InvalidCalendarMonth,
    },
}
