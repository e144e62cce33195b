use std::collections::BTreeMap;

use log::{debug, info, warn};
use thiserror::Error;

use crate::garoon::Event;
use crate::input::{GridConfig, SheetMap};
use crate::sheets::{column_label, CellValue, CellWrite, SpreadsheetStore, StoreError};
use crate::sync::{classify, find_date_row_span, find_person_column, AttendanceState, LocateError};
use crate::time::Date;

/// How many rows below the header the date column is scanned for day
/// markers. Generous for a monthly grid; rows past the last marker are
/// ignored anyway.
const DATE_SCAN_ROWS: usize = 100;

/// Writes one month of attendance states for one person into a tab.
///
/// All coordinates are discovered from live cell content on every call:
/// the person's column from the header row, the day rows from the date
/// column. The only durable state is the spreadsheet itself, so re-running
/// with an unchanged event snapshot produces the identical batch.
pub struct ScheduleWriter {
    header_row: usize,
    date_column: String,
    holiday_menus: Vec<String>,
    outing_menus: Vec<String>,
    normal_place: String,
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error(transparent)]
    Locate(#[from] LocateError),
    #[error("header row {row} of tab \"{tab}\" is empty")]
    EmptyHeaderRow { tab: String, row: usize },
    #[error("tab \"{tab}\" has no month mapping")]
    UnmappedTab { tab: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Zero pending writes is a normal outcome, not an error: it simply means
/// every day in the tab's range lies in the past.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written(usize),
    NothingToWrite,
}

impl ScheduleWriter {
    #[must_use]
    pub fn new(grid: &GridConfig) -> Self {
        Self {
            header_row: grid.header_row,
            date_column: grid.date_column.clone(),
            holiday_menus: grid.holiday_menus.clone(),
            outing_menus: grid.outing_menus.clone(),
            normal_place: grid.normal_place.clone(),
        }
    }

    pub fn write_month(
        &self,
        store: &dyn SpreadsheetStore,
        sheet_map: &SheetMap,
        tab: &str,
        person: &str,
        events_by_day: &BTreeMap<usize, Vec<Event>>,
        today: Date,
    ) -> Result<WriteOutcome, WriteError> {
        let header_range = format!("{row}:{row}", row = self.header_row);
        let header = store.read_range(tab, &header_range)?;
        let header_cells = header
            .first()
            .filter(|cells| !cells.is_empty())
            .ok_or_else(|| WriteError::EmptyHeaderRow {
                tab: tab.to_string(),
                row: self.header_row,
            })?;

        let column = column_label(find_person_column(header_cells, person)?);
        debug!("\"{}\" is column {} on tab \"{}\"", person, column, tab);

        let date_range = format!(
            "{col}{first}:{col}{last}",
            col = self.date_column,
            first = self.header_row + 1,
            last = self.header_row + DATE_SCAN_ROWS,
        );
        let date_rows = store.read_range(tab, &date_range)?;
        let span = find_date_row_span(&date_rows, self.header_row)?;
        debug!("day markers span rows {}..={}", span.first(), span.last());

        let month = sheet_map
            .resolve_month(tab)
            .ok_or_else(|| WriteError::UnmappedTab {
                tab: tab.to_string(),
            })?;

        let mut writes = Vec::new();

        for (offset, row) in date_rows.iter().enumerate() {
            let Some(day) = row.first().and_then(CellValue::as_day) else {
                continue;
            };

            let date = match month.with_day(day) {
                Ok(date) => date,
                Err(error) => {
                    warn!("ignoring day marker on tab \"{}\": {}", tab, error);
                    continue;
                }
            };

            // past cells are never overwritten, so manual corrections survive
            if date < today {
                debug!("skipping past date {}", date);
                continue;
            }

            let state = events_by_day
                .get(&day)
                .map(|events| classify(events, &self.holiday_menus, &self.outing_menus))
                .unwrap_or(AttendanceState::Usual);

            let row_number = self.header_row + offset + 1;
            writes.push(CellWrite::new(&column, row_number, state.label(&self.normal_place)));
        }

        if writes.is_empty() {
            info!(
                "nothing to write for \"{}\" on tab \"{}\" (all dates are in the past)",
                person, tab
            );
            return Ok(WriteOutcome::NothingToWrite);
        }

        info!("writing {} cells for \"{}\" on tab \"{}\"", writes.len(), person, tab);
        store.batch_write(tab, &writes)?;

        Ok(WriteOutcome::Written(writes.len()))
    }
}
