//! End-to-end check of the attendance-grid writer through the public API:
//! a mapped tab, a live-scanned header and date column, and one batched
//! overwrite of every non-past day.

use std::cell::RefCell;

use pretty_assertions::assert_eq;

use attendance_sync::date;
use attendance_sync::garoon::{Event, EventDateTime};
use attendance_sync::input::{GridConfig, SheetMap};
use attendance_sync::sheets::{CellValue, CellWrite, SpreadsheetStore, StoreError};
use attendance_sync::sync::{group_events_by_tab, ScheduleWriter, WriteOutcome};

struct InMemoryStore {
    header: Vec<Vec<CellValue>>,
    dates: Vec<Vec<CellValue>>,
    batches: RefCell<Vec<(String, Vec<CellWrite>)>>,
}

impl SpreadsheetStore for InMemoryStore {
    fn read_range(&self, _tab: &str, range: &str) -> Result<Vec<Vec<CellValue>>, StoreError> {
        if range.starts_with(|c: char| c.is_ascii_digit()) {
            Ok(self.header.clone())
        } else {
            Ok(self.dates.clone())
        }
    }

    fn batch_write(&self, tab: &str, writes: &[CellWrite]) -> Result<(), StoreError> {
        self.batches
            .borrow_mut()
            .push((tab.to_string(), writes.to_vec()));
        Ok(())
    }
}

fn event(id: &str, start: &str, menu: &str) -> Event {
    Event {
        id: id.to_string(),
        subject: "予定".to_string(),
        event_menu: menu.to_string(),
        start: EventDateTime {
            date_time: start.to_string(),
            time_zone: "Asia/Tokyo".to_string(),
        },
        end: EventDateTime {
            date_time: start.to_string(),
            time_zone: "Asia/Tokyo".to_string(),
        },
        location: None,
    }
}

#[test]
fn grouped_events_end_up_in_the_right_cells() {
    let sheet_map = SheetMap::from_csv_reader(
        csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader("month,sheet_name\n2025-02,R6年度_2月\n".as_bytes()),
    )
    .unwrap();

    let grid = GridConfig {
        header_row: 7,
        date_column: "B".to_string(),
        holiday_menus: vec!["休暇".to_string()],
        outing_menus: vec!["出張".to_string()],
        normal_place: "渋谷".to_string(),
    };

    // header with "伊藤" in column J
    let mut header = vec![
        CellValue::Text("DATE".to_string()),
        CellValue::Text("曜日".to_string()),
        CellValue::Text("予定".to_string()),
    ];
    header.extend((0..6).map(|_| CellValue::Text(String::new())));
    header.push(CellValue::Text("伊藤".to_string()));

    let store = InMemoryStore {
        header: vec![header],
        dates: (1..=28).map(|day| vec![CellValue::Int(day)]).collect(),
        batches: RefCell::new(Vec::new()),
    };

    let events = vec![
        event("a", "2025-02-20T09:00:00+09:00", "休暇"),
        event("b", "2025-02-20T13:00:00+09:00", "出張"),
        event("c", "2025-02-21T09:00:00+09:00", ""),
        // outside the mapped horizon, must be dropped silently
        event("d", "2025-06-01T09:00:00+09:00", "休暇"),
    ];

    let grouped = group_events_by_tab(events, &sheet_map);
    assert_eq!(grouped.len(), 1);

    let writer = ScheduleWriter::new(&grid);
    let today = date!(2025:02:10);

    for (tab, events_by_day) in &grouped {
        let outcome = writer
            .write_month(&store, &sheet_map, tab, "伊藤", events_by_day, today)
            .unwrap();

        assert_eq!(outcome, WriteOutcome::Written(19));
    }

    let batches = store.batches.borrow();
    assert_eq!(batches.len(), 1);

    let (tab, writes) = &batches[0];
    assert_eq!(tab, "R6年度_2月");

    // the holiday menu wins over the outing menu scheduled the same day
    assert!(writes.contains(&CellWrite::new("J", 27, "週休")));
    // a menu-less event is ordinary attendance
    assert!(writes.contains(&CellWrite::new("J", 28, "渋谷")));
    // every day strictly before today stays untouched
    for row in 8..17 {
        assert!(!writes.iter().any(|write| write.cell() == format!("J{row}")));
    }
}
