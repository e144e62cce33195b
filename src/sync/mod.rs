mod classify;
pub use classify::*;
mod locate;
pub use locate::*;
mod writer;
pub use writer::*;

use std::collections::BTreeMap;

use log::{debug, warn};

use crate::garoon::Event;
use crate::input::SheetMap;
use crate::time::CalendarMonth;

/// Events grouped by day-of-month, for one tab.
pub type EventsByDay = BTreeMap<usize, Vec<Event>>;

/// Buckets events by the tab their month is bound to, then by day. Events in
/// months without a tab binding are dropped silently (months outside the
/// planning horizon are expected); events whose start timestamp cannot be
/// parsed are dropped with a warning.
#[must_use]
pub fn group_events_by_tab(events: Vec<Event>, sheet_map: &SheetMap) -> BTreeMap<String, EventsByDay> {
    let mut grouped: BTreeMap<String, EventsByDay> = BTreeMap::new();

    for event in events {
        let date = match event.start.date() {
            Ok(date) => date,
            Err(error) => {
                warn!("ignoring event {}: {}", event.id, error);
                continue;
            }
        };

        let month = CalendarMonth::from(date);
        let Some(tab) = sheet_map.resolve_tab(month) else {
            debug!("skipping event {}: no tab bound to {}", event.id, month);
            continue;
        };

        grouped
            .entry(tab.to_string())
            .or_default()
            .entry(date.day())
            .or_default()
            .push(event);
    }

    grouped
}
