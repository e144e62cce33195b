pub mod garoon;
mod http;
pub mod input;
pub mod sheets;
pub mod sync;
pub mod time;

use std::collections::HashSet;

use anyhow::Context as _;
use log::{error, info, warn};

use crate::garoon::GaroonClient;
use crate::input::Config;
use crate::sheets::SheetsClient;
use crate::sync::{group_events_by_tab, ScheduleWriter};
use crate::time::{CalendarMonth, Date};

/// How many months past the current one are fetched and written.
const HORIZON_MONTHS: usize = 3;

/// Fetches every mapped person's events for the planning horizon and writes
/// their attendance grids. A failing (person, tab) unit is reported and the
/// run continues with the remaining units; the run as a whole fails if any
/// unit did.
pub fn sync_schedules(config: &Config) -> anyhow::Result<()> {
    let today = Date::today();
    let current_month = CalendarMonth::from(today);

    let mut horizon = current_month;
    for _ in 0..HORIZON_MONTHS {
        horizon = horizon.succ();
    }

    let start = current_month.first_day();
    let end = horizon.last_day();
    info!("synchronizing events from {} to {}", start, end);

    let garoon = GaroonClient::new(config.garoon());
    let store = SheetsClient::new(config.spreadsheet());
    let writer = ScheduleWriter::new(config.grid());

    let existing_tabs: HashSet<String> = store
        .tab_titles()
        .context("failed to list spreadsheet tabs")?
        .into_iter()
        .collect();

    let mut failed_units = 0;

    for user in config.user_map().iter() {
        let events = match garoon.fetch_events(user.user_id(), start, end) {
            Ok(events) => events,
            Err(error) => {
                error!(
                    "failed to fetch events for \"{}\": {}",
                    user.header_name(),
                    error
                );
                failed_units += 1;
                continue;
            }
        };

        info!(
            "fetched {} events for \"{}\"",
            events.len(),
            user.header_name()
        );

        for (tab, events_by_day) in group_events_by_tab(events, config.sheet_map()) {
            if !existing_tabs.contains(&tab) {
                warn!("tab \"{}\" does not exist in the spreadsheet, skipping", tab);
                continue;
            }

            if let Err(error) = writer.write_month(
                &store,
                config.sheet_map(),
                &tab,
                user.header_name(),
                &events_by_day,
                today,
            ) {
                error!(
                    "failed to write tab \"{}\" for \"{}\": {}",
                    tab,
                    user.header_name(),
                    error
                );
                failed_units += 1;
            }
        }
    }

    if failed_units > 0 {
        anyhow::bail!("{} unit(s) of work failed", failed_units);
    }

    Ok(())
}

/// Prints the groupware user directory as pretty JSON, for building the
/// user mapping CSV.
pub fn list_users(config: &Config) -> anyhow::Result<()> {
    let garoon = GaroonClient::new(config.garoon());
    let users = garoon.list_users().context("failed to list users")?;

    println!("{}", serde_json::to_string_pretty(&users)?);

    Ok(())
}

/// Prints the groupware organization directory as pretty JSON, or the
/// members of one organization when its id is given.
pub fn list_organizations(config: &Config, organization_id: Option<&str>) -> anyhow::Result<()> {
    let garoon = GaroonClient::new(config.garoon());

    match organization_id {
        Some(id) => {
            let members = garoon
                .list_organization_users(id)
                .with_context(|| format!("failed to list members of organization {id}"))?;
            println!("{}", serde_json::to_string_pretty(&members)?);
        }
        None => {
            let organizations = garoon
                .list_organizations()
                .context("failed to list organizations")?;
            println!("{}", serde_json::to_string_pretty(&organizations)?);
        }
    }

    Ok(())
}
