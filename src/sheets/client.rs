use std::time::Duration;

use log::debug;
use serde::Deserialize;
use serde_json::json;

use crate::input::SpreadsheetConfig;
use crate::sheets::{CellValue, CellWrite, SpreadsheetStore, StoreError};

const API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Google Sheets v4 REST client. Reads use `values:batchGet` with unformatted
/// values so day markers arrive as numbers, writes go through
/// `values:batchUpdate` with raw input (overwrite, not append).
pub struct SheetsClient {
    agent: ureq::Agent,
    base_url: String,
    spreadsheet_id: String,
    access_token: String,
}

impl SheetsClient {
    #[must_use]
    pub fn new(config: &SpreadsheetConfig) -> Self {
        Self::with_base_url(config, API_BASE)
    }

    #[must_use]
    pub fn with_base_url(config: &SpreadsheetConfig, base_url: &str) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
            base_url: base_url.trim_end_matches('/').to_string(),
            spreadsheet_id: config.id.clone(),
            access_token: config.access_token.clone(),
        }
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}/{}{}", self.base_url, self.spreadsheet_id, suffix)
    }

    fn authorization(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// Titles of the tabs that currently exist in the spreadsheet.
    pub fn tab_titles(&self) -> Result<Vec<String>, StoreError> {
        let response = self
            .agent
            .get(&self.url(""))
            .set("Authorization", &self.authorization())
            .query("fields", "sheets.properties.title")
            .call()?;

        let metadata: SpreadsheetMetadata = response.into_json()?;

        Ok(metadata
            .sheets
            .into_iter()
            .map(|sheet| sheet.properties.title)
            .collect())
    }
}

impl SpreadsheetStore for SheetsClient {
    fn read_range(&self, tab: &str, range: &str) -> Result<Vec<Vec<CellValue>>, StoreError> {
        debug!("reading range {}!{}", tab, range);

        let response = self
            .agent
            .get(&self.url("/values:batchGet"))
            .set("Authorization", &self.authorization())
            .query("ranges", &format!("{tab}!{range}"))
            .query("valueRenderOption", "UNFORMATTED_VALUE")
            .call()?;

        let body: BatchGetResponse = response.into_json()?;

        Ok(body
            .value_ranges
            .into_iter()
            .next()
            .map(|value_range| value_range.values)
            .unwrap_or_default())
    }

    fn batch_write(&self, tab: &str, writes: &[CellWrite]) -> Result<(), StoreError> {
        debug!("submitting batch of {} writes to tab \"{}\"", writes.len(), tab);

        let data: Vec<serde_json::Value> = writes
            .iter()
            .map(|write| {
                json!({
                    "range": format!("{}!{}", tab, write.cell()),
                    "values": [[write.value()]],
                })
            })
            .collect();

        self.agent
            .post(&self.url("/values:batchUpdate"))
            .set("Authorization", &self.authorization())
            .send_json(json!({
                "valueInputOption": "RAW",
                "data": data,
            }))?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMetadata {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchGetResponse {
    #[serde(default)]
    value_ranges: Vec<ValueRange>,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<CellValue>>,
}
