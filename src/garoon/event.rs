use serde::{Deserialize, Serialize};
use thiserror::Error;
use ::time::format_description::well_known::Rfc3339;
use ::time::OffsetDateTime;

use crate::time::Date;

/// One scheduled event as returned by the groupware API. Immutable once
/// fetched; the grid writer only ever reads the menu label and start date.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub subject: String,
    /// The category label attached to the event (e.g. "休暇", "出張") that
    /// drives attendance classification. Events without a menu carry an
    /// empty string.
    #[serde(default)]
    pub event_menu: String,
    pub start: EventDateTime,
    pub end: EventDateTime,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    pub date_time: String,
    pub time_zone: String,
}

impl EventDateTime {
    /// The calendar date of this timestamp, in the timezone the groupware
    /// reported it in.
    pub fn date(&self) -> Result<Date, InvalidTimestamp> {
        let parsed =
            OffsetDateTime::parse(&self.date_time, &Rfc3339).map_err(|_| InvalidTimestamp {
                input: self.date_time.clone(),
            })?;

        Ok(Date::from(parsed.date()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("\"{input}\" is not an RFC 3339 timestamp")]
pub struct InvalidTimestamp {
    input: String,
}

/// A user of the groupware, as listed by the directory endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_organization: Option<Organization>,
}

/// A groupware organization. Listed standalone (with its hierarchy fields)
/// to help operators find the ids their people belong to.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
