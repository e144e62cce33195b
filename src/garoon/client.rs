use std::time::Duration;

use base64::prelude::*;
use log::debug;
use serde::Deserialize;
use thiserror::Error;
use ::time::UtcOffset;

use crate::garoon::{Event, Organization, User};
use crate::http::summarize_body;
use crate::input::GaroonConfig;
use crate::time::Date;

const PAGE_LIMIT: usize = 100;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the groupware scheduling API. All calls are synchronous single
/// round trips; paging is driven by an explicit offset loop.
pub struct GaroonClient {
    agent: ureq::Agent,
    base_url: String,
    username: String,
    password: String,
}

impl GaroonClient {
    #[must_use]
    pub fn new(config: &GaroonConfig) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }

    fn credential(&self) -> String {
        BASE64_STANDARD.encode(format!("{}:{}", self.username, self.password))
    }

    /// Fetches all events of `target` user between `start` and `end`
    /// (inclusive dates), following the API's paging until `hasNext` runs out.
    pub fn fetch_events(
        &self,
        target: &str,
        start: Date,
        end: Date,
    ) -> Result<Vec<Event>, GaroonError> {
        let events = Self::collect_pages(|offset| self.fetch_page(target, start, end, offset))?;

        debug!("fetched {} events for target {}", events.len(), target);
        Ok(events)
    }

    /// Drains a paged listing by advancing the offset by the size of each
    /// page. An empty page ends the loop even when the server still claims
    /// `hasNext`, so a lying server cannot spin this forever.
    fn collect_pages(
        mut fetch: impl FnMut(usize) -> Result<EventPage, GaroonError>,
    ) -> Result<Vec<Event>, GaroonError> {
        let mut events = Vec::new();
        let mut offset = 0;

        loop {
            let page = fetch(offset)?;
            let fetched = page.events.len();
            events.extend(page.events);

            if !page.has_next || fetched == 0 {
                break;
            }

            offset += fetched;
        }

        Ok(events)
    }

    fn fetch_page(
        &self,
        target: &str,
        start: Date,
        end: Date,
        offset: usize,
    ) -> Result<EventPage, GaroonError> {
        let response = self
            .agent
            .get(&format!("{}/api/v1/schedule/events", self.base_url))
            .set("X-Cybozu-Authorization", &self.credential())
            .set("Content-Type", "application/json")
            .query("rangeStart", &day_start(start))
            .query("rangeEnd", &day_end(end))
            .query("offset", &offset.to_string())
            .query("limit", &PAGE_LIMIT.to_string())
            .query("orderBy", "start asc")
            .query("target", target)
            .query("targetType", "user")
            .call()
            .map_err(GaroonError::from)?;

        Ok(response.into_json()?)
    }

    /// Fetches the user directory.
    pub fn list_users(&self) -> Result<Vec<User>, GaroonError> {
        let response = self
            .agent
            .get(&format!("{}/api/v1/base/users", self.base_url))
            .set("X-Cybozu-Authorization", &self.credential())
            .call()
            .map_err(GaroonError::from)?;

        let listing: UserListing = response.into_json()?;
        Ok(listing.users)
    }

    /// Fetches the organization directory.
    pub fn list_organizations(&self) -> Result<Vec<Organization>, GaroonError> {
        let response = self
            .agent
            .get(&format!("{}/api/v1/base/organizations", self.base_url))
            .set("X-Cybozu-Authorization", &self.credential())
            .call()
            .map_err(GaroonError::from)?;

        let listing: OrganizationListing = response.into_json()?;
        Ok(listing.organizations)
    }

    /// Fetches the members of one organization.
    pub fn list_organization_users(
        &self,
        organization_id: &str,
    ) -> Result<Vec<User>, GaroonError> {
        let response = self
            .agent
            .get(&format!(
                "{}/api/v1/base/organizations/{}/users",
                self.base_url, organization_id
            ))
            .set("X-Cybozu-Authorization", &self.credential())
            .call()
            .map_err(GaroonError::from)?;

        let listing: UserListing = response.into_json()?;
        Ok(listing.users)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventPage {
    #[serde(default)]
    events: Vec<Event>,
    #[serde(default)]
    has_next: bool,
}

#[derive(Debug, Deserialize)]
struct UserListing {
    #[serde(default)]
    users: Vec<User>,
}

#[derive(Debug, Deserialize)]
struct OrganizationListing {
    #[serde(default)]
    organizations: Vec<Organization>,
}

fn local_offset_suffix() -> String {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let (hours, minutes, _) = offset.as_hms();
    format!("{:+03}:{:02}", hours, minutes.unsigned_abs())
}

fn day_start(date: Date) -> String {
    format!("{date}T00:00:00{}", local_offset_suffix())
}

fn day_end(date: Date) -> String {
    format!("{date}T23:59:59{}", local_offset_suffix())
}

#[derive(Debug, Error)]
pub enum GaroonError {
    /// Credentials were rejected, or the server demands a client certificate.
    /// Not transient; retrying with the same configuration cannot succeed.
    #[error("authentication rejected by the scheduling API (status {status})")]
    Auth { status: u16 },
    #[error("scheduling API returned status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("scheduling API request failed: {0}")]
    Transport(String),
    #[error("failed to decode scheduling API response: {0}")]
    Decode(#[from] std::io::Error),
}

impl From<ureq::Error> for GaroonError {
    fn from(error: ureq::Error) -> Self {
        match error {
            // 496 is the "no client certificate" status some proxies answer with
            ureq::Error::Status(status @ (401 | 403 | 496), _) => Self::Auth { status },
            ureq::Error::Status(status, response) => {
                let body = response.into_string().unwrap_or_default();
                Self::Api {
                    status,
                    message: summarize_body(&body),
                }
            }
            ureq::Error::Transport(transport) => Self::Transport(transport.to_string()),
        }
    }
}
