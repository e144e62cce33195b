use thiserror::Error;

use crate::http::summarize_body;
use crate::sheets::{CellValue, CellWrite};

/// The spreadsheet collaborator as seen by the grid writer: one read, one
/// batched overwrite. Implementations are expected to be synchronous; the
/// writer sequences read-then-write within a tab and never retries.
pub trait SpreadsheetStore {
    /// Reads a range of a tab and returns its rows. Trailing empty cells may
    /// be absent, so rows are not guaranteed to have equal lengths.
    fn read_range(&self, tab: &str, range: &str) -> Result<Vec<Vec<CellValue>>, StoreError>;

    /// Submits all writes as one batch with overwrite semantics. A failure
    /// fails the whole batch; no cell is retried individually.
    fn batch_write(&self, tab: &str, writes: &[CellWrite]) -> Result<(), StoreError>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("spreadsheet request failed: {0}")]
    Transport(String),
    #[error("spreadsheet API returned status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("failed to decode spreadsheet response: {0}")]
    Decode(#[from] std::io::Error),
}

impl From<ureq::Error> for StoreError {
    fn from(error: ureq::Error) -> Self {
        match error {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_error_bodies_are_not_dumped_verbatim() {
        let response =
            ureq::Response::new(500, "Internal Server Error", "<!DOCTYPE html><html></html>")
                .unwrap();
        let error = StoreError::from(ureq::Error::Status(500, response));

        match error {
            StoreError::Api { status, message } => {
                assert_eq!(status, 500);
                assert!(!message.contains("DOCTYPE"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
