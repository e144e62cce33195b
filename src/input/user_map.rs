use std::io::Read;
use std::path::Path;

use log::info;

use crate::input::MappingError;

/// One person to synchronize: the groupware user id the events are fetched
/// for and the display name their header column carries in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMapping {
    user_id: String,
    header_name: String,
}

impl UserMapping {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn header_name(&self) -> &str {
        &self.header_name
    }
}

/// All configured people, loaded once per run from a CSV source with a
/// `user_id,header_name` header line.
#[derive(Debug, Clone)]
pub struct UserMap {
    mappings: Vec<UserMapping>,
}

impl UserMap {
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, MappingError> {
        let path = path.as_ref();
        let map = Self::from_csv_reader(csv::ReaderBuilder::new().flexible(true).from_path(path)?)?;
        info!("loaded {} user mappings from {}", map.len(), path.display());
        Ok(map)
    }

    pub fn from_csv_reader<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, MappingError> {
        let mut mappings = Vec::new();

        for record in reader.records() {
            let record = record?;

            if record.len() != 2 {
                return Err(MappingError::ColumnCount {
                    line: record.position().map(|p| p.line()).unwrap_or_default(),
                    found: record.len(),
                });
            }

            mappings.push(UserMapping {
                user_id: record[0].to_string(),
                header_name: record[1].to_string(),
            });
        }

        Ok(Self { mappings })
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserMapping> {
        self.mappings.iter()
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
