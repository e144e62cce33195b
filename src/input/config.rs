use std::fs;
use std::path::Path;

use anyhow::Context as _;
use serde::Deserialize;

use crate::input::{SheetMap, UserMap};

/// Everything a run needs, constructed once at process start and passed by
/// reference from there on. Nothing below this layer reads ambient state.
#[derive(Debug)]
pub struct Config {
    garoon: GaroonConfig,
    spreadsheet: SpreadsheetConfig,
    grid: GridConfig,
    sheet_map: SheetMap,
    user_map: UserMap,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GaroonConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpreadsheetConfig {
    pub id: String,
    pub access_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GridConfig {
    /// 1-based row holding the person display names.
    pub header_row: usize,
    /// Letter label of the column holding the day-of-month markers.
    pub date_column: String,
    /// Event menu labels that classify a whole day as weekly rest.
    #[serde(default)]
    pub holiday_menus: Vec<String>,
    /// Event menu labels that classify a day as out (外出, 出張, ...).
    #[serde(default)]
    pub outing_menus: Vec<String>,
    /// The label written on ordinary attendance days.
    #[serde(default = "default_normal_place")]
    pub normal_place: String,
}

fn default_normal_place() -> String {
    "渋谷".to_string()
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    garoon: GaroonConfig,
    spreadsheet: SpreadsheetConfig,
    grid: GridConfig,
    mappings: MappingPaths,
}

#[derive(Debug, Deserialize)]
struct MappingPaths {
    sheets: String,
    users: String,
}

impl Config {
    /// Loads the TOML configuration file and eagerly materializes the CSV
    /// mapping tables referenced by it (paths are resolved relative to the
    /// configuration file's directory).
    pub fn from_toml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        let file: ConfigFile = toml::from_str(&text)
            .with_context(|| format!("failed to parse `{}`", path.display()))?;

        if file.grid.header_row == 0 {
            anyhow::bail!("grid.header_row must be at least 1");
        }

        if file.grid.date_column.is_empty()
            || !file.grid.date_column.chars().all(|c| c.is_ascii_uppercase())
        {
            anyhow::bail!(
                "grid.date_column must be a column letter, got \"{}\"",
                file.grid.date_column
            );
        }

        let config_dir = path.parent().unwrap_or_else(|| Path::new("."));

        let sheet_map = SheetMap::from_csv_path(config_dir.join(&file.mappings.sheets))
            .with_context(|| format!("failed to load sheet mapping `{}`", file.mappings.sheets))?;
        let user_map = UserMap::from_csv_path(config_dir.join(&file.mappings.users))
            .with_context(|| format!("failed to load user mapping `{}`", file.mappings.users))?;

        Ok(Self {
            garoon: file.garoon,
            spreadsheet: file.spreadsheet,
            grid: file.grid,
            sheet_map,
            user_map,
        })
    }

    pub fn garoon(&self) -> &GaroonConfig {
        &self.garoon
    }

    pub fn spreadsheet(&self) -> &SpreadsheetConfig {
        &self.spreadsheet
    }

    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    pub fn sheet_map(&self) -> &SheetMap {
        &self.sheet_map
    }

    pub fn user_map(&self) -> &UserMap {
        &self.user_map
    }
}
