mod config;
pub use config::*;
mod sheet_map;
pub use sheet_map::*;
mod user_map;
pub use user_map::*;
