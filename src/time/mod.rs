mod calendar_month;
pub use calendar_month::*;
mod date;
pub use date::*;
mod month;
pub use month::*;
mod year;
pub use year::*;
