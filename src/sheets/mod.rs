mod cell;
pub use cell::*;
mod client;
pub use client::*;
mod store;
pub use store::*;
