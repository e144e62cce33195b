mod client;
pub use client::*;
mod event;
pub use event::*;
