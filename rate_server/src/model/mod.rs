//! Domain models for the rate feed.
//!
//! - `price_book`: per-pair prices moved by a small random walk each tick.
//! - `session`: one client connection with its subscription and rate stream.

pub mod price_book;
pub mod session;
