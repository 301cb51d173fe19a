// src/scrape/mod.rs
pub mod aggregate;
pub mod summary;
pub mod territory;

pub use aggregate::{ingest, Aggregate, IngestContext};
pub use summary::summarize;
pub use territory::build_territory;
