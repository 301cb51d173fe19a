// src/lib.rs

#[macro_use]
pub mod macros;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod feed;
pub mod specs;

pub mod log;
pub mod model;
pub mod progress;
pub mod runner;
pub mod scrape;
pub mod store;

pub use error::{Error, FeedError, MarkerError, Result};
pub use model::{CoordinatePoint, Nation, ShapePoint, SummaryReport, Territory};
