// src/specs/mod.rs
//! # Extraction "specs"
//!
//! Knows **how to read** what the map service sends. A spec takes one piece of
//! service output (today: the HTML `detail` popup of a Lands marker) and turns
//! it into plain fields.
//!
//! ## What lives here
//! - **Pure text extraction**: markup stripping via `core::html`, then a fixed,
//!   ordered table of `(label, pattern, target)` rules.
//! - **Section scoping**: the popup repeats labels (`Level:`) for the territory
//!   and its nation; each rule table only sees its own section.
//!
//! ## What does **not** live here
//! - Feed decoding (`feed`), building records (`scrape::territory`), or any
//!   merging across markers (`scrape::aggregate`).
//! - Logging. A missing label is normal and yields `None`.
//!
//! ## Testing notes
//! Specs are pure functions of a string; test them against captured popups.
pub mod detail;

pub use detail::{parse_detail, DetailFields};
