//! Typed purchase-order reader.
//!
//! Parses purchase-order XML into borrowed, typed records and renders them as a
//! report. Layers, innermost first: `domain` (records, field access, loading),
//! `application` (report rendering, order service), `infrastructure`
//! (filesystem boundary, service wiring), `cli`.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
