//! Core entry point for the pme_diagnostic crate.
//!
//! The crate turns one uploaded product dataset (CSV or XLSX) into key
//! business indicators, canned recommendations, a revenue-per-product bar
//! chart and a single-page PDF report. [`pipeline::run`] sequences the
//! whole flow.

pub mod advice;
pub mod builder;
pub mod chart;
pub mod elements;
pub mod error;
pub mod fonts;
pub mod ingest;
pub mod metrics;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod template;
