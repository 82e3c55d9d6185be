//! SRS timesheet export engine.
//!
//! This crate patches a day's timesheet records into a fixed-layout
//! spreadsheet template: it finds the date's row block, clears it, and
//! writes each record's times, computed hours, leave, and notes into the
//! columns its sheet type and contract select.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod sheet;
pub mod transport;
