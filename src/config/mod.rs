//! Configuration loading and management for the SRS export engine.
//!
//! This module loads the template layout from YAML files: the worksheet
//! conventions and the per-type column tables.
//!
//! # Example
//!
//! ```no_run
//! use srs_export::config::LayoutLoader;
//!
//! let loader = LayoutLoader::load("./config/srs_template").unwrap();
//! println!("Template sheet: {}", loader.layout().settings().sheet_name);
//! ```

mod loader;
mod types;

pub use loader::LayoutLoader;
pub use types::{
    ColumnMapping, ColumnsConfig, EXTENDED_LEAVE_SLOTS, FIRST_EXTENDED_LEAVE_ID, SheetLayout,
    TemplateLayout, TemplateSettings,
};
