//! Configuration loading functionality.
//!
//! This module provides the [`LayoutLoader`] type for loading the template
//! layout from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{ExportError, ExportResult};

use super::types::{ColumnsConfig, TemplateLayout, TemplateSettings};

const STANDARD_TEMPLATE_YAML: &str = include_str!("../../config/srs_template/template.yaml");
const STANDARD_COLUMNS_YAML: &str = include_str!("../../config/srs_template/columns.yaml");

/// Loads and provides access to the template layout.
///
/// # Directory Structure
///
/// ```text
/// config/srs_template/
/// ├── template.yaml   # Sheet name, date search range, date format
/// └── columns.yaml    # Column mappings and clearing sets per sheet type
/// ```
///
/// # Example
///
/// ```no_run
/// use srs_export::config::LayoutLoader;
/// use srs_export::models::SheetType;
///
/// let loader = LayoutLoader::load("./config/srs_template").unwrap();
/// let mapping = loader.layout().column_mapping(SheetType::Type2, 1).unwrap();
/// println!("Start times go to column {}", mapping.start);
/// ```
#[derive(Debug, Clone)]
pub struct LayoutLoader {
    layout: TemplateLayout,
}

impl LayoutLoader {
    /// Loads the layout from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `LayoutLoader` on success, or an error if:
    /// - Either file is missing (`ConfigNotFound`)
    /// - Either file contains invalid YAML or unknown values (`ConfigParseError`)
    /// - The layout is inconsistent (`InvalidLayout`)
    pub fn load<P: AsRef<Path>>(path: P) -> ExportResult<Self> {
        let path = path.as_ref();

        let template_path = path.join("template.yaml");
        let template_yaml = Self::read_file(&template_path)?;

        let columns_path = path.join("columns.yaml");
        let columns_yaml = Self::read_file(&columns_path)?;

        let layout = Self::parse(
            &template_yaml,
            &template_path.display().to_string(),
            &columns_yaml,
            &columns_path.display().to_string(),
        )?;

        Ok(Self { layout })
    }

    /// Returns the loaded layout.
    pub fn layout(&self) -> &TemplateLayout {
        &self.layout
    }

    /// Consumes the loader, returning the layout.
    pub fn into_layout(self) -> TemplateLayout {
        self.layout
    }

    fn read_file(path: &Path) -> ExportResult<String> {
        fs::read_to_string(path).map_err(|_| ExportError::ConfigNotFound {
            path: path.display().to_string(),
        })
    }

    fn parse(
        template_yaml: &str,
        template_label: &str,
        columns_yaml: &str,
        columns_label: &str,
    ) -> ExportResult<TemplateLayout> {
        let settings: TemplateSettings = Self::parse_yaml(template_yaml, template_label)?;
        let columns: ColumnsConfig = Self::parse_yaml(columns_yaml, columns_label)?;
        TemplateLayout::new(settings, columns.layouts)
    }

    fn parse_yaml<T: serde::de::DeserializeOwned>(content: &str, label: &str) -> ExportResult<T> {
        serde_yaml::from_str(content).map_err(|e| ExportError::ConfigParseError {
            path: label.to_string(),
            message: e.to_string(),
        })
    }
}

impl TemplateLayout {
    /// The layout of the standard SRS template, as shipped in
    /// `config/srs_template`.
    pub fn standard() -> ExportResult<Self> {
        LayoutLoader::parse(
            STANDARD_TEMPLATE_YAML,
            "<builtin>/template.yaml",
            STANDARD_COLUMNS_YAML,
            "<builtin>/columns.yaml",
        )
    }
}
