//! Configuration types for the timesheet template.
//!
//! This module contains the strongly-typed layout structures that are
//! deserialized from the YAML files describing the template.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, ExportResult};
use crate::models::{MAX_LEAVE_TYPE_ID, SheetType};
use crate::sheet::ColumnRef;

/// First leave type id stored in the extended-leave band.
pub const FIRST_EXTENDED_LEAVE_ID: u8 = 3;

/// Number of slots in an extended-leave band (ids 3..=19).
pub const EXTENDED_LEAVE_SLOTS: usize = (MAX_LEAVE_TYPE_ID - FIRST_EXTENDED_LEAVE_ID + 1) as usize;

/// Fixed conventions of the template, from `template.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSettings {
    /// Name of the worksheet holding the timesheet.
    pub sheet_name: String,
    /// Column searched for the target date.
    pub date_column: ColumnRef,
    /// First row of the date search range (1-based).
    pub search_first_row: u32,
    /// Last row of the date search range (1-based, inclusive).
    pub search_last_row: u32,
    /// How many columns, starting at `A`, are swept for stale notes.
    pub comment_sweep_columns: u32,
    /// strftime pattern the template's date cells are displayed with.
    pub date_format: String,
}

impl TemplateSettings {
    /// Formats a date the way the template displays it.
    ///
    /// # Example
    ///
    /// ```
    /// use srs_export::config::TemplateLayout;
    /// use chrono::NaiveDate;
    ///
    /// let layout = TemplateLayout::standard().unwrap();
    /// let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
    /// assert_eq!(layout.settings().format_date(date), "05/01/2026");
    /// ```
    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format(&self.date_format).to_string()
    }

    fn validate(&self) -> ExportResult<()> {
        if self.sheet_name.trim().is_empty() {
            return Err(invalid("sheet_name is empty"));
        }
        if self.search_first_row == 0 || self.search_first_row > self.search_last_row {
            return Err(invalid(format!(
                "search rows {}..={} are not a valid range",
                self.search_first_row, self.search_last_row
            )));
        }
        if self.comment_sweep_columns == 0 {
            return Err(invalid("comment_sweep_columns must be at least 1"));
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(invalid(format!(
                "date_format '{}' is not a valid pattern",
                self.date_format
            )));
        }
        Ok(())
    }
}

/// Destination columns for one (sheet type, contract) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// Contract number this mapping applies to.
    pub contract: u8,
    /// Shift start column.
    pub start: ColumnRef,
    /// Shift end column.
    pub end: ColumnRef,
    /// Lunch duration column.
    pub lunch: ColumnRef,
    /// Computed total-hours column.
    pub total_hours: ColumnRef,
    /// Column for leave type 1.
    pub leave_1: ColumnRef,
    /// Column for leave type 2.
    pub leave_2: ColumnRef,
    /// Columns for leave types 3..=19; entry `i` is leave type `i + 3`.
    pub extended_leave: Vec<ColumnRef>,
}

/// Everything the template fixes for one sheet type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetLayout {
    /// The sheet type.
    pub sheet_type: SheetType,
    /// Height of the row block, i.e. the most records one date can hold.
    pub max_rows: usize,
    /// Columns blanked across the row block before writing.
    pub clear_columns: Vec<ColumnRef>,
    /// Column mappings, one per contract.
    pub contracts: Vec<ColumnMapping>,
}

impl SheetLayout {
    /// Returns the mapping for a contract.
    pub fn mapping(&self, contract: u8) -> Option<&ColumnMapping> {
        self.contracts.iter().find(|m| m.contract == contract)
    }

    fn validate(&self) -> ExportResult<()> {
        if self.max_rows == 0 {
            return Err(invalid(format!(
                "sheet type {} has max_rows 0",
                self.sheet_type
            )));
        }
        if self.contracts.is_empty() {
            return Err(invalid(format!(
                "sheet type {} has no contract mappings",
                self.sheet_type
            )));
        }
        let mut seen = BTreeSet::new();
        for mapping in &self.contracts {
            if !seen.insert(mapping.contract) {
                return Err(invalid(format!(
                    "sheet type {} maps contract {} twice",
                    self.sheet_type, mapping.contract
                )));
            }
            if mapping.extended_leave.len() > EXTENDED_LEAVE_SLOTS {
                return Err(invalid(format!(
                    "sheet type {} contract {} lists {} extended leave columns, at most {} allowed",
                    self.sheet_type,
                    mapping.contract,
                    mapping.extended_leave.len(),
                    EXTENDED_LEAVE_SLOTS
                )));
            }
        }
        Ok(())
    }
}

/// The `columns.yaml` file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnsConfig {
    /// One entry per sheet type.
    pub layouts: Vec<SheetLayout>,
}

/// The complete, validated template description.
///
/// Passed by reference into the resolver and cleaner; nothing in the
/// engine reaches for layout data any other way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateLayout {
    settings: TemplateSettings,
    layouts: BTreeMap<SheetType, SheetLayout>,
}

impl TemplateLayout {
    /// Builds a layout from its parts, validating it.
    pub fn new(settings: TemplateSettings, layouts: Vec<SheetLayout>) -> ExportResult<Self> {
        settings.validate()?;
        let mut by_type = BTreeMap::new();
        for layout in layouts {
            layout.validate()?;
            let sheet_type = layout.sheet_type;
            if by_type.insert(sheet_type, layout).is_some() {
                return Err(invalid(format!("sheet type {} is defined twice", sheet_type)));
            }
        }
        Ok(Self {
            settings,
            layouts: by_type,
        })
    }

    /// Returns the template settings.
    pub fn settings(&self) -> &TemplateSettings {
        &self.settings
    }

    /// Returns the layout for a sheet type.
    pub fn sheet_layout(&self, sheet_type: SheetType) -> Option<&SheetLayout> {
        self.layouts.get(&sheet_type)
    }

    /// Returns the column mapping for a (sheet type, contract) pair.
    pub fn column_mapping(&self, sheet_type: SheetType, contract: u8) -> Option<&ColumnMapping> {
        self.sheet_layout(sheet_type)?.mapping(contract)
    }
}

fn invalid(message: impl Into<String>) -> ExportError {
    ExportError::InvalidLayout {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(letters: &str) -> ColumnRef {
        ColumnRef::parse(letters).unwrap()
    }

    fn settings() -> TemplateSettings {
        TemplateSettings {
            sheet_name: "Timesheet".to_string(),
            date_column: col("A"),
            search_first_row: 1,
            search_last_row: 100,
            comment_sweep_columns: 20,
            date_format: "%d/%m/%Y".to_string(),
        }
    }

    fn mapping(contract: u8) -> ColumnMapping {
        ColumnMapping {
            contract,
            start: col("C"),
            end: col("D"),
            lunch: col("E"),
            total_hours: col("F"),
            leave_1: col("G"),
            leave_2: col("H"),
            extended_leave: vec![col("I"), col("J")],
        }
    }

    fn layout(sheet_type: SheetType) -> SheetLayout {
        SheetLayout {
            sheet_type,
            max_rows: 2,
            clear_columns: vec![col("C"), col("D")],
            contracts: vec![mapping(1), mapping(2)],
        }
    }

    #[test]
    fn test_extended_slots_cover_ids_3_to_19() {
        assert_eq!(EXTENDED_LEAVE_SLOTS, 17);
    }

    #[test]
    fn test_valid_layout_lookup() {
        let template = TemplateLayout::new(settings(), vec![layout(SheetType::Type2)]).unwrap();

        assert_eq!(
            template.column_mapping(SheetType::Type2, 2).unwrap().contract,
            2
        );
        assert!(template.column_mapping(SheetType::Type2, 3).is_none());
        assert!(template.sheet_layout(SheetType::Type3).is_none());
    }

    #[test]
    fn test_duplicate_sheet_type_rejected() {
        let result = TemplateLayout::new(
            settings(),
            vec![layout(SheetType::Type2), layout(SheetType::Type2)],
        );
        assert!(matches!(result, Err(ExportError::InvalidLayout { .. })));
    }

    #[test]
    fn test_duplicate_contract_rejected() {
        let mut bad = layout(SheetType::Type2);
        bad.contracts.push(mapping(1));
        assert!(TemplateLayout::new(settings(), vec![bad]).is_err());
    }

    #[test]
    fn test_zero_max_rows_rejected() {
        let mut bad = layout(SheetType::Type3);
        bad.max_rows = 0;
        assert!(TemplateLayout::new(settings(), vec![bad]).is_err());
    }

    #[test]
    fn test_oversized_band_rejected() {
        let mut bad = layout(SheetType::Type2);
        bad.contracts[0].extended_leave = vec![col("Q"); 18];
        assert!(TemplateLayout::new(settings(), vec![bad]).is_err());
    }

    #[test]
    fn test_bad_search_range_rejected() {
        let mut bad = settings();
        bad.search_first_row = 50;
        bad.search_last_row = 10;
        assert!(TemplateLayout::new(bad, vec![]).is_err());
    }

    #[test]
    fn test_bad_date_format_rejected() {
        let mut bad = settings();
        bad.date_format = "%Q".to_string();
        assert!(TemplateLayout::new(bad, vec![]).is_err());
    }

    #[test]
    fn test_format_date_uses_pattern() {
        let mut iso = settings();
        iso.date_format = "%Y-%m-%d".to_string();
        let date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        assert_eq!(iso.format_date(date), "2026-03-09");
        assert_eq!(settings().format_date(date), "09/03/2026");
    }
}
