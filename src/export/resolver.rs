//! Column resolution functionality.
//!
//! Maps (sheet type, contract, leave type) to the destination columns of a
//! record. Resolution is a pure lookup into the injected [`TemplateLayout`].

use crate::config::{ColumnMapping, FIRST_EXTENDED_LEAVE_ID, TemplateLayout};
use crate::error::{ExportError, ExportResult};
use crate::models::{MAX_LEAVE_TYPE_ID, SheetType};
use crate::sheet::ColumnRef;

/// Where a record's leave hours go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveTarget {
    /// Leave type 0; nothing to write.
    NoLeave,
    /// The leave column.
    Column(ColumnRef),
    /// The layout has no column for this leave type.
    Unmapped,
}

/// Destination columns for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordColumns {
    /// Shift start column.
    pub start: ColumnRef,
    /// Shift end column.
    pub end: ColumnRef,
    /// Lunch duration column.
    pub lunch: ColumnRef,
    /// Total-hours column.
    pub total_hours: ColumnRef,
    /// Leave-hours column.
    pub leave: LeaveTarget,
}

/// Resolves destination columns against a template layout.
///
/// # Example
///
/// ```
/// use srs_export::config::TemplateLayout;
/// use srs_export::export::ColumnResolver;
/// use srs_export::models::SheetType;
///
/// let layout = TemplateLayout::standard().unwrap();
/// let resolver = ColumnResolver::new(&layout);
///
/// let leave = resolver.resolve_leave_column(SheetType::Type2, 1, 3).unwrap();
/// assert_eq!(leave.unwrap().to_string(), "Q");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ColumnResolver<'a> {
    layout: &'a TemplateLayout,
}

impl<'a> ColumnResolver<'a> {
    /// Creates a resolver over a layout.
    pub fn new(layout: &'a TemplateLayout) -> Self {
        Self { layout }
    }

    /// Returns the column mapping for a (sheet type, contract) pair.
    ///
    /// Fails with `MissingLayout` if the layout has no such pair.
    pub fn mapping(&self, sheet_type: SheetType, contract: u8) -> ExportResult<&'a ColumnMapping> {
        self.layout
            .column_mapping(sheet_type, contract)
            .ok_or(ExportError::MissingLayout {
                sheet_type: sheet_type.number(),
                contract,
            })
    }

    /// Resolves every destination column for a record.
    ///
    /// A missing leave column does not fail the resolution; it comes back
    /// as [`LeaveTarget::Unmapped`] so the other fields can still be
    /// written.
    pub fn resolve_columns(
        &self,
        sheet_type: SheetType,
        contract: u8,
        leave_type_id: u8,
    ) -> ExportResult<RecordColumns> {
        let mapping = self.mapping(sheet_type, contract)?;
        let leave = match leave_column(mapping, sheet_type, leave_type_id) {
            Ok(Some(column)) => LeaveTarget::Column(column),
            Ok(None) => LeaveTarget::NoLeave,
            Err(_) => LeaveTarget::Unmapped,
        };

        Ok(RecordColumns {
            start: mapping.start,
            end: mapping.end,
            lunch: mapping.lunch,
            total_hours: mapping.total_hours,
            leave,
        })
    }

    /// Resolves the leave-hours column for a leave type.
    ///
    /// # Returns
    ///
    /// - `Ok(None)` for leave type 0
    /// - the contract's `leave_1`/`leave_2` column for types 1 and 2
    /// - entry `leave_type_id - 3` of the extended band for types 3..=19
    /// - `MissingLeaveColumn` if the band is too short or the id is above 19
    /// - `MissingLayout` if the (type, contract) pair is unknown
    pub fn resolve_leave_column(
        &self,
        sheet_type: SheetType,
        contract: u8,
        leave_type_id: u8,
    ) -> ExportResult<Option<ColumnRef>> {
        let mapping = self.mapping(sheet_type, contract)?;
        leave_column(mapping, sheet_type, leave_type_id)
    }
}

fn leave_column(
    mapping: &ColumnMapping,
    sheet_type: SheetType,
    leave_type_id: u8,
) -> ExportResult<Option<ColumnRef>> {
    let missing = || ExportError::MissingLeaveColumn {
        sheet_type: sheet_type.number(),
        contract: mapping.contract,
        leave_type_id,
    };

    match leave_type_id {
        0 => Ok(None),
        1 => Ok(Some(mapping.leave_1)),
        2 => Ok(Some(mapping.leave_2)),
        id if (FIRST_EXTENDED_LEAVE_ID..=MAX_LEAVE_TYPE_ID).contains(&id) => mapping
            .extended_leave
            .get(usize::from(id - FIRST_EXTENDED_LEAVE_ID))
            .copied()
            .map(Some)
            .ok_or_else(missing),
        _ => Err(missing()),
    }
}
