//! Grid items: immutable rectangles on a 1-based column/row grid.
//!
//! Coordinates are cell indices, not pixels. The pixel helpers (`calculate_*`) only exist so a
//! renderer can turn a cell rectangle into a box without knowing the grid formulas.

use crate::error::{Error, Field, Result, ensure_positive_count};
use serde::Serialize;
use serde_json::Value;

/// Id-less cell rectangle. `end_*` are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridArea {
    pub start_column: u32,
    pub start_row: u32,
    pub filled_columns: u32,
    pub filled_rows: u32,
}

impl GridArea {
    pub fn new(start_column: u32, start_row: u32, filled_columns: u32, filled_rows: u32) -> Self {
        Self {
            start_column,
            start_row,
            filled_columns,
            filled_rows,
        }
    }

    pub fn end_column(&self) -> u32 {
        inclusive_end(self.start_column, self.filled_columns)
    }

    pub fn end_row(&self) -> u32 {
        inclusive_end(self.start_row, self.filled_rows)
    }

    /// Closed-interval overlap on both axes. Areas that only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &GridArea) -> bool {
        self.start_column <= other.end_column()
            && other.start_column <= self.end_column()
            && self.start_row <= other.end_row()
            && other.start_row <= self.end_row()
    }
}

fn inclusive_end(start: u32, filled: u32) -> u32 {
    start.saturating_add(filled).saturating_sub(1)
}

/// `start + filled - 1`, or `None` when that is not a valid cell index.
fn checked_end(start: u32, filled: u32) -> Option<u32> {
    start.checked_add(filled.checked_sub(1)?)
}

/// Input for [`Item::create`].
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSpec {
    pub id: String,
    pub is_fixed: bool,
    pub start_column: u32,
    pub start_row: u32,
    pub filled_columns: u32,
    pub filled_rows: u32,
    pub min_filled_columns: u32,
    pub min_filled_rows: u32,
    /// `None` means unbounded.
    pub max_filled_columns: Option<u32>,
    /// `None` means unbounded.
    pub max_filled_rows: Option<u32>,
    pub metadata: Option<Value>,
}

impl Default for ItemSpec {
    fn default() -> Self {
        Self {
            id: String::new(),
            is_fixed: false,
            start_column: 1,
            start_row: 1,
            filled_columns: 1,
            filled_rows: 1,
            min_filled_columns: 1,
            min_filled_rows: 1,
            max_filled_columns: None,
            max_filled_rows: None,
            metadata: None,
        }
    }
}

impl ItemSpec {
    pub fn new(
        id: impl Into<String>,
        start_column: u32,
        start_row: u32,
        filled_columns: u32,
        filled_rows: u32,
    ) -> Self {
        Self {
            id: id.into(),
            start_column,
            start_row,
            filled_columns,
            filled_rows,
            ..Default::default()
        }
    }
}

/// A placed rectangle. Immutable: every change produces a new `Item`.
///
/// `is_fixed` and the min/max bounds are carried for callers; the layout consults the bounds when
/// resizing but never looks at `is_fixed`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    id: String,
    is_fixed: bool,
    start_column: u32,
    end_column: u32,
    start_row: u32,
    end_row: u32,
    filled_columns: u32,
    filled_rows: u32,
    min_filled_columns: u32,
    min_filled_rows: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_filled_columns: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_filled_rows: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<Value>,
}

impl Item {
    pub fn create(spec: ItemSpec) -> Result<Self> {
        if spec.id.trim().is_empty() {
            return Err(Error::invalid(Field::ItemId));
        }
        ensure_positive_count(spec.start_column, Field::ItemStartColumn)?;
        ensure_positive_count(spec.start_row, Field::ItemStartRow)?;
        ensure_positive_count(spec.filled_columns, Field::ItemFilledColumns)?;
        ensure_positive_count(spec.filled_rows, Field::ItemFilledRows)?;
        ensure_positive_count(spec.min_filled_columns, Field::ItemMinFilledColumns)?;
        ensure_positive_count(spec.min_filled_rows, Field::ItemMinFilledRows)?;
        if let Some(max) = spec.max_filled_columns {
            ensure_positive_count(max, Field::ItemMaxFilledColumns)?;
        }
        if let Some(max) = spec.max_filled_rows {
            ensure_positive_count(max, Field::ItemMaxFilledRows)?;
        }

        let end_column = checked_end(spec.start_column, spec.filled_columns)
            .ok_or(Error::invalid(Field::ItemFilledColumns))?;
        let end_row = checked_end(spec.start_row, spec.filled_rows)
            .ok_or(Error::invalid(Field::ItemFilledRows))?;

        Ok(Self {
            end_column,
            end_row,
            id: spec.id,
            is_fixed: spec.is_fixed,
            start_column: spec.start_column,
            start_row: spec.start_row,
            filled_columns: spec.filled_columns,
            filled_rows: spec.filled_rows,
            min_filled_columns: spec.min_filled_columns,
            min_filled_rows: spec.min_filled_rows,
            max_filled_columns: spec.max_filled_columns,
            max_filled_rows: spec.max_filled_rows,
            metadata: spec.metadata,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_fixed(&self) -> bool {
        self.is_fixed
    }

    pub fn start_column(&self) -> u32 {
        self.start_column
    }

    pub fn end_column(&self) -> u32 {
        self.end_column
    }

    pub fn start_row(&self) -> u32 {
        self.start_row
    }

    pub fn end_row(&self) -> u32 {
        self.end_row
    }

    pub fn filled_columns(&self) -> u32 {
        self.filled_columns
    }

    pub fn filled_rows(&self) -> u32 {
        self.filled_rows
    }

    pub fn min_filled_columns(&self) -> u32 {
        self.min_filled_columns
    }

    pub fn min_filled_rows(&self) -> u32 {
        self.min_filled_rows
    }

    pub fn max_filled_columns(&self) -> Option<u32> {
        self.max_filled_columns
    }

    pub fn max_filled_rows(&self) -> Option<u32> {
        self.max_filled_rows
    }

    pub fn metadata(&self) -> Option<&Value> {
        self.metadata.as_ref()
    }

    pub fn area(&self) -> GridArea {
        GridArea::new(
            self.start_column,
            self.start_row,
            self.filled_columns,
            self.filled_rows,
        )
    }

    /// Box height in pixels, including the gaps between the item's own rows.
    pub fn calculate_height(&self, slice_height: f64, gap: f64) -> f64 {
        f64::from(self.filled_rows) * (slice_height + gap) - gap
    }

    /// Box width in pixels, including the gaps between the item's own columns.
    pub fn calculate_width(&self, slice_width: f64, gap: f64) -> f64 {
        f64::from(self.filled_columns) * (slice_width + gap) - gap
    }

    /// Left edge offset in pixels.
    pub fn calculate_x_axis(&self, slice_width: f64, gap: f64) -> f64 {
        f64::from(self.start_column - 1) * (slice_width + gap)
    }

    /// Top edge offset in pixels.
    pub fn calculate_y_axis(&self, slice_height: f64, gap: f64) -> f64 {
        f64::from(self.start_row - 1) * (slice_height + gap)
    }

    /// An item never collides with itself (same id), whatever its coordinates.
    pub fn has_collision(&self, other: &Item) -> bool {
        if other.id == self.id {
            return false;
        }
        self.area().overlaps(&other.area())
    }

    pub fn fits_bounds(&self, filled_columns: u32, filled_rows: u32) -> bool {
        filled_columns >= self.min_filled_columns
            && filled_rows >= self.min_filled_rows
            && self.max_filled_columns.is_none_or(|max| filled_columns <= max)
            && self.max_filled_rows.is_none_or(|max| filled_rows <= max)
    }

    /// Same item with its top-left corner at `(start_column, start_row)`. Both must be >= 1.
    /// `None` when the far edge would not fit in a `u32`.
    pub(crate) fn moved_to(&self, start_column: u32, start_row: u32) -> Option<Self> {
        debug_assert!(start_column >= 1 && start_row >= 1);
        Some(Self {
            start_column,
            start_row,
            end_column: checked_end(start_column, self.filled_columns)?,
            end_row: checked_end(start_row, self.filled_rows)?,
            ..self.clone()
        })
    }

    /// Same item spanning `filled_columns × filled_rows`. Both must be >= 1.
    /// `None` when the far edge would not fit in a `u32`.
    pub(crate) fn resized_to(&self, filled_columns: u32, filled_rows: u32) -> Option<Self> {
        debug_assert!(filled_columns >= 1 && filled_rows >= 1);
        Some(Self {
            filled_columns,
            filled_rows,
            end_column: checked_end(self.start_column, filled_columns)?,
            end_row: checked_end(self.start_row, filled_rows)?,
            ..self.clone()
        })
    }
}
