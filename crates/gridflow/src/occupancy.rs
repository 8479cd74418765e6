//! First-fit slot search over a set of placed items.

use crate::item::{GridArea, Item};
use serde::Serialize;

/// Top-left cell of a free region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub start_column: u32,
    pub start_row: u32,
}

/// Read-only view over placed items, used to answer "where does the next item go".
#[derive(Debug, Clone, Copy)]
pub struct Occupancy<'a> {
    items: &'a [Item],
    slice_width: f64,
    last_filled_column: u32,
    last_filled_row: u32,
}

impl<'a> Occupancy<'a> {
    pub fn new(items: &'a [Item], slice_width: f64) -> Self {
        let (last_filled_column, last_filled_row) = last_filled(items);
        Self {
            items,
            slice_width,
            last_filled_column,
            last_filled_row,
        }
    }

    /// `(last_filled_column, last_filled_row)`.
    pub fn last_filled(&self) -> (u32, u32) {
        (self.last_filled_column, self.last_filled_row)
    }

    /// Largest end column over all items, 0 when empty.
    pub fn last_filled_column(&self) -> u32 {
        self.last_filled_column
    }

    /// Largest end row over all items, 0 when empty.
    pub fn last_filled_row(&self) -> u32 {
        self.last_filled_row
    }

    /// Whole slices that fit in `available_width`, never less than one.
    pub fn visible_columns(&self, available_width: f64) -> u32 {
        let visible = (available_width / self.slice_width).floor();
        if !visible.is_finite() || visible < 1.0 {
            return 1;
        }
        if visible >= f64::from(u32::MAX) {
            return u32::MAX;
        }
        visible as u32
    }

    pub fn is_free(&self, area: &GridArea) -> bool {
        self.items.iter().all(|item| !item.area().overlaps(area))
    }

    /// Row-major first fit: rows from 1 downwards, columns `1..=visible_columns` within a row.
    ///
    /// The row after `last_filled_row` is empty, so the scan always stops there at the latest.
    /// Likewise any start past `last_filled_column` is free, so columns beyond it are not tried.
    pub fn next_slot(&self, available_width: f64, filled_columns: u32, filled_rows: u32) -> Slot {
        let visible_columns = self.visible_columns(available_width);
        let last_column = visible_columns.min(self.last_filled_column.saturating_add(1));
        let filled_columns = filled_columns.max(1);
        let filled_rows = filled_rows.max(1);
        let last_row = self.last_filled_row.saturating_add(1);

        for start_row in 1..=last_row {
            for start_column in 1..=last_column {
                let candidate = GridArea::new(start_column, start_row, filled_columns, filled_rows);
                if self.is_free(&candidate) {
                    tracing::trace!(start_column, start_row, "slot found");
                    return Slot {
                        start_column,
                        start_row,
                    };
                }
            }
        }

        Slot {
            start_column: 1,
            start_row: last_row,
        }
    }
}

pub(crate) fn last_filled(items: &[Item]) -> (u32, u32) {
    items.iter().fold((0, 0), |(column, row), item| {
        (column.max(item.end_column()), row.max(item.end_row()))
    })
}
