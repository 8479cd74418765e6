//! The layout aggregate: grid parameters plus a collision-free set of items.
//!
//! A [`Layout`] is a plain value. Every operation borrows it and returns a new `Layout`; an
//! operation that cannot apply (move off the grid, resize into a neighbour, unknown id) returns a
//! value equal to the input, so callers detect "no effect" with `==`.

mod collisions;
mod snapshot;

pub use collisions::Direction;
pub use snapshot::{ItemBox, LayoutSnapshot};

use crate::error::{Field, Result, ensure_positive_count, ensure_positive_length};
use crate::item::{Item, ItemSpec};
use crate::occupancy::{Occupancy, Slot, last_filled};
use serde_json::Value;

/// Free cells kept past the last occupied column/row of a growing grid.
const GROWTH_BUFFER: u32 = 3;

/// Pixel width of a slice.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SliceWidth {
    /// Explicit width. Pins the column count at `total_columns`.
    Provided(f64),
    /// Fit `total_columns` slices into `available_width`. The column count then grows with content.
    #[default]
    Derive,
}

/// Where [`Layout::add_item`] puts a new item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// Trusted coordinates; no collision check.
    At { column: u32, row: u32 },
    /// First free slot, see [`Occupancy::next_slot`].
    #[default]
    Auto,
}

impl Placement {
    pub fn from_coordinates(column: Option<u32>, row: Option<u32>) -> Self {
        match (column, row) {
            (Some(column), Some(row)) => Self::At { column, row },
            _ => Self::Auto,
        }
    }

    pub fn is_explicit(&self) -> bool {
        matches!(self, Self::At { .. })
    }
}

/// An item descriptor before placement.
#[derive(Debug, Clone, PartialEq)]
pub struct RawItem {
    pub id: String,
    pub is_fixed: bool,
    pub placement: Placement,
    pub filled_columns: u32,
    pub filled_rows: u32,
    pub min_filled_columns: u32,
    pub min_filled_rows: u32,
    pub max_filled_columns: Option<u32>,
    pub max_filled_rows: Option<u32>,
    pub metadata: Option<Value>,
}

impl Default for RawItem {
    fn default() -> Self {
        Self {
            id: String::new(),
            is_fixed: false,
            placement: Placement::Auto,
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

impl RawItem {
    pub fn new(id: impl Into<String>, filled_columns: u32, filled_rows: u32) -> Self {
        Self {
            id: id.into(),
            filled_columns,
            filled_rows,
            ..Default::default()
        }
    }

    pub fn at(mut self, column: u32, row: u32) -> Self {
        self.placement = Placement::At { column, row };
        self
    }

    fn into_spec(self, slot: Slot) -> ItemSpec {
        ItemSpec {
            id: self.id,
            is_fixed: self.is_fixed,
            start_column: slot.start_column,
            start_row: slot.start_row,
            filled_columns: self.filled_columns,
            filled_rows: self.filled_rows,
            min_filled_columns: self.min_filled_columns,
            min_filled_rows: self.min_filled_rows,
            max_filled_columns: self.max_filled_columns,
            max_filled_rows: self.max_filled_rows,
            metadata: self.metadata,
        }
    }
}

/// Input for [`Layout::create`].
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutInput {
    pub slice_height: f64,
    pub slice_width: SliceWidth,
    pub gap: f64,
    /// Column count when the slice width is provided, minimum column count otherwise.
    pub total_columns: u32,
    /// Minimum row count; the grid always grows with content.
    pub total_rows: u32,
    pub available_width: f64,
    pub items: Vec<RawItem>,
}

/// One axis of a pointer drag, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerDelta {
    pub current_pointer: f64,
    pub last_pointer: f64,
    pub current_scroll: f64,
    pub last_scroll: f64,
}

impl PointerDelta {
    /// Pointer travel plus scroll travel.
    pub fn pixels(&self) -> f64 {
        (self.current_pointer - self.last_pointer) + (self.current_scroll - self.last_scroll)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    slice_height: f64,
    slice_width: f64,
    gap: f64,
    min_total_columns: u32,
    min_total_rows: u32,
    available_width: f64,
    is_total_columns_fixed: bool,
    items: Vec<Item>,
    last_filled_column: u32,
    last_filled_row: u32,
}

impl Layout {
    pub fn create(input: LayoutInput) -> Result<Self> {
        let LayoutInput {
            slice_height,
            slice_width,
            gap,
            total_columns,
            total_rows,
            available_width,
            items,
        } = input;

        ensure_positive_length(slice_height, Field::LayoutSliceHeight)?;
        if let SliceWidth::Provided(width) = slice_width {
            ensure_positive_length(width, Field::LayoutSliceWidth)?;
        }
        ensure_positive_length(gap, Field::LayoutGap)?;
        ensure_positive_count(total_columns, Field::LayoutTotalColumns)?;
        ensure_positive_count(total_rows, Field::LayoutTotalRows)?;
        ensure_positive_length(available_width, Field::LayoutAvailableWidth)?;

        let (slice_width, is_total_columns_fixed) = match slice_width {
            SliceWidth::Provided(width) => (width, true),
            SliceWidth::Derive => {
                let columns = f64::from(total_columns);
                let width = (available_width - columns * gap) / columns;
                ensure_positive_length(width, Field::LayoutSliceWidth)?;
                (width, false)
            }
        };

        let empty = Self::from_parts(
            slice_height,
            slice_width,
            gap,
            total_columns,
            total_rows,
            available_width,
            is_total_columns_fixed,
            Vec::new(),
        );

        // Explicitly positioned items first so auto-placement cannot take their cells.
        let (positioned, auto): (Vec<RawItem>, Vec<RawItem>) =
            items.into_iter().partition(|raw| raw.placement.is_explicit());
        positioned
            .into_iter()
            .chain(auto)
            .try_fold(empty, |layout, raw| layout.add_item(raw))
    }

    #[allow(clippy::too_many_arguments)]
    fn from_parts(
        slice_height: f64,
        slice_width: f64,
        gap: f64,
        min_total_columns: u32,
        min_total_rows: u32,
        available_width: f64,
        is_total_columns_fixed: bool,
        items: Vec<Item>,
    ) -> Self {
        let (last_filled_column, last_filled_row) = last_filled(&items);
        Self {
            slice_height,
            slice_width,
            gap,
            min_total_columns,
            min_total_rows,
            available_width,
            is_total_columns_fixed,
            items,
            last_filled_column,
            last_filled_row,
        }
    }

    fn with_items(&self, items: Vec<Item>) -> Self {
        Self::from_parts(
            self.slice_height,
            self.slice_width,
            self.gap,
            self.min_total_columns,
            self.min_total_rows,
            self.available_width,
            self.is_total_columns_fixed,
            items,
        )
    }

    pub fn slice_height(&self) -> f64 {
        self.slice_height
    }

    pub fn slice_width(&self) -> f64 {
        self.slice_width
    }

    pub fn gap(&self) -> f64 {
        self.gap
    }

    pub fn min_total_columns(&self) -> u32 {
        self.min_total_columns
    }

    pub fn min_total_rows(&self) -> u32 {
        self.min_total_rows
    }

    pub fn available_width(&self) -> f64 {
        self.available_width
    }

    pub fn is_total_columns_fixed(&self) -> bool {
        self.is_total_columns_fixed
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.item(id).is_some()
    }

    pub fn last_filled_column(&self) -> u32 {
        self.last_filled_column
    }

    pub fn last_filled_row(&self) -> u32 {
        self.last_filled_row
    }

    pub fn total_columns(&self) -> u32 {
        if self.is_total_columns_fixed {
            return self.min_total_columns;
        }
        self.last_filled_column
            .saturating_add(GROWTH_BUFFER)
            .max(self.min_total_columns)
    }

    pub fn total_rows(&self) -> u32 {
        self.last_filled_row
            .saturating_add(GROWTH_BUFFER)
            .max(self.min_total_rows)
    }

    /// Grid height in pixels, one trailing gap included.
    pub fn calculate_height(&self) -> f64 {
        (self.slice_height + self.gap) * f64::from(self.total_rows())
    }

    /// Grid width in pixels, one trailing gap included.
    pub fn calculate_width(&self) -> f64 {
        (self.slice_width + self.gap) * f64::from(self.total_columns())
    }

    /// Horizontal drag distance rounded to whole columns.
    pub fn calculate_columns_to_move(&self, delta: PointerDelta) -> i32 {
        grid_steps(delta.pixels(), self.slice_width + self.gap)
    }

    /// Vertical drag distance rounded to whole rows.
    pub fn calculate_rows_to_move(&self, delta: PointerDelta) -> i32 {
        grid_steps(delta.pixels(), self.slice_height + self.gap)
    }

    pub fn occupancy(&self) -> Occupancy<'_> {
        Occupancy::new(&self.items, self.slice_width)
    }

    /// First free slot for a `filled_columns × filled_rows` item, without inserting anything.
    pub fn available_slice(&self, filled_columns: u32, filled_rows: u32) -> Slot {
        self.occupancy()
            .next_slot(self.available_width, filled_columns, filled_rows)
    }

    /// Items that `item` overlaps. `item` itself (by id) is never reported.
    pub fn collisions_with<'a>(&'a self, item: &'a Item) -> impl Iterator<Item = &'a Item> + 'a {
        self.items.iter().filter(move |other| other.has_collision(item))
    }

    /// Whether any two items overlap.
    pub fn has_collisions(&self) -> bool {
        self.items
            .iter()
            .enumerate()
            .any(|(idx, item)| self.items[idx + 1..].iter().any(|other| item.has_collision(other)))
    }

    /// Adds an item, auto-placing it when it has no explicit coordinates.
    ///
    /// Returns the layout unchanged if the id is already present. The only error is the item's
    /// own validation (see [`Item::create`]).
    pub fn add_item(&self, raw: RawItem) -> Result<Self> {
        if self.contains(&raw.id) {
            tracing::debug!(item = %raw.id, "add ignored: id already present");
            return Ok(self.clone());
        }

        let slot = match raw.placement {
            Placement::At { column, row } => Slot {
                start_column: column,
                start_row: row,
            },
            Placement::Auto => self.available_slice(raw.filled_columns, raw.filled_rows),
        };
        let item = Item::create(raw.into_spec(slot))?;

        let mut items = self.items.clone();
        items.push(item);
        Ok(self.with_items(items))
    }

    pub fn remove_item(&self, id: &str) -> Self {
        let items = self
            .items
            .iter()
            .filter(|item| item.id() != id)
            .cloned()
            .collect();
        self.with_items(items)
    }

    /// Moves `item` by a signed number of columns and rows.
    ///
    /// Items in the way are displaced by [`Layout::resolve_collisions`]. The move is rejected
    /// (unchanged layout) when the new start falls before column/row 1, when the item would
    /// leave a pinned column count, when the id is unknown, or when some displaced item cannot
    /// find room.
    pub fn move_item(&self, item: &Item, columns_to_move: i32, rows_to_move: i32) -> Self {
        if !self.contains(item.id()) {
            tracing::debug!(item = %item.id(), "move rejected: unknown item");
            return self.clone();
        }

        let start_column = i64::from(item.start_column()) + i64::from(columns_to_move);
        let start_row = i64::from(item.start_row()) + i64::from(rows_to_move);
        let Some(moved) = self.placed_at(item, start_column, start_row) else {
            tracing::debug!(
                item = %item.id(),
                start_column,
                start_row,
                "move rejected: outside the grid"
            );
            return self.clone();
        };

        let collisions: Vec<Item> = self.collisions_with(&moved).cloned().collect();
        let next = self.replace_item(moved.clone());
        if collisions.is_empty() {
            return next;
        }

        let resolved = next.resolve_collisions(&moved, &collisions);
        let still_overlapping = std::iter::once(moved.id())
            .chain(collisions.iter().map(Item::id))
            .filter_map(|id| resolved.item(id))
            .any(|item| resolved.collisions_with(item).next().is_some());
        if still_overlapping {
            tracing::debug!(
                item = %moved.id(),
                collisions = collisions.len(),
                "move rejected: collisions could not be resolved"
            );
            return self.clone();
        }
        resolved
    }

    /// Resizes the item `id` in place (top-left corner fixed).
    ///
    /// Rejected when the size is zero or outside the item's min/max bounds, when the item would
    /// leave a pinned column count, or when it would overlap another item. Neighbours are never
    /// displaced.
    pub fn resize_item(&self, id: &str, filled_columns: u32, filled_rows: u32) -> Self {
        let Some(current) = self.item(id) else {
            tracing::debug!(item = %id, "resize rejected: unknown item");
            return self.clone();
        };
        if filled_columns == 0 || filled_rows == 0 || !current.fits_bounds(filled_columns, filled_rows)
        {
            tracing::debug!(item = %id, filled_columns, filled_rows, "resize rejected: size out of bounds");
            return self.clone();
        }

        let Some(resized) = current.resized_to(filled_columns, filled_rows) else {
            tracing::debug!(item = %id, filled_columns, filled_rows, "resize rejected: past the last cell");
            return self.clone();
        };
        if !self.fits_columns(&resized) {
            tracing::debug!(item = %id, "resize rejected: outside the pinned columns");
            return self.clone();
        }
        if self.collisions_with(&resized).next().is_some() {
            tracing::debug!(item = %id, "resize rejected: collision");
            return self.clone();
        }
        self.replace_item(resized)
    }

    /// `item` relocated to `(start_column, start_row)` if that position is on the grid.
    fn placed_at(&self, item: &Item, start_column: i64, start_row: i64) -> Option<Item> {
        let start_column = u32::try_from(start_column).ok().filter(|c| *c >= 1)?;
        let start_row = u32::try_from(start_row).ok().filter(|r| *r >= 1)?;
        let moved = item.moved_to(start_column, start_row)?;
        self.fits_columns(&moved).then_some(moved)
    }

    /// A pinned grid never grows sideways; rows are unbounded either way.
    fn fits_columns(&self, item: &Item) -> bool {
        !self.is_total_columns_fixed || item.end_column() <= self.min_total_columns
    }

    /// Swaps the item with the same id, keeping its position in the item list.
    fn replace_item(&self, item: Item) -> Self {
        let items = self
            .items
            .iter()
            .map(|current| {
                if current.id() == item.id() {
                    item.clone()
                } else {
                    current.clone()
                }
            })
            .collect();
        self.with_items(items)
    }
}

fn grid_steps(pixels: f64, step: f64) -> i32 {
    // `as` saturates and maps NaN to 0.
    (pixels / step).round() as i32
}
