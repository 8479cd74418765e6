//! JSON layout descriptors.
//!
//! Keys are camelCase so descriptors written for a browser-side grid can be fed in unchanged:
//!
//! ```json
//! {
//!   "sliceHeight": 85, "sliceWidth": 85, "gap": 5,
//!   "totalColumns": 10, "totalRows": 10, "availableWidth": 500,
//!   "items": [{ "id": "a", "startColumn": 1, "startRow": 1, "filledColumns": 2, "filledRows": 2 }]
//! }
//! ```
//!
//! Omitting `sliceWidth` derives it from `availableWidth`; omitting either `startColumn` or
//! `startRow` auto-places the item.

use crate::error::Result;
use crate::layout::{Layout, LayoutInput, Placement, RawItem, SliceWidth};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDescriptor {
    pub slice_height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slice_width: Option<f64>,
    pub gap: f64,
    pub total_columns: u32,
    pub total_rows: u32,
    pub available_width: f64,
    #[serde(default)]
    pub items: Vec<ItemDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDescriptor {
    pub id: String,
    #[serde(default)]
    pub is_fixed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_column: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_row: Option<u32>,
    pub filled_columns: u32,
    pub filled_rows: u32,
    #[serde(default = "one")]
    pub min_filled_columns: u32,
    #[serde(default = "one")]
    pub min_filled_rows: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_filled_columns: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_filled_rows: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

fn one() -> u32 {
    1
}

impl LayoutDescriptor {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Validates and places every item, see [`Layout::create`].
    pub fn build(self) -> Result<Layout> {
        Layout::create(self.into())
    }
}

impl From<LayoutDescriptor> for LayoutInput {
    fn from(value: LayoutDescriptor) -> Self {
        Self {
            slice_height: value.slice_height,
            slice_width: value
                .slice_width
                .map_or(SliceWidth::Derive, SliceWidth::Provided),
            gap: value.gap,
            total_columns: value.total_columns,
            total_rows: value.total_rows,
            available_width: value.available_width,
            items: value.items.into_iter().map(RawItem::from).collect(),
        }
    }
}

impl From<ItemDescriptor> for RawItem {
    fn from(value: ItemDescriptor) -> Self {
        Self {
            id: value.id,
            is_fixed: value.is_fixed,
            placement: Placement::from_coordinates(value.start_column, value.start_row),
            filled_columns: value.filled_columns,
            filled_rows: value.filled_rows,
            min_filled_columns: value.min_filled_columns,
            min_filled_rows: value.min_filled_rows,
            max_filled_columns: value.max_filled_columns,
            max_filled_rows: value.max_filled_rows,
            metadata: value.metadata,
        }
    }
}
