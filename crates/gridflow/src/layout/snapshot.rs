use super::Layout;
use crate::item::Item;
use indexmap::IndexMap;
use serde::Serialize;

/// Render-ready view of a layout: grid metrics plus one pixel box per item, keyed by id in
/// layout order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSnapshot<'a> {
    pub slice_height: f64,
    pub slice_width: f64,
    pub gap: f64,
    pub total_columns: u32,
    pub total_rows: u32,
    pub is_total_columns_fixed: bool,
    pub width: f64,
    pub height: f64,
    pub items: IndexMap<&'a str, ItemBox<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBox<'a> {
    #[serde(flatten)]
    pub item: &'a Item,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Layout {
    pub fn snapshot(&self) -> LayoutSnapshot<'_> {
        let items = self
            .items
            .iter()
            .map(|item| {
                let item_box = ItemBox {
                    item,
                    x: item.calculate_x_axis(self.slice_width, self.gap),
                    y: item.calculate_y_axis(self.slice_height, self.gap),
                    width: item.calculate_width(self.slice_width, self.gap),
                    height: item.calculate_height(self.slice_height, self.gap),
                };
                (item.id(), item_box)
            })
            .collect();

        LayoutSnapshot {
            slice_height: self.slice_height,
            slice_width: self.slice_width,
            gap: self.gap,
            total_columns: self.total_columns(),
            total_rows: self.total_rows(),
            is_total_columns_fixed: self.is_total_columns_fixed,
            width: self.calculate_width(),
            height: self.calculate_height(),
            items,
        }
    }
}
