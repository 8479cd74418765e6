#![forbid(unsafe_code)]

//! Headless grid layout engine.
//!
//! Items are rectangles on a 1-based column/row grid. A [`Layout`] places them (explicitly or
//! first-fit), moves them with cascading displacement of whatever is in the way, resizes them
//! without overlap, and exposes the pixel formulas a renderer needs. Every operation is a pure
//! function from one `Layout` value to another; rejected operations return an equal value.
//!
//! ```
//! use gridflow::{Layout, LayoutInput, RawItem, SliceWidth};
//!
//! let layout = Layout::create(LayoutInput {
//!     slice_height: 85.0,
//!     slice_width: SliceWidth::Provided(85.0),
//!     gap: 5.0,
//!     total_columns: 10,
//!     total_rows: 10,
//!     available_width: 500.0,
//!     items: vec![RawItem::new("a", 2, 2).at(1, 1), RawItem::new("b", 2, 2)],
//! })?;
//!
//! let b = layout.item("b").unwrap();
//! assert_eq!((b.start_column(), b.start_row()), (3, 1));
//!
//! let moved = layout.move_item(b, 0, 2);
//! assert_eq!(moved.item("b").unwrap().start_row(), 3);
//! # Ok::<(), gridflow::Error>(())
//! ```

pub mod config;
pub mod drag;
pub mod error;
pub mod item;
pub mod layout;
pub mod occupancy;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use config::{ItemDescriptor, LayoutDescriptor};
pub use drag::{DragSession, DragState, PointerSample};
pub use error::{Error, Field, Result};
pub use item::{GridArea, Item, ItemSpec};
pub use layout::{
    Direction, ItemBox, Layout, LayoutInput, LayoutSnapshot, Placement, PointerDelta, RawItem,
    SliceWidth,
};
pub use occupancy::{Occupancy, Slot};
