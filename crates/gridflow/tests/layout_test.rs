use gridflow::{Error, Field, Layout, LayoutInput, PointerDelta, RawItem, SliceWidth, Slot};

fn input(items: Vec<RawItem>) -> LayoutInput {
    LayoutInput {
        slice_height: 85.0,
        slice_width: SliceWidth::Provided(85.0),
        gap: 5.0,
        total_columns: 10,
        total_rows: 10,
        available_width: 500.0,
        items,
    }
}

fn derived_input(items: Vec<RawItem>) -> LayoutInput {
    LayoutInput {
        slice_width: SliceWidth::Derive,
        available_width: 1024.0,
        ..input(items)
    }
}

fn create_err(input: LayoutInput) -> Error {
    Layout::create(input).unwrap_err()
}

fn start(layout: &Layout, id: &str) -> (u32, u32) {
    let item = layout.item(id).unwrap();
    (item.start_column(), item.start_row())
}

#[test]
fn layout_create_computes_grid_size() {
    let layout = Layout::create(input(vec![RawItem::new("any_id", 2, 2).at(1, 1)])).unwrap();
    assert_eq!(layout.calculate_height(), 900.0);
    assert_eq!(layout.calculate_width(), 900.0);
    assert_eq!(layout.len(), 1);
    assert!(layout.is_total_columns_fixed());
}

#[test]
fn layout_create_reports_each_invalid_field() {
    for value in [0.0, -1.0, f64::NAN] {
        let err = create_err(LayoutInput {
            slice_height: value,
            ..input(Vec::new())
        });
        assert_eq!(err.to_string(), "Invalid layout slice height");

        let err = create_err(LayoutInput {
            slice_width: SliceWidth::Provided(value),
            ..input(Vec::new())
        });
        assert_eq!(err.to_string(), "Invalid layout slice width");

        let err = create_err(LayoutInput {
            gap: value,
            ..input(Vec::new())
        });
        assert_eq!(err.to_string(), "Invalid layout gap");

        let err = create_err(LayoutInput {
            available_width: value,
            ..input(Vec::new())
        });
        assert_eq!(err.to_string(), "Invalid layout available width");
    }

    let err = create_err(LayoutInput {
        total_columns: 0,
        ..input(Vec::new())
    });
    assert_eq!(err.to_string(), "Invalid layout total columns");

    let err = create_err(LayoutInput {
        total_rows: 0,
        ..input(Vec::new())
    });
    assert_eq!(err.to_string(), "Invalid layout total rows");
}

#[test]
fn layout_create_derives_slice_width() {
    let layout = Layout::create(derived_input(Vec::new())).unwrap();
    assert!(!layout.is_total_columns_fixed());
    assert!((layout.slice_width() - 97.4).abs() < 1e-9);
    assert_eq!(layout.calculate_width(), 1024.0);
}

#[test]
fn layout_create_rejects_a_derived_width_that_is_not_positive() {
    let err = create_err(LayoutInput {
        slice_width: SliceWidth::Derive,
        available_width: 40.0,
        ..input(Vec::new())
    });
    assert_eq!(err.field(), Field::LayoutSliceWidth);
}

#[test]
fn layout_create_propagates_item_errors() {
    let err = create_err(input(vec![RawItem::new("a", 0, 1)]));
    assert_eq!(err.field(), Field::ItemFilledColumns);

    let err = create_err(input(vec![RawItem::new("a", 1, 1).at(0, 3)]));
    assert_eq!(err.field(), Field::ItemStartColumn);
}

#[test]
fn layout_create_places_positioned_items_before_auto_placed_ones() {
    let layout = Layout::create(input(vec![
        RawItem::new("auto", 2, 2),
        RawItem::new("pinned", 2, 2).at(1, 1),
    ]))
    .unwrap();
    assert_eq!(start(&layout, "pinned"), (1, 1));
    assert_eq!(start(&layout, "auto"), (3, 1));
    assert!(!layout.has_collisions());
}

#[test]
fn layout_create_auto_places_in_input_order() {
    let layout = Layout::create(LayoutInput {
        available_width: 400.0,
        ..input(vec![
            RawItem::new("a", 2, 1),
            RawItem::new("b", 2, 1),
            RawItem::new("c", 2, 1),
        ])
    })
    .unwrap();
    // floor(400 / 85) = 4 visible columns: two 2-wide items per row.
    assert_eq!(start(&layout, "a"), (1, 1));
    assert_eq!(start(&layout, "b"), (3, 1));
    assert_eq!(start(&layout, "c"), (1, 2));
}

#[test]
fn layout_add_item_returns_a_new_layout() {
    let layout = Layout::create(input(Vec::new())).unwrap();
    let with_item = layout.add_item(RawItem::new("any_id", 2, 2).at(1, 1)).unwrap();
    assert_eq!(with_item.len(), 1);
    assert!(layout.is_empty());
}

#[test]
fn layout_add_item_is_idempotent_per_id() {
    let layout = Layout::create(input(Vec::new())).unwrap();
    let once = layout.add_item(RawItem::new("a", 2, 2)).unwrap();
    let twice = once.add_item(RawItem::new("a", 3, 3).at(5, 5)).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn layout_add_item_trusts_explicit_coordinates() {
    let layout = Layout::create(input(vec![RawItem::new("a", 2, 2).at(1, 1)])).unwrap();
    let overlapping = layout.add_item(RawItem::new("b", 2, 2).at(2, 2)).unwrap();
    assert_eq!(start(&overlapping, "b"), (2, 2));
    assert!(overlapping.has_collisions());
}

#[test]
fn layout_remove_item_drops_only_that_item() {
    let layout = Layout::create(input(vec![
        RawItem::new("a", 1, 1).at(1, 1),
        RawItem::new("b", 1, 1).at(2, 1),
    ]))
    .unwrap();
    let removed = layout.remove_item("a");
    assert!(!removed.contains("a"));
    assert!(removed.contains("b"));
    assert_eq!(layout.len(), 2);

    assert_eq!(layout.remove_item("missing"), layout);
}

#[test]
fn layout_tracks_last_filled_cells() {
    let empty = Layout::create(input(Vec::new())).unwrap();
    assert_eq!((empty.last_filled_column(), empty.last_filled_row()), (0, 0));

    let layout = empty
        .add_item(RawItem::new("a", 2, 3).at(4, 2))
        .unwrap()
        .add_item(RawItem::new("b", 1, 1).at(1, 6))
        .unwrap();
    assert_eq!((layout.last_filled_column(), layout.last_filled_row()), (5, 6));
}

#[test]
fn layout_growing_grid_keeps_a_buffer_past_content() {
    let layout = Layout::create(derived_input(vec![RawItem::new("a", 2, 2).at(9, 9)])).unwrap();
    assert_eq!(layout.total_columns(), 13);
    assert_eq!(layout.total_rows(), 13);

    let small = Layout::create(derived_input(vec![RawItem::new("a", 1, 1).at(1, 1)])).unwrap();
    assert_eq!(small.total_columns(), 10);
    assert_eq!(small.total_rows(), 10);
}

#[test]
fn layout_pinned_grid_keeps_its_column_count() {
    let layout = Layout::create(input(vec![RawItem::new("a", 2, 2).at(9, 9)])).unwrap();
    assert_eq!(layout.total_columns(), 10);
    assert_eq!(layout.total_rows(), 13);
    assert_eq!(layout.calculate_height(), 90.0 * 13.0);
}

#[test]
fn layout_available_slice_does_not_insert() {
    let layout = Layout::create(input(vec![
        RawItem::new("any_id", 2, 2).at(1, 1),
        RawItem::new("any_id_2", 4, 2).at(3, 1),
    ]))
    .unwrap();
    let before = layout.clone();
    assert_eq!(
        layout.available_slice(2, 2),
        Slot {
            start_column: 1,
            start_row: 3
        }
    );
    assert_eq!(layout, before);
}

#[test]
fn layout_converts_pointer_travel_into_grid_steps() {
    let layout = Layout::create(LayoutInput {
        slice_height: 40.0,
        ..input(Vec::new())
    })
    .unwrap();

    let right = PointerDelta {
        current_pointer: 190.0,
        last_pointer: 100.0,
        ..Default::default()
    };
    assert_eq!(layout.calculate_columns_to_move(right), 1);

    let left = PointerDelta {
        current_pointer: -140.0,
        last_pointer: 0.0,
        ..Default::default()
    };
    assert_eq!(layout.calculate_columns_to_move(left), -2);

    let scrolled = PointerDelta {
        current_pointer: 50.0,
        last_pointer: 0.0,
        current_scroll: 40.0,
        last_scroll: 0.0,
    };
    assert_eq!(layout.calculate_columns_to_move(scrolled), 1);

    // Rows step by slice height + gap = 45.
    let down = PointerDelta {
        current_pointer: 100.0,
        last_pointer: 0.0,
        ..Default::default()
    };
    assert_eq!(layout.calculate_rows_to_move(down), 2);
    assert_eq!(layout.calculate_rows_to_move(PointerDelta::default()), 0);
}

#[test]
fn layout_snapshot_lists_pixel_boxes_in_order() {
    let layout = Layout::create(input(vec![
        RawItem::new("b", 1, 1).at(3, 2),
        RawItem::new("a", 2, 2).at(1, 1),
    ]))
    .unwrap();
    let snapshot = layout.snapshot();
    let ids: Vec<&str> = snapshot.items.keys().copied().collect();
    assert_eq!(ids, ["b", "a"]);

    let b = &snapshot.items["b"];
    assert_eq!((b.x, b.y, b.width, b.height), (180.0, 90.0, 85.0, 85.0));
    assert_eq!(snapshot.width, 900.0);
    assert_eq!(snapshot.total_rows, 10);

    let value = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(value["items"]["a"]["startColumn"], 1);
    assert_eq!(value["items"]["a"]["width"], 175.0);
    assert_eq!(value["isTotalColumnsFixed"], true);
}
